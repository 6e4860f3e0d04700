//! End-to-end rendering through the public API

use blocktext_core::{
    gradient, DebugContext, FontLibrary, MemorySink, PartialOptions, PartialViewport, RenderError,
    Renderer,
};
use pretty_assertions::assert_eq;

fn console() -> PartialOptions {
    PartialOptions {
        font: Some("console".into()),
        ..Default::default()
    }
}

fn render(text: &str, options: &PartialOptions) -> blocktext_core::RenderOutput {
    blocktext_core::render(text, options, false, 1, PartialViewport::width(100)).unwrap()
}

#[test]
fn test_console_plain() {
    let output = render("text", &console());
    assert_eq!(output.string, "\n\ntext\n\n");
    assert_eq!(output.lines, 1);
    assert_eq!(output.array, vec!["\n\ntext\n\n"]);
}

#[test]
fn test_console_red() {
    let options = PartialOptions {
        colors: Some(vec!["red".into()]),
        ..console()
    };
    let output = render("text", &options);
    assert_eq!(output.string, "\n\n\u{1b}[38;2;255;0;0mtext\u{1b}[39m\n\n");
    assert_eq!(output.lines, 1);
}

#[test]
fn test_block_explicit_break() {
    let output = render("te|xt", &PartialOptions::default());
    assert_eq!(output.lines, 2);

    // 6 font rows, one separator, 6 font rows
    assert_eq!(output.array.len(), 13);
    assert_eq!(output.array[6], "");
    assert!(output.array[0].starts_with("\n\n"));
    assert!(output.array[12].ends_with("\n\n"));
    assert_eq!(output.string, output.array.join("\n"));
}

#[test]
fn test_block_rows_share_width() {
    let options = PartialOptions {
        space: Some(false),
        ..Default::default()
    };
    let output = render("abc", &options);
    let widths: Vec<usize> = output.array.iter().map(|l| l.chars().count()).collect();
    assert!(widths.iter().all(|w| *w == widths[0]), "{:?}", widths);
}

#[test]
fn test_right_align_pads_by_free_space() {
    let left = render("text", &PartialOptions { space: Some(false), ..console() });
    let right = render(
        "text",
        &PartialOptions {
            space: Some(false),
            align: Some("right".into()),
            ..console()
        },
    );
    assert_eq!(right.array[0].len(), left.array[0].len() + 96);
    assert_eq!(right.array[0], format!("{}text", " ".repeat(96)));

    let center = render(
        "text",
        &PartialOptions {
            space: Some(false),
            align: Some("center".into()),
            ..console()
        },
    );
    assert_eq!(center.array[0], format!("{}text", " ".repeat(48)));
}

#[test]
fn test_soft_wrap_on_max_length() {
    let options = PartialOptions {
        max_length: Some(3),
        space: Some(false),
        ..console()
    };
    let output = render("abcdef", &options);
    assert_eq!(output.lines, 2);
    assert_eq!(output.array, vec!["abc", "def"]);
}

#[test]
fn test_soft_wrap_on_viewport() {
    let options = PartialOptions {
        space: Some(false),
        ..console()
    };
    let output = blocktext_core::render("abcdef", &options, false, 1, PartialViewport::width(4)).unwrap();
    assert_eq!(output.array, vec!["abcd", "ef"]);
}

#[test]
fn test_max_length_overrides_viewport() {
    let options = PartialOptions {
        max_length: Some(6),
        space: Some(false),
        ..console()
    };
    let output = blocktext_core::render("abcdef", &options, false, 1, PartialViewport::width(4)).unwrap();
    assert_eq!(output.array, vec!["abcdef"]);
}

#[test]
fn test_block_soft_wrap_has_separator() {
    let options = PartialOptions {
        max_length: Some(20),
        space: Some(false),
        ..Default::default()
    };
    let output = blocktext_core::render("ABCD", &options, false, 1, PartialViewport::width(200)).unwrap();
    assert_eq!(output.lines, 2);

    // 6 font rows, one blank separator, 6 font rows
    assert_eq!(output.array.len(), 13);
    assert_eq!(output.array[6], "");
    assert!(output.array.iter().all(|l| l.chars().count() <= 20));
}

#[test]
fn test_background_fills_padding() {
    let options = PartialOptions {
        background: Some("red".into()),
        ..console()
    };
    let output = render("hi", &options);
    assert_eq!(output.string, "\u{1b}[48;2;255;0;0m\n\nhi\n\n\u{1b}[49m");
}

#[test]
fn test_background_color_alias() {
    let options = PartialOptions {
        background_color: Some("#0000ff".into()),
        ..console()
    };
    let output = render("hi", &options);
    assert!(output.string.starts_with("\u{1b}[48;2;0;0;255m"));
}

#[test]
fn test_browser_output() {
    let options = PartialOptions {
        env: Some("browser".into()),
        align: Some("center".into()),
        ..console()
    };
    let output = render("a<b", &options);
    assert_eq!(
        output.string,
        "<div style=\"font-family:monospace;white-space:pre;text-align:center;max-width:100%;overflow:scroll;background:transparent\">\n\na&lt;b\n\n</div>"
    );
}

#[test]
fn test_gradient_endpoints() {
    let options = PartialOptions {
        gradient: Some(vec!["red".into(), "blue".into()]),
        space: Some(false),
        ..console()
    };
    let output = render("abc", &options);
    let colors = gradient("#ff0000", "#0000ff", 3);
    assert_eq!(colors.first().map(String::as_str), Some("#ff0000"));
    assert!(output.array[0].starts_with("\u{1b}[38;2;255;0;0ma"));
    assert!(output.array[0].ends_with("\u{1b}[38;2;0;0;255mc\u{1b}[39m"));
}

#[test]
fn test_unknown_option_reports_once() {
    let cases = [
        PartialOptions { font: Some("comic".into()), ..Default::default() },
        PartialOptions { align: Some("middle".into()), ..Default::default() },
        PartialOptions { colors: Some(vec!["blurple".into()]), ..Default::default() },
        PartialOptions { background: Some("candy".into()), ..Default::default() },
    ];

    let library = FontLibrary::builtin().unwrap();
    for options in cases {
        let sink = MemorySink::new();
        let renderer = Renderer::new(library, DebugContext::disabled().with_sink(&sink));
        let result = renderer.render("text", &options, PartialViewport::width(100));
        assert!(result.as_ref().is_err_and(RenderError::is_validation), "{:?}", options);
        assert_eq!(sink.errors().len(), 1, "{:?}", options);
    }
}

#[test]
fn test_render_is_idempotent() {
    let options = PartialOptions {
        font: Some("chrome".into()),
        colors: Some(vec!["candy".into(), "candy".into(), "candy".into()]),
        align: Some("center".into()),
        ..Default::default()
    };
    let first = render("hello|world", &options);
    let second = render("hello|world", &options);
    assert_eq!(first, second);
}

#[test]
fn test_every_face_renders() {
    for face in blocktext_core::FontFace::all() {
        let options = PartialOptions {
            font: Some(face.name().to_string()),
            ..Default::default()
        };
        let output = render("Hi 42!", &options);
        assert_eq!(output.lines, 1, "{}", face);
    }
}
