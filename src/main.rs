//! blocktext - big letters for your terminal
//!
//! ```text
//!  █▄▄ █   █▀█ █▀▀ █▄▀ ▀█▀ █▀▀ ▀▄▀ ▀█▀
//!  █▄█ █▄▄ █▄█ █▄▄ █ █  █  ██▄ █ █  █
//! ```

use std::path::PathBuf;

use anyhow::Context;
use blocktext_config::ConfigLoader;
use blocktext_core::{FontFace, FontLibrary, PartialOptions, PartialViewport};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// blocktext - render text as block letters
#[derive(Parser, Debug)]
#[command(name = "blocktext")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to render, use "|" to break lines
    #[arg(required_unless_present_any = ["list_fonts", "save_config"])]
    text: Option<String>,

    /// Font face
    #[arg(short = 'f', long)]
    font: Option<String>,

    /// Alignment: left, center or right
    #[arg(short = 'a', long)]
    align: Option<String>,

    /// Comma separated colors
    #[arg(short = 'c', long, value_delimiter = ',')]
    colors: Option<Vec<String>>,

    /// Background color
    #[arg(short = 'b', long)]
    background: Option<String>,

    /// Space between characters
    #[arg(short = 'l', long)]
    letter_spacing: Option<usize>,

    /// Blank lines between rows
    #[arg(short = 'z', long)]
    line_height: Option<usize>,

    /// Surround the output with blank lines
    #[arg(short = 's', long)]
    space: Option<bool>,

    /// Maximum line width in columns, 0 for the terminal width
    #[arg(short = 'm', long)]
    max_length: Option<usize>,

    /// Two comma separated gradient colors
    #[arg(short = 'g', long, value_delimiter = ',')]
    gradient: Option<Vec<String>>,

    /// Restart the gradient on every line
    #[arg(short = 'i', long)]
    independent_gradient: bool,

    /// Switch gradient colors hard instead of blending
    #[arg(short = 't', long)]
    transition_gradient: bool,

    /// Output environment: node or browser
    #[arg(short = 'e', long)]
    env: Option<String>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every available font
    #[arg(long)]
    list_fonts: bool,

    /// Store the given options as defaults in the config file
    #[arg(long)]
    save_config: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Debug detail, 1 to 3
    #[arg(long, default_value_t = 1)]
    debug_level: u8,
}

impl Args {
    /// Options set on the command line. Flags that were not passed stay
    /// unset so config values show through.
    fn partial_options(&self) -> PartialOptions {
        PartialOptions {
            font: self.font.clone(),
            align: self.align.clone(),
            colors: self.colors.clone(),
            background: self.background.clone(),
            background_color: None,
            letter_spacing: self.letter_spacing,
            line_height: self.line_height,
            space: self.space,
            max_length: self.max_length,
            gradient: self.gradient.clone(),
            independent_gradient: self.independent_gradient.then_some(true),
            transition_gradient: self.transition_gradient.then_some(true),
            env: self.env.clone(),
        }
    }
}

/// `COLUMNS` and `LINES` override the size the terminal reports. Zero or
/// unreadable values fall through to the renderer defaults.
fn viewport_from(
    columns: Option<String>,
    lines: Option<String>,
    terminal: Option<(u16, u16)>,
) -> PartialViewport {
    let read = |value: Option<String>| {
        value
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
    };
    let (term_width, term_height) = terminal
        .map(|(w, h)| (Some(usize::from(w)), Some(usize::from(h))))
        .unwrap_or((None, None));

    PartialViewport {
        width: read(columns).or(term_width.filter(|n| *n > 0)),
        height: read(lines).or(term_height.filter(|n| *n > 0)),
    }
}

fn viewport() -> PartialViewport {
    let terminal = crossterm::terminal::size().ok();
    tracing::debug!("Terminal size: {:?}", terminal);
    viewport_from(
        std::env::var("COLUMNS").ok(),
        std::env::var("LINES").ok(),
        terminal,
    )
}

fn font_summary(library: &FontLibrary, face: FontFace) -> String {
    let plural = |n: usize| if n == 1 { "" } else { "s" };
    let Some(typeface) = library.typeface(face) else {
        return format!("{:<12} missing", face.name());
    };
    let (lines, colors) = (typeface.lines(), typeface.colors());
    let mut summary = format!(
        "{:<12} {} line{}, {} color{}",
        face.name(),
        lines,
        plural(lines),
        colors,
        plural(colors)
    );
    match library.get(face) {
        Some(font) => {
            summary.push_str(&format!(", {} chars", font.supported_chars().count()));
            if let Some(version) = font.version() {
                summary.push_str(&format!(", v{}", version));
            }
        }
        None => summary.push_str(", any printable char"),
    }
    summary
}

fn list_fonts() -> anyhow::Result<()> {
    let library = FontLibrary::builtin().context("failed to load built-in fonts")?;
    for face in FontFace::all() {
        println!("{}", font_summary(library, *face));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("blocktext={}", log_level)),
        ))
        .init();

    tracing::debug!("Starting blocktext v{}", env!("CARGO_PKG_VERSION"));

    if args.list_fonts {
        return list_fonts();
    }

    let loader = match &args.config {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let defaults = loader
        .load()
        .with_context(|| format!("failed to read config {}", loader.path().display()))?;
    let options = defaults.merge(args.partial_options());

    if args.save_config {
        loader
            .save(&options)
            .with_context(|| format!("failed to write config {}", loader.path().display()))?;
    }

    let Some(text) = args.text.as_deref() else {
        return Ok(());
    };

    // the renderer has already logged the failure
    if blocktext_core::print(text, &options, args.debug, args.debug_level, viewport()).is_err() {
        std::process::exit(1);
    }

    Ok(())
}
