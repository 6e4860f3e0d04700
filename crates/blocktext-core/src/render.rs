//! Render pipeline
//!
//! One call runs `validate → split → compose/wrap → align → colorize → join`.
//! Any failure is reported once through the [`DebugContext`] sink and then
//! returned; nothing is produced for a failed call.

use std::io::Write;

use crate::align::align_rows;
use crate::colorize::colorize;
use crate::compose::LineComposer;
use crate::debug::DebugContext;
use crate::error::{RenderError, Result};
use crate::font::FontLibrary;
use crate::options::{Options, PartialOptions, PartialViewport};
use crate::palette::{background, css_background, Env};
use crate::wrap::{split_lines, WrapLimits};

/// Result of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Every entry of `array` joined with newlines, ready to print
    pub string: String,
    /// Output lines, with blank separator lines between visual rows
    pub array: Vec<String>,
    /// Number of visual rows after wrapping
    pub lines: usize,
    /// Options the output was rendered with
    pub options: Options,
}

/// Renders text against a font library
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    library: &'a FontLibrary,
    debug: DebugContext<'a>,
}

impl<'a> Renderer<'a> {
    pub fn new(library: &'a FontLibrary, debug: DebugContext<'a>) -> Self {
        Self { library, debug }
    }

    /// Render `text`. `|` and newline sequences start a new logical line.
    pub fn render(
        &self,
        text: &str,
        options: &PartialOptions,
        viewport: PartialViewport,
    ) -> Result<RenderOutput> {
        self.run(text, options, viewport).map_err(|e| {
            self.debug.report(&e);
            e
        })
    }

    /// Render `text` and write it to stdout followed by a newline
    pub fn print(&self, text: &str, options: &PartialOptions, viewport: PartialViewport) -> Result<()> {
        let output = self.render(text, options, viewport)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", output.string)
            .and_then(|_| stdout.flush())
            .map_err(|e| {
                let error = RenderError::from(e);
                self.debug.report(&error);
                error
            })
    }

    fn run(&self, text: &str, options: &PartialOptions, viewport: PartialViewport) -> Result<RenderOutput> {
        let partial = options.clone().with_defaults();
        self.debug.log(1, || format!("Options: {:?}", partial));

        let mut options = Options::validate(partial)?;
        if text.is_empty() {
            return Err(RenderError::EmptyInput);
        }

        let viewport = viewport.resolve();
        self.debug
            .log(1, || format!("Viewport: {}x{}", viewport.width, viewport.height));

        let face = self
            .library
            .typeface(options.font)
            .ok_or_else(|| RenderError::UnknownFont(options.font.name().to_string()))?;

        // the console face has no built-in gaps, so the defaults shrink by one
        if face.is_console() {
            options.letter_spacing = options.letter_spacing.saturating_sub(1);
            options.line_height = options.line_height.saturating_sub(1);
        }

        let logical_lines = split_lines(text);
        self.debug
            .log(2, || format!("Split input into {} logical lines", logical_lines.len()));

        let limits = WrapLimits::effective(options.max_length, viewport.width);
        let mut rows = LineComposer::new(face, options.letter_spacing, limits).compose(&logical_lines, &self.debug);

        // browsers align with CSS instead
        if options.env == Env::Node {
            align_rows(&mut rows, options.align, viewport.width);
        }

        let painted = colorize(&rows, &options);
        let lines = painted.len();
        let mut array = join_rows(painted, options.line_height);

        if options.space {
            surround(&mut array, "\n\n", "\n\n");
        }

        let string = match options.env {
            Env::Node => {
                if let Some(rgb) = options.background.rgb() {
                    let escape = background(rgb);
                    surround(&mut array, &escape.open, &escape.close);
                }
                array.join("\n")
            }
            Env::Browser => format!(
                "<div style=\"font-family:monospace;white-space:pre;text-align:{};max-width:100%;overflow:scroll;background:{}\">{}</div>",
                options.align,
                css_background(&options.background),
                array.join("\n")
            ),
        };

        self.debug.log(1, || format!("Rendered {} visual lines", lines));

        Ok(RenderOutput {
            string,
            array,
            lines,
            options,
        })
    }
}

/// Flatten visual rows, putting `line_height` empty lines between them
fn join_rows(rows: Vec<Vec<String>>, line_height: usize) -> Vec<String> {
    let mut array = Vec::new();
    for (index, row) in rows.into_iter().enumerate() {
        if index > 0 {
            array.extend(std::iter::repeat(String::new()).take(line_height));
        }
        array.extend(row);
    }
    array
}

/// Fuse `before` into the first line and `after` into the last
fn surround(array: &mut [String], before: &str, after: &str) {
    if let Some(first) = array.first_mut() {
        first.insert_str(0, before);
    }
    if let Some(last) = array.last_mut() {
        last.push_str(after);
    }
}

/// Render with the built-in fonts, logging through `tracing`
pub fn render(
    text: &str,
    options: &PartialOptions,
    debug: bool,
    debug_level: u8,
    viewport: PartialViewport,
) -> Result<RenderOutput> {
    let context = DebugContext::new(debug, debug_level);
    let library = FontLibrary::builtin().map_err(|e| {
        context.report(&e);
        e
    })?;
    Renderer::new(library, context).render(text, options, viewport)
}

/// Like [`render`], but writes the output to stdout
pub fn print(
    text: &str,
    options: &PartialOptions,
    debug: bool,
    debug_level: u8,
    viewport: PartialViewport,
) -> Result<()> {
    let context = DebugContext::new(debug, debug_level);
    let library = FontLibrary::builtin().map_err(|e| {
        context.report(&e);
        e
    })?;
    Renderer::new(library, context).print(text, options, viewport)
}
