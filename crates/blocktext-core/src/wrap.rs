//! Line breaking
//!
//! Input is split once on explicit break markers (`|` and any newline
//! sequence). While composing, [`WrapLimits`] decides when the next glyph
//! no longer fits on the current visual row.

/// Split raw input into logical lines on `|`, `\r\n`, `\r` and `\n`
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        match ch {
            '|' | '\n' => {
                lines.push(&text[start..index]);
                start = index + 1;
            }
            '\r' => {
                lines.push(&text[start..index]);
                start = index + 1;
                if let Some(&(next, '\n')) = chars.peek() {
                    chars.next();
                    start = next + 1;
                }
            }
            _ => {}
        }
    }
    lines.push(&text[start..]);
    lines
}

/// Width limit on a single visual row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapLimits {
    /// Columns per row, glyphs and letter spacing included
    pub max_width: usize,
}

impl WrapLimits {
    pub fn new(max_width: usize) -> Self {
        Self { max_width }
    }

    /// `max_length` when it is set, otherwise the viewport width
    pub fn effective(max_length: usize, viewport_width: usize) -> Self {
        Self::new(if max_length > 0 { max_length } else { viewport_width })
    }

    /// Whether a glyph of `glyph_width` (plus `spacing` columns in front of
    /// it) must start a new row, given the row so far.
    ///
    /// An empty row always accepts its first glyph, so a glyph wider than
    /// the limit still gets a row of its own instead of being cut.
    pub fn must_break(&self, row_chars: usize, row_width: usize, spacing: usize, glyph_width: usize) -> bool {
        if row_chars == 0 {
            return false;
        }
        row_width.saturating_add(spacing).saturating_add(glyph_width) > self.max_width
    }
}
