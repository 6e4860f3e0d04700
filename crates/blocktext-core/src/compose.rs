//! Glyph composition
//!
//! Walks each logical line left to right, appending glyph rows into the
//! visual row under construction and starting a fresh row whenever
//! [`WrapLimits`] says the next glyph does not fit.

use crate::debug::DebugContext;
use crate::font::{push_segment, row_width, Glyph, Row, Segment, Typeface};
use crate::wrap::WrapLimits;

/// One visual row of output: a composed line for every font row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRow {
    /// Index of the logical line this row came from
    pub logical_line: usize,
    /// One entry per font row, all the same width
    pub lines: Vec<Row>,
    /// Width in columns, excluding alignment padding
    pub width: usize,
    /// Number of glyphs on the row
    pub chars: usize,
    /// Alignment padding in front of every line
    pub padding: usize,
}

impl RenderRow {
    fn new(face: &Typeface<'_>, logical_line: usize) -> Self {
        let lines = face.buffer().into_owned();
        let width = lines.first().map(|row| row_width(row)).unwrap_or(0);
        Self {
            logical_line,
            lines,
            width,
            chars: 0,
            padding: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }

    fn push_spacing(&mut self, letterspace: &[Row], letter_spacing: usize, unit_width: usize) {
        for (line, space) in self.lines.iter_mut().zip(letterspace) {
            for _ in 0..letter_spacing {
                for segment in space {
                    push_segment(line, segment.clone());
                }
            }
        }
        self.width = self.width.saturating_add(letter_spacing.saturating_mul(unit_width));
    }

    fn push_glyph(&mut self, glyph: &Glyph) {
        for (line, glyph_row) in self.lines.iter_mut().zip(glyph.rows()) {
            for segment in glyph_row {
                push_segment(line, segment.clone());
            }
        }
        self.width += glyph.width();
        self.chars += 1;
    }

    /// Indent every line by `columns` spaces
    pub fn pad_left(&mut self, columns: usize) {
        if columns == 0 {
            return;
        }
        let pad = " ".repeat(columns);
        for line in &mut self.lines {
            match line.first_mut() {
                Some(first) if first.region.is_none() => first.text.insert_str(0, &pad),
                _ => line.insert(0, Segment::plain(pad.clone())),
            }
        }
        self.padding += columns;
    }
}

/// Builds [`RenderRow`]s for a typeface
#[derive(Debug)]
pub struct LineComposer<'a> {
    face: Typeface<'a>,
    letter_spacing: usize,
    limits: WrapLimits,
}

impl<'a> LineComposer<'a> {
    pub fn new(face: Typeface<'a>, letter_spacing: usize, limits: WrapLimits) -> Self {
        Self {
            face,
            letter_spacing,
            limits,
        }
    }

    /// Compose every logical line. Characters the face cannot draw are
    /// dropped without leaving a gap.
    pub fn compose(&self, logical_lines: &[&str], debug: &DebugContext<'_>) -> Vec<RenderRow> {
        let letterspace = self.face.letterspace();
        let spacing_width = self.letter_spacing.saturating_mul(self.face.letterspace_width());
        let mut rows = Vec::new();

        for (index, text) in logical_lines.iter().enumerate() {
            let mut row = RenderRow::new(&self.face, index);

            for ch in text.chars() {
                let Some(glyph) = self.face.glyph(ch) else {
                    debug.log(3, || format!("No glyph for {:?}, skipping", ch));
                    continue;
                };

                let spacing = if row.is_empty() { 0 } else { spacing_width };
                if self.limits.must_break(row.chars, row.width, spacing, glyph.width()) {
                    debug.log(2, || {
                        format!("Wrapping line {} after {} characters", index, row.chars)
                    });
                    rows.push(std::mem::replace(&mut row, RenderRow::new(&self.face, index)));
                }

                if !row.is_empty() {
                    row.push_spacing(&letterspace, self.letter_spacing, self.face.letterspace_width());
                }
                row.push_glyph(&glyph);
            }

            rows.push(row);
        }

        rows
    }
}
