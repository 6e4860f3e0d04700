//! Horizontal alignment

use crate::compose::RenderRow;
use crate::options::Align;

/// Columns of left padding for a row of `row_width` in a viewport of
/// `viewport_width`. Rows wider than the viewport are never shifted left.
pub fn left_pad(align: Align, row_width: usize, viewport_width: usize) -> usize {
    let free = viewport_width.saturating_sub(row_width);
    match align {
        Align::Left => 0,
        Align::Center => free / 2,
        Align::Right => free,
    }
}

/// Pad every non-empty row in place
pub fn align_rows(rows: &mut [RenderRow], align: Align, viewport_width: usize) {
    for row in rows.iter_mut().filter(|row| !row.is_empty()) {
        row.pad_left(left_pad(align, row.width, viewport_width));
    }
}
