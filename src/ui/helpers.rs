//! Shared rendering utilities and helpers.
//!
//! Low-level text and geometry helpers used across the sheet components.
//! Everything here measures text in terminal cells, never bytes or chars.

use crate::ui::canvas::CellStyle;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Opacity below which a layer is drawn with dimmed styles.
pub const DIM_BELOW: f64 = 0.5;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal cells `text` occupies. Wide glyphs such as emoji
/// count twice.
#[must_use]
pub fn text_len(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cuts `text` to at most `max` cells, marking the cut with an ellipsis.
///
/// # Example
///
/// ```rust
/// use drillmenu::ui::helpers::truncate;
///
/// assert_eq!(truncate("Settings", 5), "Sett…");
/// assert_eq!(truncate("Home", 10), "Home");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text_len(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let budget = max - 1;
    let mut used = 0;
    let mut cut = String::new();
    for ch in text.chars() {
        let width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        cut.push(ch);
    }
    cut.push('…');
    cut
}

/// Column at which `len` cells are centered within `width`.
#[must_use]
pub const fn centered_col(len: usize, width: usize) -> usize {
    width.saturating_sub(len) / 2
}

/// The faded counterpart of a style, for layers that are mostly transparent.
#[must_use]
pub const fn dimmed(style: CellStyle) -> CellStyle {
    match style {
        CellStyle::Focused | CellStyle::FocusedDim => CellStyle::FocusedDim,
        CellStyle::Border => CellStyle::Border,
        CellStyle::Backdrop => CellStyle::Backdrop,
        CellStyle::Normal
        | CellStyle::Dim
        | CellStyle::Title
        | CellStyle::Back
        | CellStyle::Chevron
        | CellStyle::Empty
        | CellStyle::Notice => CellStyle::Dim,
    }
}

/// Converts a slide offset (fraction of `width`) to a whole-column shift.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn column_shift(offset: f64, width: usize) -> isize {
    (offset * width as f64).round() as isize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_glyphs_count_two_cells() {
        assert_eq!(text_len("🚀 Deploy"), 9);
        assert_eq!(truncate("🚀🚀🚀", 4), "🚀…");
        assert_eq!(truncate("a🚀b", 3), "a…");
        assert!(text_len(&truncate("🚀 Deploy now", 6)) <= 6);
    }

    #[test]
    fn truncate_counts_cells_not_bytes() {
        assert_eq!(truncate("‹ Back", 6), "‹ Back");
        assert_eq!(truncate("‹ Back", 3), "‹ …");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn centering_rounds_left() {
        assert_eq!(centered_col(4, 11), 3);
        assert_eq!(centered_col(20, 10), 0);
    }

    #[test]
    fn dimming_keeps_focus_visible() {
        assert_eq!(dimmed(CellStyle::Focused), CellStyle::FocusedDim);
        assert_eq!(dimmed(CellStyle::Title), CellStyle::Dim);
    }

    #[test]
    fn offsets_become_signed_columns() {
        assert_eq!(column_shift(0.0, 60), 0);
        assert_eq!(column_shift(1.1, 60), 66);
        assert_eq!(column_shift(-0.5, 61), -31);
    }
}
