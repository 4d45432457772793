//! Character canvas used to compose the sheet before it is printed.
//!
//! Sliding levels overlap and are clipped against the sheet edges, which is
//! awkward to do with raw ANSI strings. Components therefore draw styled
//! characters into a [`Canvas`], and the renderer converts each row to ANSI
//! output in one pass.
//!
//! A wide glyph (an emoji icon, for example) takes two cells: the glyph
//! itself and a tail cell that prints nothing. A glyph that would be split
//! by the clip edge, or half-overwritten later, is replaced by a space so
//! every row always prints exactly `width` terminal columns.

use crate::ui::theme::Theme;
use unicode_width::UnicodeWidthChar;

/// Semantic style of one cell, resolved to colors by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStyle {
    #[default]
    Normal,
    Dim,
    Title,
    Back,
    Focused,
    FocusedDim,
    Chevron,
    Border,
    Empty,
    Notice,
    Backdrop,
}

/// One terminal column. `ch` is `None` for the tail of a wide glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: Option<char>,
    style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: Some(' '), style: CellStyle::Normal }
    }
}

/// Rectangle that drawing is restricted to, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clip {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Clip {
    fn contains(&self, x: isize, y: usize) -> bool {
        let Ok(x) = usize::try_from(x) else {
            return false;
        };
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// A fixed-size grid of styled characters.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::default(); width * height] }
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn full(&self) -> Clip {
        Clip { x: 0, y: 0, width: self.width, height: self.height }
    }

    /// Writes `text` starting at column `x` of row `y`, dropping anything
    /// outside `clip`. `x` may be negative for content sliding in from the left.
    ///
    /// Columns advance by each glyph's display width; zero-width characters
    /// are skipped.
    pub fn put_str(&mut self, x: isize, y: usize, text: &str, style: CellStyle, clip: Clip) {
        if y >= self.height {
            return;
        }
        let mut col = x;
        for ch in text.chars() {
            let width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if width == 0 {
                continue;
            }
            if width == 1 {
                self.put_cell(col, y, Some(ch), style, clip);
            } else if clip.contains(col, y) && clip.contains(col + 1, y) {
                self.put_cell(col, y, Some(ch), style, clip);
                self.put_cell(col + 1, y, None, style, clip);
            } else {
                // Split by the clip edge: blank whichever half is visible.
                self.put_cell(col, y, Some(' '), style, clip);
                self.put_cell(col + 1, y, Some(' '), style, clip);
            }
            col += isize::try_from(width).unwrap_or(1);
        }
    }

    fn put_cell(&mut self, x: isize, y: usize, ch: Option<char>, style: CellStyle, clip: Clip) {
        if !clip.contains(x, y) {
            return;
        }
        let Ok(col) = usize::try_from(x) else {
            return;
        };
        let row = y * self.width;
        let previous = self.cells[row + col].ch;

        // Never leave half of a wide glyph behind.
        if previous.is_none() && col > 0 {
            self.cells[row + col - 1].ch = Some(' ');
        }
        if previous.is_some() && col + 1 < self.width && self.cells[row + col + 1].ch.is_none() {
            self.cells[row + col + 1].ch = Some(' ');
        }

        self.cells[row + col] = Cell { ch, style };
    }

    /// Restyles a horizontal run without changing its characters.
    pub fn fill_style(&mut self, x: isize, y: usize, len: usize, style: CellStyle, clip: Clip) {
        if y >= self.height {
            return;
        }
        for i in 0..len {
            let Ok(step) = isize::try_from(i) else {
                break;
            };
            let col = x + step;
            if clip.contains(col, y) {
                if let Ok(col) = usize::try_from(col) {
                    self.cells[y * self.width + col].style = style;
                }
            }
        }
    }

    /// Plain text of one row, without styling.
    #[must_use]
    pub fn row_text(&self, y: usize) -> String {
        self.cells[y * self.width..(y + 1) * self.width].iter().filter_map(|c| c.ch).collect()
    }

    /// Style of a single cell.
    #[must_use]
    pub fn style_at(&self, x: usize, y: usize) -> CellStyle {
        self.cells[y * self.width + x].style
    }

    /// Converts one row to ANSI output, emitting escapes only on style changes.
    #[must_use]
    pub fn row_ansi(&self, y: usize, theme: &Theme) -> String {
        let mut out = String::new();
        let mut current: Option<CellStyle> = None;
        for cell in &self.cells[y * self.width..(y + 1) * self.width] {
            let Some(ch) = cell.ch else {
                continue;
            };
            if current != Some(cell.style) {
                out.push_str(Theme::reset());
                out.push_str(&theme.style(cell.style));
                current = Some(cell.style);
            }
            out.push(ch);
        }
        out.push_str(Theme::reset());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers;

    #[test]
    fn text_is_clipped_on_both_sides() {
        let mut canvas = Canvas::new(10, 1);
        let clip = Clip { x: 2, y: 0, width: 5, height: 1 };
        canvas.put_str(-1, 0, "abcdefghij", CellStyle::Normal, clip);
        assert_eq!(canvas.row_text(0), "  defgh   ");
    }

    #[test]
    fn out_of_range_rows_are_ignored() {
        let mut canvas = Canvas::new(4, 1);
        let clip = canvas.full();
        canvas.put_str(0, 3, "zz", CellStyle::Normal, clip);
        assert_eq!(canvas.row_text(0), "    ");
    }

    #[test]
    fn wide_glyphs_take_two_columns() {
        let mut canvas = Canvas::new(6, 1);
        let clip = canvas.full();
        canvas.put_str(0, 0, "🚀ab", CellStyle::Normal, clip);
        canvas.put_str(5, 0, "│", CellStyle::Border, clip);
        assert_eq!(canvas.row_text(0), "🚀ab │");
        assert_eq!(helpers::text_len(&canvas.row_text(0)), 6);
        assert_eq!(canvas.style_at(5, 0), CellStyle::Border);
    }

    #[test]
    fn wide_glyph_split_by_clip_becomes_blank() {
        let mut canvas = Canvas::new(4, 1);
        let clip = Clip { x: 1, y: 0, width: 3, height: 1 };
        canvas.put_str(0, 0, "🚀xy", CellStyle::Normal, clip);
        assert_eq!(canvas.row_text(0), "  xy");
    }

    #[test]
    fn overwriting_half_a_wide_glyph_blanks_the_other_half() {
        let mut canvas = Canvas::new(4, 1);
        let clip = canvas.full();
        canvas.put_str(0, 0, "🚀🚀", CellStyle::Normal, clip);
        canvas.put_str(1, 0, "x", CellStyle::Normal, clip);
        assert_eq!(canvas.row_text(0), " x🚀");
        assert_eq!(helpers::text_len(&canvas.row_text(0)), 4);
    }

    #[test]
    fn zero_width_characters_do_not_advance() {
        let mut canvas = Canvas::new(3, 1);
        let clip = canvas.full();
        canvas.put_str(0, 0, "a\u{200b}b", CellStyle::Normal, clip);
        assert_eq!(canvas.row_text(0), "ab ");
    }

    #[test]
    fn fill_style_keeps_characters() {
        let mut canvas = Canvas::new(4, 1);
        let clip = canvas.full();
        canvas.put_str(0, 0, "ab", CellStyle::Normal, clip);
        canvas.fill_style(0, 0, 4, CellStyle::Focused, clip);
        assert_eq!(canvas.row_text(0), "ab  ");
        assert_eq!(canvas.style_at(3, 0), CellStyle::Focused);
    }
}
