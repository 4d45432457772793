//! Bottom sheet placement and height animation.
//!
//! The sheet is a bordered box anchored to the bottom edge of the pane,
//! horizontally centered and inset from the sides. Its height follows the
//! natural height of the current level; changes are tweened with the same
//! easing curve as the level slides.

use crate::app::transition::{CubicBezier, STANDARD_EASING};

/// Columns kept free on each side of the sheet.
pub const SIDE_INSET: usize = 2;

/// Widest the sheet ever gets, borders included.
pub const MAX_WIDTH: usize = 64;

/// Rows kept free below the sheet.
pub const BOTTOM_MARGIN: usize = 1;

/// Duration of a sheet height change, in seconds.
pub const HEIGHT_DURATION_SECS: f64 = 0.25;

/// Rows the sheet adds around a level's own lines: two borders, a blank
/// spacer and the footer.
pub const CHROME_ROWS: usize = 4;

/// Where the sheet sits in the pane for one frame. Coordinates are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetGeometry {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl SheetGeometry {
    /// Places a sheet of `height` rows in a `rows` x `cols` pane.
    ///
    /// The height is capped so the sheet always fits above the bottom margin.
    #[must_use]
    pub fn place(rows: usize, cols: usize, height: usize) -> Self {
        let width = cols.saturating_sub(2 * SIDE_INSET).min(MAX_WIDTH);
        let x = (cols - width) / 2;
        let available = rows.saturating_sub(BOTTOM_MARGIN);
        let height = height.min(available);
        let y = available - height;
        Self { x, y, width, height }
    }

    /// Width available to level content inside the borders.
    #[must_use]
    pub const fn inner_width(&self) -> usize {
        self.width.saturating_sub(2)
    }

    /// Column of the first content cell.
    #[must_use]
    pub const fn inner_x(&self) -> usize {
        self.x + 1
    }

    /// Row of the first content line.
    #[must_use]
    pub const fn inner_y(&self) -> usize {
        self.y + 1
    }

    /// Row of the footer line, just above the bottom border.
    #[must_use]
    pub const fn footer_y(&self) -> usize {
        (self.y + self.height).saturating_sub(2)
    }

    /// Rows available to level content: between the top border and the
    /// spacer above the footer.
    #[must_use]
    pub const fn content_rows(&self) -> usize {
        self.height.saturating_sub(CHROME_ROWS)
    }

    /// Whether the 0-based cell lies on or inside the sheet border.
    #[must_use]
    pub const fn contains(&self, line: usize, column: usize) -> bool {
        line >= self.y && line < self.y + self.height && column >= self.x && column < self.x + self.width
    }
}

/// Eased interpolation of the sheet height between two row counts.
#[derive(Debug, Clone)]
pub struct HeightTween {
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
    easing: CubicBezier,
}

impl Default for HeightTween {
    fn default() -> Self {
        Self { from: 0.0, to: 0.0, elapsed: HEIGHT_DURATION_SECS, duration: HEIGHT_DURATION_SECS, easing: STANDARD_EASING }
    }
}

impl HeightTween {
    /// Jumps straight to `height` with no animation.
    #[allow(clippy::cast_precision_loss)]
    pub fn snap(&mut self, height: usize) {
        self.from = height as f64;
        self.to = self.from;
        self.elapsed = self.duration;
    }

    /// Starts animating from the current height toward `height`.
    ///
    /// Retargeting mid-flight starts from wherever the sheet is now.
    #[allow(clippy::cast_precision_loss)]
    pub fn retarget(&mut self, height: usize) {
        let target = height as f64;
        if (target - self.to).abs() < f64::EPSILON {
            return;
        }
        self.from = self.value();
        self.to = target;
        self.elapsed = 0.0;
    }

    /// Advances by `dt` seconds. Returns `true` while still moving.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.is_animating()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.elapsed < self.duration
    }

    fn value(&self) -> f64 {
        let p = self.easing.ease(self.elapsed / self.duration);
        self.from + (self.to - self.from) * p
    }

    /// Height in whole rows for the current frame.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn current(&self) -> usize {
        self.value().round().max(0.0) as usize
    }
}
