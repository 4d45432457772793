//! Composable UI component renderers.
//!
//! Each component draws one part of the sheet into a [`Canvas`]:
//!
//! - [`header`]: Title or back affordance, plus the separator
//! - [`level`]: Item rows of one menu level
//! - [`empty`]: Message shown for a level without items
//! - [`footer`]: Keybinding hints or load notice
//!
//! [`compose`] stacks them into the full pane. [`hit_test`] answers which
//! part of that picture a click landed on.
//!
//! # Layout
//!
//! ```text
//! [backdrop]
//! ╭──────────────────────────────╮
//! │            Title             │  <- heading (or "‹ Back   Label")
//! │──────────────────────────────│
//! │ ⌂ Home                       │  <- items, sliding horizontally
//! │ ⚙ Settings                 › │
//! │   Preferences                │
//! │                              │
//! │  ↑↓ move · ⏎ select · esc    │  <- footer
//! ╰──────────────────────────────╯
//! [bottom margin]
//! ```

pub mod empty;
pub mod footer;
pub mod header;
pub mod level;

use crate::ui::canvas::{Canvas, CellStyle, Clip};
use crate::ui::helpers::{column_shift, DIM_BELOW};
use crate::ui::sheet::SheetGeometry;
use crate::ui::viewmodel::MenuViewModel;

use footer::draw_footer;
use level::LineTarget;

/// Where a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// On the backdrop around the sheet.
    Outside,
    /// Inside the sheet but on nothing clickable.
    Sheet,
    /// On the back affordance of a nested level.
    Back,
    /// On an item of the current level.
    Item(usize),
}

fn content_clip(geometry: &SheetGeometry) -> Clip {
    Clip {
        x: geometry.inner_x(),
        y: geometry.inner_y(),
        width: geometry.inner_width(),
        height: geometry.content_rows(),
    }
}

fn draw_frame(canvas: &mut Canvas, geometry: &SheetGeometry) {
    let clip = canvas.full();
    let inner = geometry.inner_width();
    let x = isize::try_from(geometry.x).unwrap_or(isize::MAX);
    let bottom = geometry.y + geometry.height - 1;

    canvas.put_str(x, geometry.y, &format!("╭{}╮", "─".repeat(inner)), CellStyle::Border, clip);
    for y in geometry.y + 1..bottom {
        canvas.put_str(x, y, &format!("│{}│", " ".repeat(inner)), CellStyle::Normal, clip);
        canvas.fill_style(x, y, 1, CellStyle::Border, clip);
        canvas.fill_style(x + isize::try_from(inner + 1).unwrap_or(0), y, 1, CellStyle::Border, clip);
    }
    canvas.put_str(x, bottom, &format!("╰{}╯", "─".repeat(inner)), CellStyle::Border, clip);
}

/// Draws the whole pane for one frame: backdrop, sheet frame, every layer
/// back to front at its slide offset, then the footer.
#[must_use]
pub fn compose(vm: &MenuViewModel, rows: usize, cols: usize) -> Canvas {
    let mut canvas = Canvas::new(cols, rows);
    let full = canvas.full();
    let backdrop = " ".repeat(cols);
    for y in 0..rows {
        canvas.put_str(0, y, &backdrop, CellStyle::Backdrop, full);
    }

    let geometry = SheetGeometry::place(rows, cols, vm.sheet_height);
    if geometry.height < 2 || geometry.width < 2 {
        return canvas;
    }
    draw_frame(&mut canvas, &geometry);

    let clip = content_clip(&geometry);
    let width = geometry.inner_width();
    let origin = isize::try_from(geometry.inner_x()).unwrap_or(0);
    for layer in &vm.layers {
        let lines = level::layout(layer, width);
        let x = origin + column_shift(layer.offset, width);
        level::draw(&mut canvas, &lines, x, geometry.inner_y(), width, layer.opacity < DIM_BELOW, clip);
    }

    draw_footer(&mut canvas, &vm.footer, &geometry);
    canvas
}

/// Maps a 0-based pane cell to what is drawn there.
///
/// Only the interactive layer yields [`HitTarget::Back`] or
/// [`HitTarget::Item`]; layers that are only sliding out never do.
#[must_use]
pub fn hit_test(vm: &MenuViewModel, rows: usize, cols: usize, line: usize, column: usize) -> HitTarget {
    let geometry = SheetGeometry::place(rows, cols, vm.sheet_height);
    if !geometry.contains(line, column) {
        return HitTarget::Outside;
    }

    let clip = content_clip(&geometry);
    let inside_content = line >= clip.y && line < clip.y + clip.height && column >= clip.x && column < clip.x + clip.width;
    let Some(layer) = vm.interactive_layer().filter(|_| inside_content) else {
        return HitTarget::Sheet;
    };

    let lines = level::layout(layer, geometry.inner_width());
    match lines.get(line - clip.y).map(|l| l.target) {
        Some(LineTarget::Back) => HitTarget::Back,
        Some(LineTarget::Item(index)) => HitTarget::Item(index),
        Some(LineTarget::None) | None => HitTarget::Sheet,
    }
}
