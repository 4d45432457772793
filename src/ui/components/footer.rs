//! Footer component renderer.
//!
//! Draws the keybinding hints centered on the last content row of the sheet,
//! or the menu load notice in their place.

use crate::ui::canvas::{Canvas, CellStyle, Clip};
use crate::ui::helpers::{centered_col, text_len, truncate};
use crate::ui::sheet::SheetGeometry;
use crate::ui::viewmodel::FooterInfo;

/// Draws the footer line of `geometry`.
pub fn draw_footer(canvas: &mut Canvas, footer: &FooterInfo, geometry: &SheetGeometry) {
    if geometry.height < 3 {
        return;
    }

    let (text, style) = footer
        .notice
        .as_deref()
        .map_or((footer.keybindings.as_str(), CellStyle::Dim), |notice| (notice, CellStyle::Notice));

    let width = geometry.inner_width();
    let text = truncate(text, width);
    let y = geometry.footer_y();
    let clip = Clip { x: geometry.inner_x(), y, width, height: 1 };
    let x = geometry.inner_x() + centered_col(text_len(&text), width);
    canvas.put_str(isize::try_from(x).unwrap_or(isize::MAX), y, &text, style, clip);
}
