//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `MenuState` becomes a [`MenuViewModel`]
//! 2. **Composition**: components draw the view model into a canvas, which
//!    is printed row by row with the active theme
//!
//! Nothing is drawn while the menu is closed.

use crate::app::MenuState;
use crate::ui::components;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MenuViewModel;

/// Renders the plugin UI to stdout.
pub fn render(state: &MenuState, rows: usize, cols: usize) {
    if !state.is_open() {
        return;
    }
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Prints a composed view model, one positioned row at a time.
fn render_viewmodel(vm: &MenuViewModel, theme: &Theme, rows: usize, cols: usize) {
    let canvas = components::compose(vm, rows, cols);
    for y in 0..canvas.height() {
        position_cursor(y + 1, 1);
        print!("{}", canvas.row_ansi(y, theme));
    }
}
