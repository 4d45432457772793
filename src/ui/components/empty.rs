//! Empty state component renderer.
//!
//! Lays out the two-line message shown in place of items when a level has
//! nothing to offer.

use super::level::{LevelLine, LineTarget, Span};
use crate::ui::canvas::CellStyle;
use crate::ui::helpers::{centered_col, text_len, truncate};
use crate::ui::viewmodel::EmptyState;

/// Lays out the message and subtitle, both centered.
#[must_use]
pub fn empty_lines(empty: &EmptyState, width: usize) -> Vec<LevelLine> {
    [(&empty.message, CellStyle::Empty), (&empty.subtitle, CellStyle::Dim)]
        .into_iter()
        .map(|(text, style)| {
            let text = truncate(text, width);
            LevelLine {
                target: LineTarget::None,
                fill: CellStyle::Normal,
                spans: vec![Span { col: centered_col(text_len(&text), width), text, style }],
            }
        })
        .collect()
}
