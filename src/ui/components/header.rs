//! Level heading renderer.
//!
//! The root level shows the sheet title, centered. Nested levels show a back
//! affordance on the left and the label of the container being browsed.

use super::level::{LevelLine, LineTarget, Span};
use crate::ui::canvas::CellStyle;
use crate::ui::helpers::{centered_col, text_len, truncate};
use crate::ui::viewmodel::Heading;

/// Text of the back affordance.
pub const BACK_LABEL: &str = "‹ Back";

/// Lays out the heading line and the separator below it.
///
/// # Example
///
/// ```rust
/// use drillmenu::ui::components::header::heading_lines;
/// use drillmenu::ui::viewmodel::Heading;
///
/// let lines = heading_lines(&Heading::Back { parent_label: "Tools".into() }, 40);
/// assert_eq!(lines.len(), 2);
/// ```
#[must_use]
pub fn heading_lines(heading: &Heading, width: usize) -> Vec<LevelLine> {
    let heading_line = match heading {
        Heading::Title(title) => {
            let title = truncate(title, width);
            LevelLine {
                target: LineTarget::None,
                fill: CellStyle::Title,
                spans: vec![Span { col: centered_col(text_len(&title), width), text: title, style: CellStyle::Title }],
            }
        }
        Heading::Back { parent_label } => {
            let back = Span { col: 1, text: BACK_LABEL.to_string(), style: CellStyle::Back };
            let taken = 1 + text_len(BACK_LABEL) + 2;
            let label = truncate(parent_label, width.saturating_sub(2 * taken));
            let col = centered_col(text_len(&label), width).max(taken);
            LevelLine {
                target: LineTarget::Back,
                fill: CellStyle::Normal,
                spans: vec![back, Span { col, text: label, style: CellStyle::Title }],
            }
        }
    };

    let separator = LevelLine {
        target: LineTarget::None,
        fill: CellStyle::Border,
        spans: vec![Span { col: 0, text: "─".repeat(width), style: CellStyle::Border }],
    };

    vec![heading_line, separator]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_heading_is_centered_title() {
        let lines = heading_lines(&Heading::Title("Menu".into()), 20);
        assert_eq!(lines[0].target, LineTarget::None);
        assert_eq!(lines[0].spans[0].col, 8);
        assert_eq!(lines[0].spans[0].text, "Menu");
    }

    #[test]
    fn nested_heading_is_a_back_target() {
        let lines = heading_lines(&Heading::Back { parent_label: "Settings".into() }, 40);
        assert_eq!(lines[0].target, LineTarget::Back);
        assert_eq!(lines[0].spans[0].text, BACK_LABEL);
        assert_eq!(lines[0].spans[1].text, "Settings");
        assert!(lines[0].spans[1].col >= text_len(BACK_LABEL) + 1);
    }
}
