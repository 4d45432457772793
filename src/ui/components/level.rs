//! Menu level layout and drawing.
//!
//! A level is laid out once into [`LevelLine`]s: heading, separator, then one
//! or two lines per item (label, optional description). The same lines are
//! used to draw the level and to map clicks back to items.

use super::empty::empty_lines;
use super::header::heading_lines;
use crate::ui::canvas::{Canvas, CellStyle, Clip};
use crate::ui::helpers::{dimmed, text_len, truncate};
use crate::ui::viewmodel::{ItemView, LevelView};

/// Submenu marker drawn at the right edge of container rows.
pub const CHEVRON: &str = "›";

/// What a click on a line does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTarget {
    None,
    Back,
    Item(usize),
}

/// A run of styled text at a column within the level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub col: usize,
    pub text: String,
    pub style: CellStyle,
}

/// One laid-out row of a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLine {
    pub target: LineTarget,

    /// Style of the blank cells around the spans.
    pub fill: CellStyle,

    pub spans: Vec<Span>,
}

/// Lays out `level` for a content area `width` columns wide.
#[must_use]
pub fn layout(level: &LevelView, width: usize) -> Vec<LevelLine> {
    let mut lines = heading_lines(&level.heading, width);

    match &level.empty_state {
        Some(empty) if level.items.is_empty() => lines.extend(empty_lines(empty, width)),
        _ => {
            for (index, item) in level.items.iter().enumerate() {
                lines.extend(item_lines(index, item, width));
            }
        }
    }

    lines
}

fn item_lines(index: usize, item: &ItemView, width: usize) -> Vec<LevelLine> {
    let target = LineTarget::Item(index);
    let (fill, label_style, chevron_style, desc_style) = if item.is_focused {
        (CellStyle::Focused, CellStyle::Focused, CellStyle::Focused, CellStyle::FocusedDim)
    } else {
        (CellStyle::Normal, CellStyle::Normal, CellStyle::Chevron, CellStyle::Dim)
    };

    let mut spans = Vec::new();
    let mut col = 1;
    if let Some(icon) = &item.icon {
        spans.push(Span { col, text: icon.clone(), style: label_style });
        col += text_len(icon) + 1;
    }
    let text_col = col;

    // Leave room for " ›" plus one trailing cell.
    let reserved = if item.has_children { text_len(CHEVRON) + 2 } else { 1 };
    let label = truncate(&item.label, width.saturating_sub(text_col + reserved));
    spans.push(Span { col: text_col, text: label, style: label_style });

    if item.has_children {
        let chevron_col = width.saturating_sub(text_len(CHEVRON) + 1);
        spans.push(Span { col: chevron_col, text: CHEVRON.to_string(), style: chevron_style });
    }

    let mut lines = vec![LevelLine { target, fill, spans }];

    if let Some(description) = &item.description {
        let text = truncate(description, width.saturating_sub(text_col + 1));
        lines.push(LevelLine {
            target,
            fill: if item.is_focused { CellStyle::FocusedDim } else { CellStyle::Normal },
            spans: vec![Span { col: text_col, text, style: desc_style }],
        });
    }

    lines
}

/// Draws laid-out `lines` with their left edge at column `x`.
///
/// Fill cells span `width` columns from `x`. Everything is clipped to `clip`,
/// and `dim` swaps each style for its faded counterpart.
pub fn draw(canvas: &mut Canvas, lines: &[LevelLine], x: isize, y: usize, width: usize, dim: bool, clip: Clip) {
    let style_of = |style: CellStyle| if dim { dimmed(style) } else { style };
    let blank = " ".repeat(width);

    for (row, line) in lines.iter().enumerate() {
        let line_y = y + row;
        canvas.put_str(x, line_y, &blank, style_of(line.fill), clip);
        for span in &line.spans {
            let Ok(col) = isize::try_from(span.col) else {
                continue;
            };
            canvas.put_str(x + col, line_y, &span.text, style_of(span.style), clip);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{EmptyState, Heading};

    fn item(label: &str, description: Option<&str>, has_children: bool, is_focused: bool) -> ItemView {
        ItemView {
            label: label.to_string(),
            description: description.map(str::to_string),
            icon: None,
            has_children,
            is_focused,
        }
    }

    fn level(items: Vec<ItemView>) -> LevelView {
        LevelView {
            heading: Heading::Title("Menu".into()),
            items,
            offset: 0.0,
            opacity: 1.0,
            interactive: true,
            empty_state: None,
        }
    }

    #[test]
    fn descriptions_add_a_second_line_for_the_same_item() {
        let lines = layout(&level(vec![item("Home", None, false, false), item("Tools", Some("Utilities"), true, false)]), 30);
        let targets: Vec<LineTarget> = lines.iter().map(|l| l.target).collect();
        assert_eq!(
            targets,
            vec![LineTarget::None, LineTarget::None, LineTarget::Item(0), LineTarget::Item(1), LineTarget::Item(1)]
        );
    }

    #[test]
    fn containers_get_a_chevron_at_the_right_edge() {
        let lines = layout(&level(vec![item("Tools", None, true, false)]), 30);
        let chevron = lines[2].spans.last().map(|s| (s.col, s.text.clone()));
        assert_eq!(chevron, Some((28, CHEVRON.to_string())));
    }

    #[test]
    fn focused_item_is_highlighted_across_the_row() {
        let mut canvas = Canvas::new(20, 4);
        let clip = canvas.full();
        let lines = layout(&level(vec![item("Home", None, false, true)]), 20);
        draw(&mut canvas, &lines, 0, 0, 20, false, clip);

        assert_eq!(canvas.row_text(2).trim(), "Home");
        assert_eq!(canvas.style_at(19, 2), CellStyle::Focused);
    }

    #[test]
    fn empty_level_shows_the_empty_state() {
        let mut view = level(vec![]);
        view.empty_state = Some(EmptyState { message: "No menu items".into(), subtitle: String::new() });
        assert_eq!(layout(&view, 30).len(), 4);
    }

    #[test]
    fn dim_layers_use_faded_styles() {
        let mut canvas = Canvas::new(20, 4);
        let clip = canvas.full();
        let lines = layout(&level(vec![item("Home", None, false, false)]), 20);
        draw(&mut canvas, &lines, 0, 0, 20, true, clip);
        assert_eq!(canvas.style_at(1, 2), CellStyle::Dim);
    }
}
