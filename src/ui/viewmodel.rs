//! View model types representing renderable UI state.
//!
//! View models are computed from `MenuState` by
//! `MenuState::compute_viewmodel()` and consumed by the renderer. They carry
//! display-ready data only: the items of every layer on screen, each layer's
//! slide offset and opacity, the focused row, and the sheet height for this
//! frame.
//!
//! # Example
//!
//! ```rust
//! use drillmenu::app::modes::Direction;
//! use drillmenu::ui::viewmodel::{FooterInfo, Heading, ItemView, LevelView, MenuViewModel};
//!
//! let vm = MenuViewModel {
//!     is_root: true,
//!     direction: Direction::Forward,
//!     layers: vec![LevelView {
//!         heading: Heading::Title("Menu".to_string()),
//!         items: vec![ItemView {
//!             label: "Home".to_string(),
//!             description: None,
//!             icon: None,
//!             has_children: false,
//!             is_focused: true,
//!         }],
//!         offset: 0.0,
//!         opacity: 1.0,
//!         interactive: true,
//!         empty_state: None,
//!     }],
//!     sheet_height: 8,
//!     footer: FooterInfo { keybindings: "Esc: close".to_string(), notice: None },
//! };
//! assert_eq!(vm.interactive_layer().map(|l| l.items.len()), Some(1));
//! ```

use crate::app::modes::Direction;

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuViewModel {
    /// Whether the current level is the root (no back affordance).
    pub is_root: bool,

    /// Direction of the last navigation move.
    pub direction: Direction,

    /// Levels to draw, back to front. The last one is interactive.
    pub layers: Vec<LevelView>,

    /// Sheet height in rows for this frame, borders included.
    pub sheet_height: usize,

    /// Key hints or a load error.
    pub footer: FooterInfo,
}

impl MenuViewModel {
    /// The one layer that accepts focus and clicks.
    #[must_use]
    pub fn interactive_layer(&self) -> Option<&LevelView> {
        self.layers.iter().rev().find(|layer| layer.interactive)
    }
}

/// What sits above a level's items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    /// Root level: the sheet title.
    Title(String),

    /// Nested level: a back affordance and the label of the container entered.
    Back {
        /// Label of the container this level belongs to.
        parent_label: String,
    },
}

/// One menu level as drawn on this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelView {
    pub heading: Heading,
    pub items: Vec<ItemView>,

    /// Horizontal offset as a signed fraction of the content width.
    pub offset: f64,

    /// `0.0` transparent to `1.0` opaque.
    pub opacity: f64,

    /// Whether this level is the current, focusable one.
    pub interactive: bool,

    /// Shown instead of items when the level is empty.
    pub empty_state: Option<EmptyState>,
}

/// Display information for a single menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub label: String,
    pub description: Option<String>,
    pub icon: Option<String>,

    /// Draws a chevron and routes selection to a submenu.
    pub has_children: bool,

    /// Only ever set on the interactive layer.
    pub is_focused: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,

    /// Menu load error, shown in place of the key hints.
    pub notice: Option<String>,
}

/// Empty level message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No menu items").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
