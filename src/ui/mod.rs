//! User interface rendering layer with component-based architecture.
//!
//! This module turns menu state into the bottom sheet drawn in the plugin
//! pane: levels sliding horizontally inside a bordered box whose height eases
//! to fit the current level.
//!
//! # Architecture
//!
//! ```text
//! MenuState → compute_viewmodel → MenuViewModel → compose → Canvas → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers and hit testing
//! - [`canvas`]: Styled character grid the components draw into
//! - [`sheet`]: Sheet placement and height tween
//! - [`helpers`]: Shared rendering utilities
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod canvas;
pub mod components;
pub mod helpers;
pub mod renderer;
pub mod sheet;
pub mod theme;
pub mod viewmodel;

pub use components::HitTarget;
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{EmptyState, FooterInfo, Heading, ItemView, LevelView, MenuViewModel};
