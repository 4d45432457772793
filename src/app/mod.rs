//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the domain, source and
//! worker layers.
//!
//! ```text
//! Key / Mouse / Timer → Events → handle_event → MenuState mutations → Actions → Side effects
//!                                    ↑                                     ↓
//!                                    └────────── Worker responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`focus`]: Keyboard focus within the visible level
//! - [`handler`]: Event processing and state transitions
//! - [`keys`]: Key bindings
//! - [`modes`]: Navigation direction and focus restore policy
//! - [`navigation`]: Path stack, descend/ascend, stale-path recovery
//! - [`state`]: The menu state container and view model computation
//! - [`transition`]: Slide animation between levels
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use drillmenu::app::{handle_event, Event, MenuState};
//! use drillmenu::app::modes::FocusRestorePolicy;
//! use drillmenu::source::LoggingBinder;
//! use drillmenu::ui::Theme;
//!
//! let mut state = MenuState::new(Theme::default(), Arc::new(LoggingBinder), FocusRestorePolicy::default(), "Menu", None);
//! let (render, _actions) = handle_event(&mut state, &Event::Open)?;
//! assert!(render);
//! # Ok::<(), drillmenu::DrillmenuError>(())
//! ```

pub mod actions;
pub mod focus;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod navigation;
pub mod state;
pub mod transition;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use keys::map_key;
pub use modes::{Direction, FocusRestorePolicy};
pub use state::MenuState;
