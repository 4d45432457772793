//! Drillmenu: a hierarchical drill-down menu for Zellij.
//!
//! The plugin shows a bottom sheet holding one level of a menu tree at a
//! time:
//! - Containers open their children with a directional slide
//! - Leaves run a command pane or switch session, then close the menu
//! - Escape walks back one level, and closes at the root
//! - Keyboard focus is re-anchored on every level change
//! - Menus come from a TOML file, hot-reloaded on change, or a built-in default

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Navigation path, focus, slide transitions        │
//! │  - Event handling / action dispatching              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Source Layer  │   │ Worker Layer  │
//! │ (ui/)         │   │ (source/)     │   │ (worker/)     │
//! │ - Sheet       │   │ - TOML menus  │   │ - Menu load   │
//! │ - Canvas      │   │ - Validation  │   │ - IPC bridge  │
//! │ - Theming     │   │ - Binding     │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Menu tree, paths, errors (domain/)               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, OTLP JSON file export     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! plugin location="file:/path/to/drillmenu.wasm" {
//!     menu_file "~/.config/zellij/menu.toml"
//!     title "Launch"
//!     theme "catppuccin-mocha"
//!     focus_restore "parent"
//!     trace_level "debug"
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use drillmenu::source::{LoggingBinder, MenuDocument};
//! use drillmenu::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default(), Arc::new(LoggingBinder));
//! state.install_menu(&MenuDocument::parse("[[item]]\nid = \"a\"\nlabel = \"A\"\nrun = [\"true\"]\n")?);
//!
//! handle_event(&mut state, &Event::Open)?;
//! let (_, actions) = handle_event(&mut state, &Event::ActivateFocused)?;
//! assert_eq!(actions, vec![Action::RequestClose]);
//! # Ok::<(), drillmenu::DrillmenuError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod source;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, FocusRestorePolicy, MenuState};
pub use domain::{DrillmenuError, Result};
pub use ui::Theme;

use source::ActionBinder;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Root-level title when neither the config nor the menu file sets one.
pub const DEFAULT_TITLE: &str = "Menu";

/// Plugin configuration parsed from Zellij's KDL plugin block.
#[derive(Debug, Clone)]
pub struct Config {
    /// TOML menu file, already mapped into the sandbox. `None` uses the
    /// built-in menu.
    pub menu_file: Option<String>,

    /// Title of the root level. A `title` in the menu file takes precedence.
    pub title: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// Which item regains focus after going back a level.
    pub focus_restore: FocusRestorePolicy,

    /// Tracing filter directive. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            menu_file: None,
            title: DEFAULT_TITLE.to_string(),
            theme_name: None,
            theme_file: None,
            focus_restore: FocusRestorePolicy::default(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Empty values count as absent. An unknown `focus_restore` falls back to
    /// the default policy.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use drillmenu::{Config, FocusRestorePolicy};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("menu_file".to_string(), "~/menu.toml".to_string());
    /// map.insert("focus_restore".to_string(), "parent".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.menu_file.as_deref(), Some("/host/menu.toml"));
    /// assert_eq!(config.focus_restore, FocusRestorePolicy::ReturnToParent);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| config.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let focus_restore = get("focus_restore").map_or_else(FocusRestorePolicy::default, |raw| {
            raw.parse().unwrap_or_else(|e: DrillmenuError| {
                tracing::debug!(error = %e, "invalid focus_restore, using default");
                FocusRestorePolicy::default()
            })
        });

        Self {
            menu_file: get("menu_file").map(infrastructure::expand_tilde),
            title: get("title").map_or_else(|| DEFAULT_TITLE.to_string(), String::from),
            theme_name: get("theme").map(String::from),
            theme_file: get("theme_file").map(infrastructure::expand_tilde),
            focus_restore,
            trace_level: get("trace_level").map(String::from),
        }
    }
}

/// Creates the closed, not-yet-loaded menu state for `config`.
///
/// The theme comes from `theme_file`, then `theme`, then the default; a
/// theme that fails to load falls back to the default. Menu items arrive
/// later from the worker.
pub fn initialize(config: &Config, binder: Arc<dyn ActionBinder>) -> MenuState {
    tracing::debug!("initializing drillmenu plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    MenuState::new(theme, binder, config.focus_restore, config.title.clone(), config.menu_file.clone())
}
