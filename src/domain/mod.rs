//! Domain layer for the drillmenu plugin.
//!
//! Holds the menu tree model, navigation paths, and error types. Nothing in
//! this layer depends on Zellij APIs or on rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`menu`]: Menu items, leaf actions, icons
//! - [`path`]: Navigation paths and the pure level resolver
//!
//! # Examples
//!
//! ```
//! use drillmenu::domain::{resolve_level, MenuItem, NavigationPath};
//!
//! let root = vec![MenuItem::new("a", "A").with_children(vec![MenuItem::new("a1", "A1")])];
//! let path: NavigationPath = ["a"].into_iter().collect();
//! assert_eq!(resolve_level(&root, &path).map(<[MenuItem]>::len), Some(1));
//! ```

pub mod error;
pub mod menu;
pub mod path;

pub use error::{DrillmenuError, NavigationError, Result};
pub use menu::{find_item, Icon, ItemAction, ItemKind, MenuItem};
pub use path::{resolve_container, resolve_level, NavigationPath};
