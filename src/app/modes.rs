//! Small state-machine enums shared across the application layer.
//!
//! - [`Direction`]: which way the most recent navigation move went
//! - [`FocusRestorePolicy`]: where focus lands after a backward move
//!
//! # Example
//!
//! ```rust
//! use drillmenu::app::modes::{Direction, FocusRestorePolicy};
//!
//! assert_eq!(Direction::default(), Direction::Forward);
//! assert_eq!("parent".parse::<FocusRestorePolicy>().ok(), Some(FocusRestorePolicy::ReturnToParent));
//! ```

use std::str::FromStr;

use crate::domain::DrillmenuError;

/// Travel direction of the most recent navigation move.
///
/// Drives the slide transition only; it says nothing about depth beyond the
/// single last step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// The last move went one level deeper (or the menu was just opened).
    #[default]
    Forward,

    /// The last move went one level shallower.
    Backward,
}

/// Which item regains focus after navigating backward.
///
/// Forward moves and opens always focus the first item of the new level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusRestorePolicy {
    /// Focus the first item of the restored level.
    #[default]
    FirstItem,

    /// Focus the container item that led into the level being left.
    ReturnToParent,
}

impl FromStr for FocusRestorePolicy {
    type Err = DrillmenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first" | "first_item" => Ok(Self::FirstItem),
            "parent" | "return_to_parent" => Ok(Self::ReturnToParent),
            other => Err(DrillmenuError::Config(format!("unknown focus_restore policy: {other}"))),
        }
    }
}
