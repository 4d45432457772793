//! Error types for the drillmenu plugin.
//!
//! This module defines the crate-level error type [`DrillmenuError`], the
//! narrower [`NavigationError`] raised by the navigation state machine, and a
//! [`Result`] alias. All errors are implemented with `thiserror`.
//!
//! Navigation errors are never fatal: the state machine leaves its state
//! unchanged and the handler logs them as data-integrity warnings.

use thiserror::Error;

/// Rejections produced by the navigation state machine.
///
/// Both variants leave the navigation state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// `descend` was asked for an id that is not a container in the visible level.
    #[error("'{id}' is not a submenu of the current level")]
    InvalidTarget {
        /// The id that failed to resolve.
        id: String,
    },

    /// `ascend` was called while already at the root level.
    ///
    /// Callers route this case to closing the menu instead.
    #[error("already at the root level")]
    AscendAtRoot,
}

/// The main error type for drillmenu operations.
///
/// # Examples
///
/// ```
/// use drillmenu::domain::DrillmenuError;
///
/// fn validate() -> Result<(), DrillmenuError> {
///     Err(DrillmenuError::InvalidMenu("duplicate id 'a'".to_string()))
/// }
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum DrillmenuError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from reading menu or theme files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The menu document is not valid TOML or does not match the schema.
    #[error("Menu parse error: {0}")]
    MenuParse(#[from] toml::de::Error),

    /// The menu document parsed but violates a structural rule.
    ///
    /// Raised for empty ids, duplicate sibling ids, or conflicting leaf commands.
    #[error("Invalid menu: {0}")]
    InvalidMenu(String),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A navigation command was rejected.
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),
}

/// A specialized `Result` type for drillmenu operations.
pub type Result<T> = std::result::Result<T, DrillmenuError>;
