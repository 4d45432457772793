//! Menu data sources.
//!
//! A [`MenuSource`] produces a validated [`MenuDocument`]. Sources run on the
//! worker thread, so they only deal in plain data; turning leaf commands into
//! callable actions happens on the plugin thread through an [`ActionBinder`].
//!
//! - [`TomlFileSource`]: a menu file on the host filesystem
//! - [`BuiltinSource`]: the default menu compiled into the plugin

pub mod document;

pub use document::{LeafCommand, MenuDocument, MenuEntry};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{ItemAction, Result};
use crate::infrastructure::expand_tilde;

const BUILTIN_MENU: &str = include_str!("../../menus/default.toml");

/// Produces a menu document.
pub trait MenuSource {
    /// Human-readable description of where the menu comes from.
    fn origin(&self) -> String;

    /// Reads, parses and validates the menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu cannot be read, parsed or validated.
    fn load(&self) -> Result<MenuDocument>;
}

/// Turns leaf commands into actions the menu can invoke.
///
/// The plugin shim implements this with host calls; tests implement it with
/// counters.
pub trait ActionBinder: Send + Sync + fmt::Debug {
    fn bind(&self, command: &LeafCommand) -> ItemAction;
}

/// Binder that logs commands instead of running them.
///
/// Used when no host is available, such as in library use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingBinder;

impl ActionBinder for LoggingBinder {
    fn bind(&self, command: &LeafCommand) -> ItemAction {
        let command = command.clone();
        ItemAction::new(move || tracing::info!(command = ?command, "leaf selected"))
    }
}

/// A TOML menu file.
#[derive(Debug, Clone)]
pub struct TomlFileSource {
    path: PathBuf,
}

impl TomlFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MenuSource for TomlFileSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<MenuDocument> {
        let _span = tracing::debug_span!("load_menu_file", path = %self.path.display()).entered();
        let text = fs::read_to_string(&self.path)?;
        let document = MenuDocument::parse(&text)?;
        tracing::debug!(entries = document.entry_count(), "menu file loaded");
        Ok(document)
    }
}

/// The default menu embedded in the plugin binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSource;

impl MenuSource for BuiltinSource {
    fn origin(&self) -> String {
        "built-in menu".to_string()
    }

    fn load(&self) -> Result<MenuDocument> {
        MenuDocument::parse(BUILTIN_MENU)
    }
}

/// Picks the source for a configured `menu_file`, or the built-in menu.
///
/// Tilde paths are mapped into the sandbox.
#[must_use]
pub fn source_for(menu_file: Option<&str>) -> Box<dyn MenuSource> {
    match menu_file.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => Box::new(TomlFileSource::new(expand_tilde(path))),
        None => Box::new(BuiltinSource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DrillmenuError;

    #[test]
    fn builtin_menu_is_valid_and_nested() {
        let document = BuiltinSource.load().expect("built-in menu parses");
        assert!(document.title.is_none());
        assert!(document.items.iter().any(|e| !e.children.is_empty()));
        assert_eq!(document.validate().map(|w| w.len()).ok(), Some(0));
    }

    #[test]
    fn file_source_reads_toml_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("menu.toml");
        fs::write(&path, "title = \"Ops\"\n[[item]]\nid = \"a\"\nlabel = \"A\"\n").expect("write menu");

        let source = TomlFileSource::new(&path);
        let document = source.load().expect("menu loads");
        assert_eq!(document.title.as_deref(), Some("Ops"));
        assert_eq!(source.origin(), path.display().to_string());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = TomlFileSource::new(dir.path().join("nope.toml"));
        assert!(matches!(source.load(), Err(DrillmenuError::Io(_))));
    }

    #[test]
    fn source_selection_follows_config() {
        assert_eq!(source_for(None).origin(), "built-in menu");
        assert_eq!(source_for(Some("  ")).origin(), "built-in menu");
        assert_eq!(source_for(Some("~/menu.toml")).origin(), "/host/menu.toml");
    }
}
