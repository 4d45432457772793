//! TOML menu documents.
//!
//! A menu document is the on-disk description of a menu tree. It is parsed
//! and validated on the worker thread, sent to the plugin as JSON, and turned
//! into [`MenuItem`]s there by binding each leaf command to a host action.
//!
//! # Format
//!
//! ```toml
//! title = "Workspace"
//!
//! [[item]]
//! id = "shell"
//! label = "Shell"
//! icon = "$"
//! run = ["bash"]
//!
//! [[item]]
//! id = "tools"
//! label = "Tools"
//! description = "Monitors and utilities"
//!
//!   [[item.item]]
//!   id = "top"
//!   label = "System monitor"
//!   run = ["htop"]
//!   floating = false
//!
//!   [[item.item]]
//!   id = "main"
//!   label = "Main session"
//!   session = "main"
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ActionBinder;
use crate::domain::{DrillmenuError, Icon, MenuItem, Result};

const fn default_floating() -> bool {
    true
}

/// A parsed menu file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDocument {
    /// Overrides the configured sheet title when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Root level entries.
    #[serde(default, rename = "item")]
    pub items: Vec<MenuEntry>,
}

/// One `[[item]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: String,
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Nested `[[item.item]]` tables.
    #[serde(default, rename = "item", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuEntry>,

    /// Command line to run in a new pane.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<Vec<String>>,

    /// Working directory for `run`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Whether `run` opens a floating pane.
    #[serde(default = "default_floating")]
    pub floating: bool,

    /// Session to switch to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

/// What selecting a leaf does on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafCommand {
    /// Runs a command in a new pane.
    Run {
        argv: Vec<String>,
        cwd: Option<String>,
        floating: bool,
    },

    /// Switches to (or creates) a named session.
    SwitchSession { name: String },
}

impl MenuEntry {
    /// The leaf command this entry carries, if any.
    #[must_use]
    pub fn command(&self) -> Option<LeafCommand> {
        if let Some(argv) = &self.run {
            return Some(LeafCommand::Run { argv: argv.clone(), cwd: self.cwd.clone(), floating: self.floating });
        }
        self.session.as_ref().map(|name| LeafCommand::SwitchSession { name: name.clone() })
    }

    fn into_item(&self, binder: &dyn ActionBinder) -> MenuItem {
        let mut item = MenuItem::new(self.id.clone(), self.label.clone());
        if let Some(description) = &self.description {
            item = item.with_description(description.clone());
        }
        if let Some(icon) = &self.icon {
            item = item.with_icon(Icon::new(icon.clone()));
        }

        if self.children.is_empty() {
            if let Some(command) = self.command() {
                item = item.with_action(binder.bind(&command));
            }
            item
        } else {
            item.with_children(self.children.iter().map(|child| child.into_item(binder)).collect())
        }
    }
}

impl MenuDocument {
    /// Parses and validates a TOML menu document.
    ///
    /// # Errors
    ///
    /// Returns [`DrillmenuError::MenuParse`] on malformed TOML and
    /// [`DrillmenuError::InvalidMenu`] when validation fails.
    pub fn parse(text: &str) -> Result<Self> {
        let document: Self = toml::from_str(text)?;
        for warning in document.validate()? {
            tracing::warn!(warning = %warning, "menu document warning");
        }
        Ok(document)
    }

    /// Checks structural rules and returns non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Fails on an empty id, a duplicate id among siblings, an empty `run`,
    /// or an item carrying both `run` and `session`.
    pub fn validate(&self) -> Result<Vec<String>> {
        let mut warnings = Vec::new();
        validate_level(&self.items, "", &mut warnings)?;
        Ok(warnings)
    }

    /// Builds the runtime tree, binding leaf commands through `binder`.
    #[must_use]
    pub fn into_items(&self, binder: &dyn ActionBinder) -> Vec<MenuItem> {
        self.items.iter().map(|entry| entry.into_item(binder)).collect()
    }

    /// Total number of entries at every depth.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        fn count(entries: &[MenuEntry]) -> usize {
            entries.iter().map(|e| 1 + count(&e.children)).sum()
        }
        count(&self.items)
    }
}

fn validate_level(entries: &[MenuEntry], parent: &str, warnings: &mut Vec<String>) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        let location = format!("{parent}/{}", entry.id);
        if entry.id.trim().is_empty() {
            return Err(DrillmenuError::InvalidMenu(format!("item '{}' under '{parent}/' has an empty id", entry.label)));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(DrillmenuError::InvalidMenu(format!("duplicate id '{location}'")));
        }
        if entry.run.is_some() && entry.session.is_some() {
            return Err(DrillmenuError::InvalidMenu(format!("'{location}' sets both run and session")));
        }
        if entry.run.as_ref().is_some_and(Vec::is_empty) {
            return Err(DrillmenuError::InvalidMenu(format!("'{location}' has an empty run command")));
        }
        if !entry.children.is_empty() && entry.command().is_some() {
            warnings.push(format!("'{location}' has children and a command; the command is ignored"));
        }
        validate_level(&entry.children, &location, warnings)?;
    }
    Ok(())
}
