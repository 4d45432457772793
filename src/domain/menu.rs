//! Menu tree model.
//!
//! A menu is a caller-owned, read-only tree of [`MenuItem`] values. Items are
//! either containers (non-empty `children`), leaves carrying an
//! [`ItemAction`], or inert leaves with neither. The tree is never mutated by
//! the plugin and holds no back-references: every lookup walks top-down from
//! the root list.

use std::fmt;
use std::sync::Arc;

/// Zero-argument callback attached to a leaf item.
///
/// Cloning an `ItemAction` shares the same underlying closure. Two actions
/// compare equal only when they point at the same closure.
#[derive(Clone)]
pub struct ItemAction(Arc<dyn Fn() + Send + Sync>);

impl ItemAction {
    /// Wraps a closure as a leaf action.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Runs the action synchronously.
    pub fn invoke(&self) {
        (self.0)();
    }
}

impl fmt::Debug for ItemAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ItemAction(..)")
    }
}

impl PartialEq for ItemAction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Opaque visual reference drawn before an item's label.
///
/// In the terminal this is a short glyph (an emoji or a Nerd Font codepoint).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon(String);

impl Icon {
    #[must_use]
    pub fn new(glyph: impl Into<String>) -> Self {
        Self(glyph.into())
    }

    #[must_use]
    pub fn glyph(&self) -> &str {
        &self.0
    }
}

/// How selecting an item is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Has children; selecting it descends. Wins over any action it also carries.
    Container,
    /// Has an action and no children; selecting it runs the action and closes the menu.
    Leaf,
    /// Has neither children nor an action; selecting it does nothing.
    Inert,
}

/// A single entry in the menu tree.
///
/// # Example
///
/// ```rust
/// use drillmenu::domain::{ItemAction, ItemKind, MenuItem};
///
/// let tree = MenuItem::new("tools", "Tools").with_children(vec![
///     MenuItem::new("top", "System monitor").with_action(ItemAction::new(|| {})),
/// ]);
/// assert_eq!(tree.kind(), ItemKind::Container);
/// assert_eq!(tree.children[0].kind(), ItemKind::Leaf);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    /// Identifier, unique among siblings only.
    pub id: String,

    /// Primary text.
    pub label: String,

    /// Secondary text drawn dimmed under the label.
    pub description: Option<String>,

    /// Glyph drawn before the label.
    pub icon: Option<Icon>,

    /// Ordered submenu; non-empty makes this item a container.
    pub children: Vec<MenuItem>,

    /// Callback fired when a leaf is selected.
    pub action: Option<ItemAction>,
}

impl MenuItem {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            icon: None,
            children: Vec::new(),
            action: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: ItemAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }

    /// Classifies the item for selection routing.
    ///
    /// Container routing takes precedence when an item carries both children
    /// and an action.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        if self.is_container() {
            ItemKind::Container
        } else if self.action.is_some() {
            ItemKind::Leaf
        } else {
            ItemKind::Inert
        }
    }
}

/// Finds a sibling by id within one level.
#[must_use]
pub fn find_item<'a>(level: &'a [MenuItem], id: &str) -> Option<&'a MenuItem> {
    level.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn container_wins_over_action() {
        let item = MenuItem::new("both", "Both")
            .with_children(vec![MenuItem::new("c", "Child")])
            .with_action(ItemAction::new(|| {}));
        assert_eq!(item.kind(), ItemKind::Container);
    }

    #[test]
    fn empty_children_is_not_a_container() {
        let item = MenuItem::new("x", "X").with_children(vec![]);
        assert!(!item.is_container());
        assert_eq!(item.kind(), ItemKind::Inert);
    }

    #[test]
    fn cloned_action_shares_closure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let action = ItemAction::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let copy = action.clone();

        action.invoke();
        copy.invoke();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(action, copy);
        assert_ne!(action, ItemAction::new(|| {}));
    }

    #[test]
    fn find_item_matches_siblings_only() {
        let level = vec![
            MenuItem::new("a", "A").with_children(vec![MenuItem::new("b", "B")]),
            MenuItem::new("c", "C"),
        ];
        assert_eq!(find_item(&level, "c").map(|i| i.label.as_str()), Some("C"));
        assert!(find_item(&level, "b").is_none());
    }
}
