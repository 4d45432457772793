//! Navigation state machine.
//!
//! [`NavigationState`] tracks where the user is in the menu tree as a
//! [`NavigationPath`] plus the [`Direction`] of the last move. The visible
//! level is never cached: [`NavigationState::resolve_visible_level`] walks the
//! path against the live tree on every call and falls back to the root level
//! when the path no longer resolves.
//!
//! Every successful move returns a [`Step`] describing the
//! `(from, to, direction)` triple the transition controller animates.

use super::modes::Direction;
use crate::domain::{find_item, resolve_level, MenuItem, NavigationError, NavigationPath};

/// One navigation move: the level left, the level entered, and which way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub from: NavigationPath,
    pub to: NavigationPath,
    pub direction: Direction,
}

/// The level currently implied by the navigation path.
#[derive(Debug, Clone, Copy)]
pub struct VisibleLevel<'a> {
    /// Items of the level, in order.
    pub items: &'a [MenuItem],

    /// `true` when the path failed to resolve and the root level was substituted.
    pub stale: bool,
}

/// Location in the menu tree plus the direction of the last move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    path: NavigationPath,
    direction: Direction,
}

impl NavigationState {
    /// Creates a state at the root level, direction `Forward`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn path(&self) -> &NavigationPath {
        &self.path
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path.is_root()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    /// Moves one level deeper into the container `item_id`.
    ///
    /// The id must name a container in the current visible level. When the
    /// current path is stale the visible level is the root list, so the path
    /// is rebuilt from the root before appending.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::InvalidTarget`] and leaves the state
    /// unchanged when the id is absent or names a non-container.
    pub fn descend(&mut self, root: &[MenuItem], item_id: &str) -> Result<Step, NavigationError> {
        let _span = tracing::debug_span!("descend", path = %self.path, item_id = %item_id).entered();

        let visible = self.resolve_visible_level(root);
        if find_item(visible.items, item_id).filter(|item| item.is_container()).is_none() {
            return Err(NavigationError::InvalidTarget { id: item_id.to_string() });
        }

        let from = self.path.clone();
        if visible.stale {
            self.path = NavigationPath::root();
        }
        self.path.push(item_id);
        self.direction = Direction::Forward;

        tracing::debug!(to = %self.path, "descended");
        Ok(Step { from, to: self.path.clone(), direction: Direction::Forward })
    }

    /// Moves one level shallower.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::AscendAtRoot`] and leaves the state
    /// unchanged when already at the root.
    pub fn ascend(&mut self) -> Result<Step, NavigationError> {
        let from = self.path.clone();
        if self.path.pop().is_none() {
            return Err(NavigationError::AscendAtRoot);
        }
        self.direction = Direction::Backward;

        tracing::debug!(from = %from, to = %self.path, "ascended");
        Ok(Step { from, to: self.path.clone(), direction: Direction::Backward })
    }

    /// Returns to the root level with direction `Forward`, unconditionally.
    pub fn reset(&mut self) -> Step {
        let from = std::mem::take(&mut self.path);
        self.direction = Direction::Forward;
        Step { from, to: NavigationPath::root(), direction: Direction::Forward }
    }

    /// Resolves the items of the current level against `root`.
    ///
    /// A path that no longer resolves (the tree changed underneath it) yields
    /// the root level with `stale` set; it never yields an undefined level.
    #[must_use]
    pub fn resolve_visible_level<'a>(&self, root: &'a [MenuItem]) -> VisibleLevel<'a> {
        resolve_level(root, &self.path).map_or_else(
            || {
                tracing::warn!(path = %self.path, "stale navigation path, falling back to root level");
                VisibleLevel { items: root, stale: true }
            },
            |items| VisibleLevel { items, stale: false },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<MenuItem> {
        vec![
            MenuItem::new("a", "A").with_children(vec![
                MenuItem::new("a1", "A1"),
                MenuItem::new("a2", "A2").with_children(vec![
                    MenuItem::new("x", "X"),
                    MenuItem::new("y", "Y"),
                ]),
            ]),
            MenuItem::new("b", "B"),
        ]
    }

    fn labels(level: &VisibleLevel<'_>) -> Vec<String> {
        level.items.iter().map(|i| i.label.clone()).collect()
    }

    #[test]
    fn starts_at_root_forward() {
        let nav = NavigationState::new();
        assert!(nav.is_root());
        assert_eq!(nav.direction(), Direction::Forward);
        assert_eq!(labels(&nav.resolve_visible_level(&tree())), vec!["A", "B"]);
    }

    #[test]
    fn replayed_path_shows_children_of_last_segment() {
        let root = tree();
        let mut nav = NavigationState::new();
        nav.descend(&root, "a").unwrap_or_else(|e| panic!("{e}"));
        nav.descend(&root, "a2").unwrap_or_else(|e| panic!("{e}"));

        let level = nav.resolve_visible_level(&root);
        assert!(!level.stale);
        assert_eq!(labels(&level), vec!["X", "Y"]);
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.direction(), Direction::Forward);
    }

    #[test]
    fn descend_into_leaf_is_rejected_without_change() {
        let root = tree();
        let mut nav = NavigationState::new();
        let before = nav.clone();

        assert_eq!(
            nav.descend(&root, "b"),
            Err(NavigationError::InvalidTarget { id: "b".into() })
        );
        assert_eq!(
            nav.descend(&root, "a1"),
            Err(NavigationError::InvalidTarget { id: "a1".into() })
        );
        assert_eq!(nav, before);
    }

    #[test]
    fn ascend_then_descend_round_trips() {
        let root = tree();
        let mut nav = NavigationState::new();
        nav.descend(&root, "a").ok();
        nav.descend(&root, "a2").ok();
        let before = labels(&nav.resolve_visible_level(&root));

        let step = nav.ascend().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(step.direction, Direction::Backward);
        let removed = step.from.last().unwrap_or_default().to_string();
        nav.descend(&root, &removed).ok();

        assert_eq!(labels(&nav.resolve_visible_level(&root)), before);
    }

    #[test]
    fn ascending_depth_times_reaches_root_then_noops() {
        let root = tree();
        let mut nav = NavigationState::new();
        nav.descend(&root, "a").ok();
        nav.descend(&root, "a2").ok();

        for _ in 0..nav.depth() {
            assert!(nav.ascend().is_ok());
        }
        assert!(nav.is_root());
        assert_eq!(nav.ascend(), Err(NavigationError::AscendAtRoot));
        assert!(nav.is_root());
        assert_eq!(nav.direction(), Direction::Backward);
    }

    #[test]
    fn reset_always_returns_to_root_forward() {
        let root = tree();
        let mut nav = NavigationState::new();
        nav.descend(&root, "a").ok();
        nav.ascend().ok();
        nav.descend(&root, "a").ok();

        let step = nav.reset();
        assert_eq!(step.from.segments(), ["a".to_string()]);
        assert!(nav.is_root());
        assert_eq!(nav.direction(), Direction::Forward);
    }

    #[test]
    fn stale_path_falls_back_to_root() {
        let mut nav = NavigationState::new();
        nav.descend(&tree(), "a").ok();

        let swapped = vec![MenuItem::new("z", "Z").with_children(vec![MenuItem::new("z1", "Z1")])];
        let level = nav.resolve_visible_level(&swapped);
        assert!(level.stale);
        assert_eq!(labels(&level), vec!["Z"]);

        let step = nav.descend(&swapped, "z").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(step.to.segments(), ["z".to_string()]);
        assert_eq!(labels(&nav.resolve_visible_level(&swapped)), vec!["Z1"]);
    }
}
