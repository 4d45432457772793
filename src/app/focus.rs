//! Keyboard focus management for the current menu level.
//!
//! Focus is a single index into the list of interactive items the rendering
//! layer exposes through [`InteractiveItems`]. Movement clamps at both ends;
//! there is no wraparound. Items of levels that are only mounted for a
//! transition are never part of that list, so they can never take focus.

use super::modes::{Direction, FocusRestorePolicy};
use super::navigation::VisibleLevel;

/// A handle on one focusable menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusableRef {
    /// Position within the current level.
    pub index: usize,

    /// Item id, unique among its siblings.
    pub id: String,
}

/// Capability exposed by whatever renders the current level.
pub trait InteractiveItems {
    /// Ordered items that currently carry the menu-item role.
    fn list_interactive_items(&self) -> Vec<FocusableRef>;
}

impl InteractiveItems for VisibleLevel<'_> {
    fn list_interactive_items(&self) -> Vec<FocusableRef> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| FocusableRef { index, id: item.id.clone() })
            .collect()
    }
}

/// A relative or absolute focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    Next,
    Previous,
    First,
    Last,
}

/// Tracks the focused item of the current level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusManager {
    focused: Option<usize>,
    policy: FocusRestorePolicy,
}

impl FocusManager {
    #[must_use]
    pub const fn new(policy: FocusRestorePolicy) -> Self {
        Self { focused: None, policy }
    }

    #[must_use]
    pub const fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    /// Applies `movement` within `items`, clamped to the ends of the list.
    ///
    /// With nothing focused yet, every move lands on the first or last item.
    pub fn move_focus(&mut self, movement: FocusMove, items: &dyn InteractiveItems) -> Option<FocusableRef> {
        let list = items.list_interactive_items();
        let Some(last) = list.len().checked_sub(1) else {
            self.focused = None;
            return None;
        };

        let target = match (movement, self.focused) {
            (FocusMove::First, _) | (FocusMove::Previous, None) => 0,
            (FocusMove::Last, _) => last,
            (FocusMove::Next, None) => 0,
            (FocusMove::Next, Some(current)) => (current + 1).min(last),
            (FocusMove::Previous, Some(current)) => current.saturating_sub(1).min(last),
        };

        self.focused = Some(target);
        list.into_iter().nth(target)
    }

    /// Re-anchors focus after the visible level changed.
    ///
    /// Forward moves land on the first item. Backward moves land on the first
    /// item too, unless the policy is [`FocusRestorePolicy::ReturnToParent`]
    /// and `left_via` (the container id just popped) is present in `items`.
    pub fn anchor(&mut self, direction: Direction, left_via: Option<&str>, items: &dyn InteractiveItems) {
        let list = items.list_interactive_items();
        if list.is_empty() {
            self.focused = None;
            return;
        }

        let restored = match (direction, self.policy) {
            (Direction::Backward, FocusRestorePolicy::ReturnToParent) => left_via
                .and_then(|id| list.iter().find(|item| item.id == id))
                .map(|item| item.index),
            (Direction::Backward, FocusRestorePolicy::FirstItem) | (Direction::Forward, _) => None,
        };

        self.focused = Some(restored.unwrap_or(0));
    }

    /// Clamps focus into range after the item list changed size.
    pub fn clamp(&mut self, items: &dyn InteractiveItems) {
        let len = items.list_interactive_items().len();
        self.focused = match (self.focused, len) {
            (_, 0) => None,
            (Some(index), _) => Some(index.min(len - 1)),
            (None, _) => Some(0),
        };
    }

    /// Sets focus directly, as a pointer press does before activation.
    pub fn focus_index(&mut self, index: usize, items: &dyn InteractiveItems) -> Option<FocusableRef> {
        let item = items.list_interactive_items().into_iter().nth(index)?;
        self.focused = Some(index);
        Some(item)
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<&'static str>);

    impl InteractiveItems for Fixed {
        fn list_interactive_items(&self) -> Vec<FocusableRef> {
            self.0
                .iter()
                .enumerate()
                .map(|(index, id)| FocusableRef { index, id: (*id).to_string() })
                .collect()
        }
    }

    #[test]
    fn arrow_down_clamps_at_last_item() {
        let items = Fixed(vec!["a", "b", "c"]);
        let mut focus = FocusManager::default();
        focus.anchor(Direction::Forward, None, &items);

        for _ in 0..5 {
            focus.move_focus(FocusMove::Next, &items);
        }
        assert_eq!(focus.focused_index(), Some(2));
    }

    #[test]
    fn arrow_up_clamps_at_first_item() {
        let items = Fixed(vec!["a", "b", "c"]);
        let mut focus = FocusManager::default();
        focus.move_focus(FocusMove::Last, &items);

        for _ in 0..5 {
            focus.move_focus(FocusMove::Previous, &items);
        }
        assert_eq!(focus.focused_index(), Some(0));
    }

    #[test]
    fn home_and_end_jump_to_ends() {
        let items = Fixed(vec!["a", "b", "c", "d"]);
        let mut focus = FocusManager::default();
        assert_eq!(focus.move_focus(FocusMove::Last, &items).map(|f| f.id), Some("d".into()));
        assert_eq!(focus.move_focus(FocusMove::First, &items).map(|f| f.id), Some("a".into()));
    }

    #[test]
    fn empty_level_has_no_focus() {
        let items = Fixed(vec![]);
        let mut focus = FocusManager::default();
        assert!(focus.move_focus(FocusMove::Next, &items).is_none());
        focus.anchor(Direction::Forward, None, &items);
        assert_eq!(focus.focused_index(), None);
    }

    #[test]
    fn backward_anchor_defaults_to_first_item() {
        let items = Fixed(vec!["a", "b", "c"]);
        let mut focus = FocusManager::new(FocusRestorePolicy::FirstItem);
        focus.anchor(Direction::Backward, Some("c"), &items);
        assert_eq!(focus.focused_index(), Some(0));
    }

    #[test]
    fn return_to_parent_policy_restores_origin_item() {
        let items = Fixed(vec!["a", "b", "c"]);
        let mut focus = FocusManager::new(FocusRestorePolicy::ReturnToParent);
        focus.anchor(Direction::Backward, Some("c"), &items);
        assert_eq!(focus.focused_index(), Some(2));

        focus.anchor(Direction::Forward, Some("c"), &items);
        assert_eq!(focus.focused_index(), Some(0));

        focus.anchor(Direction::Backward, Some("gone"), &items);
        assert_eq!(focus.focused_index(), Some(0));
    }

    #[test]
    fn clamp_keeps_focus_in_range() {
        let mut focus = FocusManager::default();
        focus.move_focus(FocusMove::Last, &Fixed(vec!["a", "b", "c"]));
        focus.clamp(&Fixed(vec!["a"]));
        assert_eq!(focus.focused_index(), Some(0));
        focus.clamp(&Fixed(vec![]));
        assert_eq!(focus.focused_index(), None);
    }
}
