//! Navigation paths and the pure level resolver.
//!
//! A [`NavigationPath`] names the route from the root list to the current
//! level as a sequence of container ids. It is re-resolved against live menu
//! data on every lookup, so a path whose data changed underneath it is
//! detected rather than dereferenced.

use super::menu::{find_item, MenuItem};
use std::fmt;

/// Ordered container ids, root to current. Empty means the root level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NavigationPath(Vec<String>);

impl NavigationPath {
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub(crate) fn push(&mut self, id: impl Into<String>) {
        self.0.push(id.into());
    }

    pub(crate) fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }
}

impl<S: Into<String>> FromIterator<S> for NavigationPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for NavigationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("/")
        } else {
            for segment in &self.0 {
                write!(f, "/{segment}")?;
            }
            Ok(())
        }
    }
}

/// Walks `path` from `root` and returns the level it names.
///
/// Returns `None` when any segment is missing or names an item without
/// children. Callers decide how to recover.
#[must_use]
pub fn resolve_level<'a>(root: &'a [MenuItem], path: &NavigationPath) -> Option<&'a [MenuItem]> {
    let mut level = root;
    for segment in path.segments() {
        let item = find_item(level, segment).filter(|item| item.is_container())?;
        level = &item.children;
    }
    Some(level)
}

/// Returns the container item the path ends on, or `None` at the root.
#[must_use]
pub fn resolve_container<'a>(root: &'a [MenuItem], path: &NavigationPath) -> Option<&'a MenuItem> {
    let (last, parents) = path.segments().split_last()?;
    let parent_path: NavigationPath = parents.iter().cloned().collect();
    let level = resolve_level(root, &parent_path)?;
    find_item(level, last).filter(|item| item.is_container())
}
