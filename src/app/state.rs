//! Menu state management and view model computation.
//!
//! [`MenuState`] is the single source of truth for an open menu: the loaded
//! tree, where the user is in it, what is animating, and which item has
//! focus. The event handler mutates it; the renderer reads it through
//! [`MenuState::compute_viewmodel`].
//!
//! # State Components
//!
//! - **Tree**: menu items built from the last successfully loaded document
//! - **Navigation**: path and direction of the last move
//! - **Transitions**: slide layers and the sheet height tween
//! - **Focus**: focused index within the current level
//! - **Lifecycle**: open flag and the one-shot close request latch
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use drillmenu::app::MenuState;
//! use drillmenu::app::modes::FocusRestorePolicy;
//! use drillmenu::source::{LoggingBinder, MenuDocument};
//! use drillmenu::ui::Theme;
//!
//! let mut state = MenuState::new(Theme::default(), Arc::new(LoggingBinder), FocusRestorePolicy::FirstItem, "Menu", None);
//! let document = MenuDocument::parse("[[item]]\nid = \"a\"\nlabel = \"A\"\n")?;
//! state.install_menu(&document);
//! state.open();
//! assert!(state.is_root());
//! assert_eq!(state.compute_viewmodel().layers.len(), 1);
//! # Ok::<(), drillmenu::DrillmenuError>(())
//! ```

use std::sync::Arc;

use super::actions::Action;
use super::focus::{FocusManager, FocusMove};
use super::modes::{Direction, FocusRestorePolicy};
use super::navigation::{NavigationState, Step, VisibleLevel};
use super::transition::TransitionController;
use crate::domain::{resolve_container, resolve_level, MenuItem, NavigationError, NavigationPath};
use crate::source::{ActionBinder, MenuDocument};
use crate::ui::components::{self, HitTarget};
use crate::ui::sheet::{HeightTween, CHROME_ROWS};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyState, FooterInfo, Heading, ItemView, LevelView, MenuViewModel};

/// Delay between animation frames, in seconds.
pub const FRAME_INTERVAL_SECS: f64 = 1.0 / 30.0;

const ROOT_HINTS: &str = "↑↓ move · enter select · esc close";
const NESTED_HINTS: &str = "↑↓ move · enter select · ← back · esc back";

/// Pane size from the most recent render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

/// Central menu state container.
#[derive(Debug)]
pub struct MenuState {
    /// Root level of the current menu tree.
    pub items: Vec<MenuItem>,

    /// Title drawn at the root level.
    pub title: String,

    /// Sandbox path of the menu file, `None` for the built-in menu.
    pub menu_file: Option<String>,

    /// Error from the most recent failed load, cleared by the next success.
    pub load_error: Option<String>,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    configured_title: String,
    loaded: bool,
    navigation: NavigationState,
    transitions: TransitionController,
    focus: FocusManager,
    sheet: HeightTween,
    is_open: bool,
    close_requested: bool,
    frame_pending: bool,
    viewport: Viewport,
    binder: Arc<dyn ActionBinder>,
}

impl MenuState {
    /// Creates a closed menu with no items loaded yet.
    #[must_use]
    pub fn new(
        theme: Theme,
        binder: Arc<dyn ActionBinder>,
        policy: FocusRestorePolicy,
        title: impl Into<String>,
        menu_file: Option<String>,
    ) -> Self {
        let title = title.into();
        Self {
            items: Vec::new(),
            title: title.clone(),
            menu_file,
            load_error: None,
            theme,
            configured_title: title,
            loaded: false,
            navigation: NavigationState::new(),
            transitions: TransitionController::default(),
            focus: FocusManager::new(policy),
            sheet: HeightTween::default(),
            is_open: false,
            close_requested: false,
            frame_pending: false,
            viewport: Viewport::default(),
            binder,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub const fn close_requested(&self) -> bool {
        self.close_requested
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.visible_level().stale || self.navigation.is_root()
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.navigation.direction()
    }

    #[must_use]
    pub const fn path(&self) -> &NavigationPath {
        self.navigation.path()
    }

    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = Viewport { rows, cols };
    }

    /// The level the user is looking at, with stale-path recovery applied.
    #[must_use]
    pub fn visible_level(&self) -> VisibleLevel<'_> {
        self.navigation.resolve_visible_level(&self.items)
    }

    /// Item at `index` in the current level.
    #[must_use]
    pub fn item_at(&self, index: usize) -> Option<&MenuItem> {
        self.visible_level().items.get(index)
    }

    #[must_use]
    pub const fn focused_index(&self) -> Option<usize> {
        self.focus.focused_index()
    }

    /// Transitions closed → open with a fresh navigation context.
    ///
    /// The first level renders at rest: nothing slides in on open.
    pub fn open(&mut self) {
        self.navigation.reset();
        self.transitions.settle();
        self.is_open = true;
        self.close_requested = false;
        self.frame_pending = false;

        let visible = self.navigation.resolve_visible_level(&self.items);
        self.focus.anchor(Direction::Forward, None, &visible);
        let height = self.natural_height();
        self.sheet.snap(height);
        tracing::debug!(items = self.items.len(), "menu opened");
    }

    /// Transitions open → closed, discarding the navigation context.
    pub fn close(&mut self) {
        self.navigation.reset();
        self.transitions.settle();
        self.focus.clear();
        self.is_open = false;
        // A timer still in flight is dropped while closed and never delivered.
        self.frame_pending = false;
        tracing::debug!("menu closed");
    }

    /// Latches the close request. Returns the action only the first time per
    /// open session.
    pub fn request_close(&mut self) -> Option<Action> {
        if self.close_requested {
            tracing::debug!("close already requested");
            return None;
        }
        self.close_requested = true;
        Some(Action::RequestClose)
    }

    /// Replaces the menu tree with a freshly loaded document.
    ///
    /// The current path is kept when it still resolves in the new tree;
    /// otherwise navigation recovers to the root level.
    pub fn install_menu(&mut self, document: &MenuDocument) {
        self.items = document.into_items(self.binder.as_ref());
        self.title = document.title.clone().unwrap_or_else(|| self.configured_title.clone());
        self.load_error = None;
        self.loaded = true;

        if resolve_level(&self.items, self.navigation.path()).is_none() {
            tracing::warn!(path = %self.navigation.path(), "menu reload invalidated the current path, returning to root");
            self.navigation.reset();
            self.transitions.settle();
            let visible = self.navigation.resolve_visible_level(&self.items);
            self.focus.anchor(Direction::Forward, None, &visible);
        } else {
            let visible = self.navigation.resolve_visible_level(&self.items);
            self.focus.clamp(&visible);
        }

        let height = self.natural_height();
        if self.is_open {
            self.sheet.retarget(height);
        } else {
            self.sheet.snap(height);
        }
        tracing::debug!(items = self.items.len(), title = %self.title, "menu installed");
    }

    /// Records a failed load. The previous tree stays in place.
    pub fn set_load_error(&mut self, message: impl Into<String>) {
        self.load_error = Some(message.into());
        if self.is_open {
            let height = self.natural_height();
            self.sheet.retarget(height);
        }
    }

    /// Descends into the container `id` of the current level.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::InvalidTarget`] when `id` is not a container
    /// of the current level; nothing changes.
    pub fn descend(&mut self, id: &str) -> Result<Step, NavigationError> {
        let step = self.navigation.descend(&self.items, id)?;
        self.begin_step(&step, None);
        Ok(step)
    }

    /// Ascends one level.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::AscendAtRoot`] at the root level.
    pub fn ascend(&mut self) -> Result<Step, NavigationError> {
        let step = self.navigation.ascend()?;
        self.begin_step(&step, step.from.last());
        Ok(step)
    }

    fn begin_step(&mut self, step: &Step, left_via: Option<&str>) {
        self.transitions.begin(step);
        let visible = self.navigation.resolve_visible_level(&self.items);
        self.focus.anchor(step.direction, left_via, &visible);
        let height = self.natural_height();
        self.sheet.retarget(height);
    }

    /// Moves focus within the current level. Returns whether it changed.
    pub fn move_focus(&mut self, movement: FocusMove) -> bool {
        let before = self.focus.focused_index();
        let visible = self.navigation.resolve_visible_level(&self.items);
        self.focus.move_focus(movement, &visible);
        before != self.focus.focused_index()
    }

    /// Focuses `index` in the current level, as a pointer press does.
    pub fn focus_index(&mut self, index: usize) {
        let visible = self.navigation.resolve_visible_level(&self.items);
        self.focus.focus_index(index, &visible);
    }

    /// Advances every animation by `dt` seconds. Returns `true` while any is running.
    pub fn advance(&mut self, dt: f64) -> bool {
        let sliding = self.transitions.advance(dt);
        let resizing = self.sheet.advance(dt);
        sliding || resizing
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transitions.is_animating() || self.sheet.is_animating()
    }

    /// Asks for the next animation frame if one is needed and none is queued.
    pub fn schedule_frame(&mut self) -> Option<Action> {
        if !self.is_open || self.frame_pending || !self.is_animating() {
            return None;
        }
        self.frame_pending = true;
        Some(Action::ScheduleFrame { after_secs: FRAME_INTERVAL_SECS })
    }

    /// Marks the queued frame as delivered.
    pub fn frame_delivered(&mut self) {
        self.frame_pending = false;
    }

    /// Rows the sheet needs to show the current level without clipping.
    #[must_use]
    pub fn natural_height(&self) -> usize {
        let items = self.visible_level().items;
        let body = if items.is_empty() {
            2
        } else {
            items.iter().map(|item| 1 + usize::from(item.description.is_some())).sum()
        };
        // heading + separator
        CHROME_ROWS + 2 + body
    }

    /// Maps a click at a 0-based pane cell to what it hit.
    #[must_use]
    pub fn hit_test(&self, line: usize, column: usize) -> HitTarget {
        components::hit_test(&self.compute_viewmodel(), self.viewport.rows, self.viewport.cols, line, column)
    }

    /// Builds the view model for the current frame.
    #[must_use]
    pub fn compute_viewmodel(&self) -> MenuViewModel {
        let current = self.navigation.path();
        let layers = self
            .transitions
            .frames(current)
            .into_iter()
            .filter_map(|frame| {
                let (items, stale) = if frame.interactive {
                    let visible = self.visible_level();
                    (visible.items, visible.stale)
                } else {
                    (resolve_level(&self.items, &frame.path)?, false)
                };
                Some(self.level_view(&frame.path, items, stale, frame.offset, frame.opacity, frame.interactive))
            })
            .collect();

        let is_root = self.is_root();
        MenuViewModel {
            is_root,
            direction: self.direction(),
            layers,
            sheet_height: self.sheet.current(),
            footer: self.compute_footer(is_root),
        }
    }

    fn level_view(
        &self,
        path: &NavigationPath,
        items: &[MenuItem],
        stale: bool,
        offset: f64,
        opacity: f64,
        interactive: bool,
    ) -> LevelView {
        let heading = match resolve_container(&self.items, path).filter(|_| !stale) {
            Some(container) => Heading::Back { parent_label: container.label.clone() },
            None => Heading::Title(self.title.clone()),
        };

        let focused = if interactive { self.focus.focused_index() } else { None };
        let item_views = items
            .iter()
            .enumerate()
            .map(|(index, item)| ItemView {
                label: item.label.clone(),
                description: item.description.clone(),
                icon: item.icon.as_ref().map(|icon| icon.glyph().to_string()),
                has_children: item.is_container(),
                is_focused: focused == Some(index),
            })
            .collect();

        LevelView {
            heading,
            items: item_views,
            offset,
            opacity,
            interactive,
            empty_state: items.is_empty().then(|| self.compute_empty_state()),
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        match (&self.load_error, self.loaded) {
            (Some(error), false) => EmptyState { message: "Menu failed to load".to_string(), subtitle: error.clone() },
            (_, false) => EmptyState { message: "Loading menu…".to_string(), subtitle: String::new() },
            (_, true) => EmptyState { message: "No menu items".to_string(), subtitle: "Press esc to go back".to_string() },
        }
    }

    fn compute_footer(&self, is_root: bool) -> FooterInfo {
        FooterInfo {
            keybindings: if is_root { ROOT_HINTS } else { NESTED_HINTS }.to_string(),
            notice: self.load_error.clone().filter(|_| self.loaded),
        }
    }
}
