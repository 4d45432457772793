//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place menu state changes. It runs
//! synchronously for each event and returns whether to re-render plus the
//! [`Action`]s the plugin shim should execute.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Open`, `Closed`
//! - **Focus**: `FocusNext`, `FocusPrevious`, `FocusFirst`, `FocusLast`
//! - **Selection**: `ActivateFocused`, `Activate`, `Click`
//! - **Navigation**: `Back`, `Dismiss`
//! - **Animation**: `Tick`
//! - **Menu data**: `ReloadMenu`, `WorkerResponse`
//!
//! Input events are ignored while the menu is closed. Once a close has been
//! requested, further selections and dismissals are ignored until the host
//! reports the menu closed, so a leaf action can never fire twice.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use drillmenu::app::{handle_event, Action, Event, MenuState};
//! use drillmenu::app::modes::FocusRestorePolicy;
//! use drillmenu::source::{LoggingBinder, MenuDocument};
//! use drillmenu::ui::Theme;
//!
//! let mut state = MenuState::new(Theme::default(), Arc::new(LoggingBinder), FocusRestorePolicy::FirstItem, "Menu", None);
//! state.install_menu(&MenuDocument::parse("[[item]]\nid = \"a\"\nlabel = \"A\"\n")?);
//! handle_event(&mut state, &Event::Open)?;
//! let (_, actions) = handle_event(&mut state, &Event::Dismiss)?;
//! assert_eq!(actions, vec![Action::RequestClose]);
//! # Ok::<(), drillmenu::DrillmenuError>(())
//! ```

use super::focus::FocusMove;
use super::{Action, MenuState};
use crate::domain::{ItemKind, NavigationError, Result};
use crate::ui::HitTarget;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, the host, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The host made the menu visible.
    Open,
    /// The host hid the menu.
    Closed,

    /// Moves focus to the next item, stopping at the last.
    FocusNext,
    /// Moves focus to the previous item, stopping at the first.
    FocusPrevious,
    /// Moves focus to the first item.
    FocusFirst,
    /// Moves focus to the last item.
    FocusLast,

    /// Selects the focused item (Enter / Space).
    ActivateFocused,
    /// Selects the item at `index` of the current level.
    Activate {
        index: usize,
    },
    /// Left mouse click at a 0-based pane cell.
    Click {
        line: isize,
        column: usize,
    },

    /// Goes up one level; does nothing at the root.
    Back,
    /// Goes up one level, or closes the menu at the root.
    Dismiss,

    /// Animation frame; `elapsed` seconds since the previous one.
    Tick {
        elapsed: f64,
    },

    /// The menu file changed on disk.
    ReloadMenu,

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

impl Event {
    const fn requires_open(&self) -> bool {
        matches!(
            self,
            Self::FocusNext
                | Self::FocusPrevious
                | Self::FocusFirst
                | Self::FocusLast
                | Self::ActivateFocused
                | Self::Activate { .. }
                | Self::Click { .. }
                | Self::Back
                | Self::Dismiss
                | Self::Tick { .. }
        )
    }
}

/// Processes an event, mutates menu state, and returns actions to execute.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that do I/O.
pub fn handle_event(state: &mut MenuState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if event.requires_open() && !state.is_open() {
        tracing::debug!("menu closed, ignoring input");
        return Ok((false, vec![]));
    }

    match event {
        Event::Open => {
            if state.is_open() {
                return Ok((false, vec![]));
            }
            state.open();
            Ok((true, vec![]))
        }
        Event::Closed => {
            if state.is_open() {
                state.close();
            }
            Ok((false, vec![]))
        }
        Event::FocusNext => Ok((state.move_focus(FocusMove::Next), vec![])),
        Event::FocusPrevious => Ok((state.move_focus(FocusMove::Previous), vec![])),
        Event::FocusFirst => Ok((state.move_focus(FocusMove::First), vec![])),
        Event::FocusLast => Ok((state.move_focus(FocusMove::Last), vec![])),
        Event::ActivateFocused => match state.focused_index() {
            Some(index) => activate(state, index),
            None => Ok((false, vec![])),
        },
        Event::Activate { index } => activate(state, *index),
        Event::Click { line, column } => {
            let Ok(line) = usize::try_from(*line) else {
                return Ok((false, vec![]));
            };
            match state.hit_test(line, *column) {
                HitTarget::Outside => {
                    tracing::debug!("click outside sheet");
                    Ok((false, state.request_close().into_iter().collect()))
                }
                HitTarget::Sheet => Ok((false, vec![])),
                HitTarget::Back => Ok(ascend(state)),
                HitTarget::Item(index) => activate(state, index),
            }
        }
        Event::Back => Ok(ascend(state)),
        Event::Dismiss => {
            if state.close_requested() {
                return Ok((false, vec![]));
            }
            if state.is_root() {
                tracing::debug!("dismiss at root, requesting close");
                return Ok((false, state.request_close().into_iter().collect()));
            }
            Ok(ascend(state))
        }
        Event::Tick { elapsed } => {
            state.frame_delivered();
            state.advance(*elapsed);
            Ok((true, state.schedule_frame().into_iter().collect()))
        }
        Event::ReloadMenu => {
            tracing::debug!(menu_file = ?state.menu_file, "reloading menu");
            let message = WorkerMessage::load_menu(state.menu_file.clone());
            Ok((false, vec![Action::PostToWorker(message)]))
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::MenuLoaded { document, origin } => {
                tracing::debug!(origin = %origin, "menu loaded");
                state.install_menu(document);
                Ok((state.is_open(), state.schedule_frame().into_iter().collect()))
            }
            WorkerResponse::Error { message } => {
                tracing::warn!(error = %message, "menu load failed, keeping previous menu");
                state.set_load_error(message.clone());
                Ok((state.is_open(), state.schedule_frame().into_iter().collect()))
            }
        },
    }
}

/// Routes selection of the item at `index`: containers descend, leaves run
/// their action and close, inert items only take focus.
fn activate(state: &mut MenuState, index: usize) -> Result<(bool, Vec<Action>)> {
    if state.close_requested() {
        tracing::debug!(index = index, "close pending, ignoring activation");
        return Ok((false, vec![]));
    }

    let Some(item) = state.item_at(index) else {
        tracing::debug!(index = index, "no item at index");
        return Ok((false, vec![]));
    };
    let (kind, id, action) = (item.kind(), item.id.clone(), item.action.clone());

    match kind {
        ItemKind::Container => match state.descend(&id) {
            Ok(step) => {
                tracing::debug!(to = %step.to, "descended into submenu");
                Ok((true, state.schedule_frame().into_iter().collect()))
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "menu data integrity: invalid descend target");
                Ok((false, vec![]))
            }
        },
        ItemKind::Leaf => {
            state.focus_index(index);
            tracing::debug!(id = %id, "invoking leaf action");
            if let Some(action) = action {
                action.invoke();
            }
            Ok((true, state.request_close().into_iter().collect()))
        }
        ItemKind::Inert => {
            tracing::debug!(id = %id, "inert item selected");
            state.focus_index(index);
            Ok((true, vec![]))
        }
    }
}

fn ascend(state: &mut MenuState) -> (bool, Vec<Action>) {
    match state.ascend() {
        Ok(step) => {
            tracing::debug!(to = %step.to, "ascended");
            (true, state.schedule_frame().into_iter().collect())
        }
        Err(NavigationError::AscendAtRoot) => (false, vec![]),
        Err(e) => {
            tracing::warn!(error = %e, "ascend rejected");
            (false, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::{Direction, FocusRestorePolicy};
    use crate::domain::{ItemAction, MenuItem};
    use crate::source::{ActionBinder, LeafCommand, MenuDocument};
    use crate::ui::sheet::SheetGeometry;
    use crate::ui::Theme;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct CountingBinder {
        fired: Arc<AtomicUsize>,
    }

    impl ActionBinder for CountingBinder {
        fn bind(&self, _command: &LeafCommand) -> ItemAction {
            let fired = Arc::clone(&self.fired);
            ItemAction::new(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            })
        }
    }

    const MENU: &str = r#"
[[item]]
id = "a"
label = "A"
  [[item.item]]
  id = "a1"
  label = "A1"
    [[item.item.item]]
    id = "deep"
    label = "Deep"
    session = "deep"
  [[item.item]]
  id = "x"
  label = "X"
  run = ["true"]
[[item]]
id = "b"
label = "B"
[[item]]
id = "c"
label = "C"
"#;

    fn open_state() -> (MenuState, Arc<AtomicUsize>) {
        let binder = CountingBinder::default();
        let fired = Arc::clone(&binder.fired);
        let mut state = MenuState::new(Theme::default(), Arc::new(binder), FocusRestorePolicy::FirstItem, "Menu", None);
        state.install_menu(&MenuDocument::parse(MENU).expect("valid menu"));
        handle_event(&mut state, &Event::Open).expect("open");
        (state, fired)
    }

    fn send(state: &mut MenuState, event: Event) -> Vec<Action> {
        handle_event(state, &event).map(|(_, actions)| actions).unwrap_or_default()
    }

    fn close_requests(actions: &[Action]) -> usize {
        actions.iter().filter(|a| **a == Action::RequestClose).count()
    }

    #[test]
    fn escape_from_depth_two_walks_out_then_closes_once() {
        let (mut state, _) = open_state();
        send(&mut state, Event::Activate { index: 0 });
        send(&mut state, Event::Activate { index: 0 });
        assert_eq!(state.path().segments(), ["a".to_string(), "a1".to_string()]);

        let mut requests = 0;
        requests += close_requests(&send(&mut state, Event::Dismiss));
        assert_eq!(state.path().segments(), ["a".to_string()]);
        assert_eq!(state.direction(), Direction::Backward);
        assert_eq!(requests, 0);

        requests += close_requests(&send(&mut state, Event::Dismiss));
        assert!(state.is_root());
        assert_eq!(requests, 0);

        requests += close_requests(&send(&mut state, Event::Dismiss));
        requests += close_requests(&send(&mut state, Event::Dismiss));
        assert_eq!(requests, 1);
    }

    #[test]
    fn leaf_fires_once_across_enter_and_click() {
        let (mut state, fired) = open_state();
        send(&mut state, Event::Activate { index: 0 });
        send(&mut state, Event::FocusLast);

        let actions = send(&mut state, Event::ActivateFocused);
        assert_eq!(close_requests(&actions), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        let again = send(&mut state, Event::Activate { index: 1 });
        assert!(again.is_empty());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reopening_always_starts_fresh() {
        let (mut state, _) = open_state();
        send(&mut state, Event::Activate { index: 0 });
        send(&mut state, Event::Closed);
        send(&mut state, Event::Open);

        assert!(state.path().is_root());
        assert_eq!(state.direction(), Direction::Forward);
        assert_eq!(close_requests(&send(&mut state, Event::Dismiss)), 1);
    }

    #[test]
    fn arrow_keys_clamp_without_wrapping() {
        let (mut state, _) = open_state();
        for _ in 0..10 {
            send(&mut state, Event::FocusNext);
        }
        assert_eq!(state.focused_index(), Some(2));
        for _ in 0..10 {
            send(&mut state, Event::FocusPrevious);
        }
        assert_eq!(state.focused_index(), Some(0));
    }

    #[test]
    fn back_never_closes() {
        let (mut state, _) = open_state();
        let (render, actions) = handle_event(&mut state, &Event::Back).expect("back");
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn inert_items_only_take_focus() {
        let (mut state, _) = open_state();
        let actions = send(&mut state, Event::Activate { index: 1 });
        assert!(actions.is_empty());
        assert!(state.path().is_root());
        assert_eq!(state.focused_index(), Some(1));
    }

    #[test]
    fn container_with_action_still_descends() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let mut state = MenuState::new(Theme::default(), Arc::new(CountingBinder::default()), FocusRestorePolicy::FirstItem, "Menu", None);
        state.items = vec![MenuItem::new("both", "Both")
            .with_children(vec![MenuItem::new("child", "Child")])
            .with_action(ItemAction::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))];
        handle_event(&mut state, &Event::Open).expect("open");

        let actions = send(&mut state, Event::ActivateFocused);
        assert_eq!(close_requests(&actions), 0);
        assert_eq!(state.path().segments(), ["both".to_string()]);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn input_is_ignored_while_closed() {
        let (mut state, fired) = open_state();
        send(&mut state, Event::Closed);
        assert!(send(&mut state, Event::Dismiss).is_empty());
        assert!(send(&mut state, Event::Activate { index: 0 }).is_empty());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn navigation_schedules_frames_until_settled() {
        let (mut state, _) = open_state();
        let actions = send(&mut state, Event::Activate { index: 0 });
        assert!(matches!(actions.as_slice(), [Action::ScheduleFrame { .. }]));

        let mut ticks = 0;
        let mut pending = true;
        while pending && ticks < 100 {
            pending = !send(&mut state, Event::Tick { elapsed: 0.05 }).is_empty();
            ticks += 1;
        }
        assert!(!pending);
        assert_eq!(state.compute_viewmodel().layers.len(), 1);
    }

    #[test]
    fn clicks_route_through_the_sheet() {
        let (mut state, fired) = open_state();
        state.set_viewport(30, 60);
        send(&mut state, Event::Activate { index: 0 });
        send(&mut state, Event::Tick { elapsed: 1.0 });

        let geometry = SheetGeometry::place(30, 60, state.compute_viewmodel().sheet_height);
        let line = isize::try_from(geometry.inner_y()).expect("small");
        let column = geometry.inner_x() + 2;

        // Heading row of a nested level is the back affordance.
        send(&mut state, Event::Click { line, column });
        assert!(state.path().is_root());
        send(&mut state, Event::Tick { elapsed: 1.0 });

        let outside = send(&mut state, Event::Click { line: 0, column: 0 });
        assert_eq!(close_requests(&outside), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failed_reload_keeps_the_previous_menu() {
        let (mut state, _) = open_state();
        send(&mut state, Event::Activate { index: 0 });
        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::Error { message: "menu.toml: invalid".into() }),
        );
        assert_eq!(state.path().segments(), ["a".to_string()]);
        assert_eq!(state.load_error.as_deref(), Some("menu.toml: invalid"));
    }

    #[test]
    fn reload_event_asks_the_worker() {
        let (mut state, _) = open_state();
        state.menu_file = Some("/host/menu.toml".into());
        let actions = send(&mut state, Event::ReloadMenu);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::LoadMenu { path: Some(p), .. })] if p == "/host/menu.toml"
        ));
    }

    fn visible_ids(state: &MenuState) -> Vec<String> {
        state.visible_level().items.iter().map(|item| item.id.clone()).collect()
    }

    #[test]
    fn open_descend_then_escape_twice_closes_from_root() {
        let (mut state, _) = open_state();
        assert_eq!(visible_ids(&state), ["a", "b", "c"]);
        assert_eq!(state.direction(), Direction::Forward);

        send(&mut state, Event::Activate { index: 0 });
        assert_eq!(visible_ids(&state), ["a1", "x"]);
        assert_eq!(state.direction(), Direction::Forward);
        assert_eq!(state.focused_index(), Some(0));

        let first = send(&mut state, Event::Dismiss);
        assert_eq!(close_requests(&first), 0);
        assert!(state.is_root());
        assert_eq!(visible_ids(&state), ["a", "b", "c"]);
        assert_eq!(state.direction(), Direction::Backward);

        let second = send(&mut state, Event::Dismiss);
        assert_eq!(close_requests(&second), 1);
        assert_eq!(visible_ids(&state), ["a", "b", "c"]);
    }

    #[test]
    fn return_to_parent_refocuses_the_container_left() {
        let menu = r#"
[[item]]
id = "run"
label = "Run"
run = ["true"]
[[item]]
id = "note"
label = "Note"
[[item]]
id = "more"
label = "More"
  [[item.item]]
  id = "inner"
  label = "Inner"
"#;
        let mut state =
            MenuState::new(Theme::default(), Arc::new(CountingBinder::default()), FocusRestorePolicy::ReturnToParent, "Menu", None);
        state.install_menu(&MenuDocument::parse(menu).expect("valid menu"));
        handle_event(&mut state, &Event::Open).expect("open");

        send(&mut state, Event::Activate { index: 2 });
        assert_eq!(visible_ids(&state), ["inner"]);
        assert_eq!(state.focused_index(), Some(0));

        let actions = send(&mut state, Event::Dismiss);
        assert_eq!(close_requests(&actions), 0);
        assert!(state.is_root());
        assert_eq!(state.focused_index(), Some(2));
    }

    #[test]
    fn closing_mid_slide_does_not_freeze_later_transitions() {
        let (mut state, _) = open_state();
        let actions = send(&mut state, Event::Activate { index: 0 });
        assert!(matches!(actions.as_slice(), [Action::ScheduleFrame { .. }]));

        send(&mut state, Event::Dismiss);
        assert_eq!(close_requests(&send(&mut state, Event::Dismiss)), 1);
        send(&mut state, Event::Closed);
        // The timer queued before closing fires while closed and is dropped.
        assert!(send(&mut state, Event::Tick { elapsed: 0.05 }).is_empty());

        send(&mut state, Event::Open);
        let actions = send(&mut state, Event::Activate { index: 0 });
        assert!(matches!(actions.as_slice(), [Action::ScheduleFrame { .. }]));

        let mut ticks = 0;
        while !send(&mut state, Event::Tick { elapsed: 0.05 }).is_empty() && ticks < 100 {
            ticks += 1;
        }
        assert!(!state.is_animating());

        let vm = state.compute_viewmodel();
        assert_eq!(vm.layers.len(), 1);
        let layer = vm.interactive_layer().expect("current level drawn");
        assert!(layer.offset.abs() < 1e-9);
        assert!((layer.opacity - 1.0).abs() < 1e-9);
    }
}
