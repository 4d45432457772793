//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the drillmenu library and the Zellij
//! plugin system. Translates host events into [`Event`]s, runs
//! [`handle_event`], and turns the returned [`Action`]s into host calls.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← menu state, input, rendering
//! │  └──────────────────┘   │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │    MenuWorker    │   │  ← menu file loading
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! - `Visible(true)` → `Event::Open`, `Visible(false)` → `Event::Closed`
//! - `Key` → see [`drillmenu::app::keys`]
//! - `Mouse(LeftClick)` → `Event::Click`
//! - `Timer` → `Event::Tick`
//! - `FileSystemUpdate` on the menu file → `Event::ReloadMenu`
//! - `CustomMessage` from the worker → `Event::WorkerResponse`

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use drillmenu::app::map_key;
use drillmenu::infrastructure::is_same_file;
use drillmenu::source::{ActionBinder, LeafCommand};
use drillmenu::worker::{MenuWorker, WorkerMessage, WorkerResponse, WORKER_NAME};
use drillmenu::{handle_event, Action, Config, Event, MenuState};

register_plugin!(State);
register_worker!(MenuWorker, menu_worker, MENU_WORKER);

/// Binds leaf commands to Zellij host calls.
#[derive(Debug, Default, Clone, Copy)]
struct ZellijBinder;

impl ActionBinder for ZellijBinder {
    fn bind(&self, command: &LeafCommand) -> drillmenu::domain::ItemAction {
        let command = command.clone();
        drillmenu::domain::ItemAction::new(move || run_leaf_command(&command))
    }
}

fn run_leaf_command(command: &LeafCommand) {
    match command {
        LeafCommand::Run { argv, cwd, floating } => {
            let Some((program, args)) = argv.split_first() else {
                tracing::warn!("leaf command has an empty argv");
                return;
            };
            let to_run = CommandToRun {
                path: PathBuf::from(program),
                args: args.to_vec(),
                cwd: cwd.as_ref().map(PathBuf::from),
            };
            tracing::debug!(program = %program, floating = floating, "opening command pane");
            if *floating {
                open_command_pane_floating(to_run, None, BTreeMap::new());
            } else {
                open_command_pane(to_run, BTreeMap::new());
            }
        }
        LeafCommand::SwitchSession { name } => {
            tracing::debug!(session = %name, "switching session");
            switch_session(Some(name.as_str()));
        }
    }
}

/// Plugin state wrapper.
struct State {
    /// Core menu state from the library layer.
    menu: MenuState,
}

impl Default for State {
    fn default() -> Self {
        Self { menu: drillmenu::initialize(&Config::default(), Arc::new(ZellijBinder)) }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, requests permissions, and subscribes to events.
    ///
    /// The menu is loaded by the worker once permissions are granted; until
    /// then the sheet shows its loading state.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        drillmenu::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(menu_file = ?config.menu_file, "parsed configuration");
        self.menu = drillmenu::initialize(&config, Arc::new(ZellijBinder));

        request_permission(&[
            PermissionType::ChangeApplicationState,
            PermissionType::RunCommands,
            PermissionType::FullHdAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Visible,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
            EventType::FileSystemUpdate,
        ]);

        self.dispatch(&Event::Open);
        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a host event, runs it through the handler, and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match map_key(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(Mouse::LeftClick(line, column)) => Event::Click { line, column },
            zellij_tile::prelude::Event::Visible(true) => Event::Open,
            zellij_tile::prelude::Event::Visible(false) => Event::Closed,
            zellij_tile::prelude::Event::Timer(elapsed) => Event::Tick { elapsed },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::FileSystemUpdate(paths) => {
                if !self.touches_menu_file(paths.iter().map(|(path, _)| path.as_path())) {
                    return false;
                }
                tracing::debug!("menu file changed");
                Event::ReloadMenu
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                self.handle_permission_result(status);
                return false;
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.menu.set_viewport(rows, cols);
        drillmenu::ui::render(&self.menu, rows, cols);
    }
}

impl State {
    /// Runs one event through the handler and executes its actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.menu, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render = should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(_) => "Mouse".to_string(),
            zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::FileSystemUpdate(..) => "FileSystemUpdate".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn touches_menu_file<'a>(&self, mut paths: impl Iterator<Item = &'a Path>) -> bool {
        let Some(menu_file) = self.menu.menu_file.as_deref() else {
            return false;
        };
        let menu_file = Path::new(menu_file);
        paths.any(|path| is_same_file(path, menu_file))
    }

    fn handle_permission_result(&mut self, status: PermissionStatus) {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - loading menu");
                if self.menu.menu_file.is_some() {
                    watch_filesystem();
                }
                self.post_worker_message(&WorkerMessage::load_menu(self.menu.menu_file.clone()));
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - menu cannot load or run commands");
                self.menu.set_load_error("permissions denied");
            }
        }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }
        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => post_message_to(PluginMessage {
                worker_name: Some(WORKER_NAME.to_string()),
                name: WORKER_NAME.to_string(),
                payload,
            }),
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker message"),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::RequestClose => {
                hide_self();
                // Hidden panes may not report Visible(false).
                self.dispatch(&Event::Closed);
            }
            Action::PostToWorker(message) => self.post_worker_message(message),
            Action::ScheduleFrame { after_secs } => set_timeout(*after_secs),
        }
    }
}
