//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin shim executes them in order. Leaf actions from the menu tree are
//! not routed through here; they run synchronously inside the handler before
//! the close request is emitted.
//!
//! # Example
//!
//! ```rust
//! use drillmenu::app::Action;
//! use drillmenu::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_menu(None)),
//!     Action::ScheduleFrame { after_secs: 1.0 / 30.0 },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Asks the host to close the menu.
    ///
    /// Emitted once per open session: when dismissing at the root level, after
    /// a leaf action fires, or on a click outside the sheet. The shim hides the
    /// plugin pane, which comes back as [`Event::Closed`](super::Event::Closed).
    RequestClose,

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Requests a `Tick` after `after_secs` seconds to advance animations.
    ScheduleFrame {
        /// Delay before the next frame.
        after_secs: f64,
    },
}
