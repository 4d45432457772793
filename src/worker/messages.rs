//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main plugin
//! thread and the background worker thread that loads menus. It also carries
//! the tracing context across the thread boundary so worker spans join the
//! plugin's trace.

use crate::source::MenuDocument;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry ids of the current `tracing` span, or
    /// `None` when no valid span context is active (for example before
    /// tracing is initialized).
    ///
    /// ```no_run
    /// use drillmenu::worker::TraceContext;
    ///
    /// let ctx = TraceContext::from_current();
    /// assert!(ctx.map_or(true, |c| c.trace_id.len() == 32));
    /// ```
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let context = tracing::Span::current().context();
        let span = context.span();
        let ids = span.span_context();
        if !ids.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", ids.trace_id()),
            parent_span_id: format!("{:016x}", ids.span_id()),
        })
    }
}

/// Generates a constructor per `WorkerMessage` variant that fills in
/// `trace_context` from the current span.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` message carrying the current trace context.")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_menu(LoadMenu { path: Option<String> }),
}

/// Messages sent from the main thread to the worker thread.
///
/// All variants include an optional trace context for distributed tracing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read and validate a menu.
    LoadMenu {
        /// Sandbox path of a TOML menu file; `None` selects the built-in menu.
        path: Option<String>,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The trace context attached to this message.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadMenu { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A menu was read and validated.
    MenuLoaded {
        /// The validated document.
        document: MenuDocument,

        /// Where it came from, for logs and notices.
        origin: String,
    },

    /// The menu could not be loaded.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
