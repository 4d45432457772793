//! Worker thread implementation for menu loading.
//!
//! Implements the Zellij worker interface: each `LoadMenu` request picks a
//! [`MenuSource`](crate::source::MenuSource), loads it, and posts the
//! validated document or an error back to the plugin.

use crate::domain::{DrillmenuError, Result};
use crate::source::source_for;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// Zellij constructs the worker with `Default` and keeps it for the life of
/// the plugin.
#[derive(Serialize, Deserialize, Default)]
pub struct MenuWorker {
    /// Number of load requests served, for log correlation.
    #[serde(skip)]
    loads: u64,
}

impl MenuWorker {
    /// Handles the `LoadMenu` message.
    fn handle_load_menu(&mut self, path: Option<&str>) -> WorkerResponse {
        self.loads += 1;
        let source = source_for(path);
        let origin = source.origin();

        match source.load() {
            Ok(document) => {
                tracing::debug!(
                    origin = %origin,
                    entries = document.entry_count(),
                    load = self.loads,
                    "menu loaded"
                );
                WorkerResponse::MenuLoaded { document, origin }
            }
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "menu load failed");
                WorkerResponse::Error { message: format!("{origin}: {e}") }
            }
        }
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadMenu { path, .. } => self.handle_load_menu(path.as_deref()),
        }
    }
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Sets up tracing for the worker thread, writing to the same trace file as
/// the plugin thread.
fn init_worker_tracing() {
    if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
        crate::observability::init_tracing(&crate::Config::default());
    }
}

/// Decodes a JSON payload posted by the plugin thread.
fn decode_message(payload: &str) -> Result<WorkerMessage> {
    serde_json::from_str(payload).map_err(|e| DrillmenuError::Worker(format!("undecodable message: {e}")))
}

impl ZellijWorker<'_> for MenuWorker {
    /// Deserializes a [`WorkerMessage`], handles it, and posts the
    /// JSON-encoded [`WorkerResponse`] back under the same message name.
    /// A payload that does not decode is answered with an error response so
    /// the sheet leaves its loading state.
    fn on_message(&mut self, message: String, payload: String) {
        init_worker_tracing();

        let response = match decode_message(&payload) {
            Ok(worker_message) => self.handle_message(worker_message),
            Err(e) => {
                tracing::warn!(error = %e, "rejecting undecodable worker message");
                WorkerResponse::Error { message: e.to_string() }
            }
        };

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage { name: message, payload, worker_name: None }),
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
        }
    }
}
