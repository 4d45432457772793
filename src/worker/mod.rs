//! Background worker thread for menu loading.
//!
//! Menu files are read and validated on a Zellij worker thread so that a
//! slow or large file never stalls the plugin's event loop. Results come back
//! to the plugin as JSON-encoded responses.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::MenuWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

/// Name the worker is registered under and messages are addressed to.
pub const WORKER_NAME: &str = "menu";
