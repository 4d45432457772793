//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → OtlpFileExporter → RotatingFile
//! ```
//!
//! Traces land in `~/.local/share/zellij/drillmenu/drillmenu-otlp.json`, one
//! OTLP/JSON document per line. The file rolls over at 10 MiB and keeps three
//! timestamped backups. The filter comes from the `trace_level` plugin option
//! and defaults to `info`.
//!
//! Both the plugin thread and the worker thread call [`init_tracing`]; spans
//! from the worker join the plugin's trace through the context carried in
//! each [`WorkerMessage`](crate::worker::WorkerMessage).

mod exporter;
mod init;
mod rotating_file;

pub use init::{init_tracing, TRACE_FILE_NAME};
pub use rotating_file::RotatingFile;
