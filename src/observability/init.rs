//! Tracing subscriber setup.

use super::exporter;
use crate::infrastructure::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace output inside the data directory.
pub const TRACE_FILE_NAME: &str = "drillmenu-otlp.json";

const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber: an `EnvFilter` at the configured level
/// feeding an OpenTelemetry layer that writes to
/// `~/.local/share/zellij/drillmenu/drillmenu-otlp.json`.
///
/// Tracing is optional. If the data directory cannot be created nothing is
/// installed. Only the first successful call takes effect.
pub fn init_tracing(config: &Config) {
    let directive = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", "drillmenu")]);
    let provider = exporter::file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(exporter::SCOPE_NAME));

    let _ = tracing_subscriber::registry().with(filter).with(otel_layer).try_init();
}
