//! Tracing initialization and subscriber setup.
//!
//! Wires the complete observability pipeline: an `EnvFilter` built from the
//! configured trace level, the OpenTelemetry layer, and the file-based OTLP
//! exporter.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// The level is taken from `config.trace_level`, defaulting to `"info"`.
/// Traces are written to `knihovka-otlp.json` in the plugin data directory;
/// the directory is created if missing. Safe to call multiple times (only
/// the first call takes effect) and silently does nothing when the data
/// directory cannot be created; observability is optional.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        "Knihovka",
    )]);

    let trace_file = data_dir.join("knihovka-otlp.json");
    let provider = tracer::create_tracer_provider(trace_file, resource);

    let tracer = provider.tracer("Knihovka");
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
