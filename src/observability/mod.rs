//! OpenTelemetry-based observability with file-based trace export.
//!
//! Distributed tracing infrastructure for the plugin: `tracing` spans and
//! events flow through `tracing-opentelemetry` into a custom file-based OTLP
//! exporter, since a sandboxed Zellij plugin has no collector to talk to.
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → TraceFileExporter → JSON file
//! ```
//!
//! Traces land in `knihovka-otlp.json` inside the plugin data directory,
//! rotating at 10 MB with three retained backups. The trace level comes from
//! the `trace_level` plugin configuration (default `info`). Initialization
//! is idempotent and silently optional: a read-only data directory disables
//! tracing rather than the plugin.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup (EnvFilter + OpenTelemetry layer)
//! - `tracer`: Tracer provider with the file-based span exporter
//! - `span_formatter`: OTLP JSON span serialization
//! - `file_writer`: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
