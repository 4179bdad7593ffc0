//! Logging and trace export.
//!
//! Events go to stderr through a `tracing-subscriber` fmt layer. Spans can
//! additionally be exported through OpenTelemetry to a local file:
//!
//! ```text
//! tracing spans → tracing-opentelemetry → TracerProvider → JsonLinesExporter → RotatingFile
//! ```
//!
//! Each line of the trace file is a self-contained OTLP/JSON document.

mod exporter;
mod init;
mod otlp;
mod rotating;

pub use exporter::{file_tracer_provider, JsonLinesExporter};
pub use init::{init_tracing, DEFAULT_TRACE_LEVEL};
pub use rotating::{RotatingFile, RotationPolicy, DEFAULT_BACKUPS, DEFAULT_MAX_BYTES};
