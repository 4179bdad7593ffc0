//! Subscriber setup.

use super::exporter::file_tracer_provider;
use super::otlp::SCOPE_NAME;
use super::rotating::RotationPolicy;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when none is configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global tracing subscriber.
///
/// The subscriber always logs human-readable events to stderr, filtered by
/// `RUST_LOG` when set and otherwise by `config.trace_level` (default `"info"`).
/// When `config.trace_file` is set, spans are also exported as OTLP/JSON lines
/// to that file, rotated according to `trace_max_bytes` and `trace_backups`.
///
/// Safe to call more than once; only the first call installs a subscriber.
/// Returns `true` if this call installed it.
pub fn init_tracing(config: &Config) -> bool {
    let directive = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let otel_layer = config.trace_file.as_ref().map(|path| {
        let resource = Resource::new(vec![
            KeyValue::new("service.name", SCOPE_NAME),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]);
        let policy = RotationPolicy {
            max_bytes: config.trace_max_bytes,
            backups: config.trace_backups,
        };
        let provider = file_tracer_provider(path.clone(), policy, resource);
        OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .is_ok()
}
