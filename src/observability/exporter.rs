//! Span exporter writing OTLP/JSON lines to a rotating file.

use super::otlp;
use super::rotating::{RotatingFile, RotationPolicy};
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config as TraceConfig, TracerProvider};
use std::path::PathBuf;

/// Writes every exported batch as one line of OTLP/JSON.
#[derive(Debug)]
pub struct JsonLinesExporter {
    file: RotatingFile,
    resource: Resource,
    stopped: bool,
}

impl JsonLinesExporter {
    #[must_use]
    pub const fn new(file: RotatingFile, resource: Resource) -> Self {
        Self {
            file,
            resource,
            stopped: false,
        }
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("trace exporter already shut down"))
        } else {
            let line = otlp::encode_batch(&self.resource, &batch).to_string();
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(format!("writing {}: {e}", self.file.path().display())))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a tracer provider that exports each finished span synchronously to
/// `path`.
#[must_use]
pub fn file_tracer_provider(path: PathBuf, policy: RotationPolicy, resource: Resource) -> TracerProvider {
    let exporter = JsonLinesExporter::new(RotatingFile::new(path, policy), resource.clone());

    TracerProvider::builder()
        .with_config(TraceConfig::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
