//! Fetch task execution.
//!
//! A fetch runs as its own tokio task so the controller keeps handling criteria
//! changes while the request is in flight. The task converts the data source's
//! `Result` into a [`FetchResponse`] tagged with the request's generation and sends
//! it back over the controller's channel; it never applies anything itself.

use super::messages::{FetchRequest, FetchResponse};
use super::source::{DataSource, Loadable};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Performs one fetch and wraps its outcome, logging success or failure.
pub async fn run_fetch<T: Loadable>(
    source: Arc<dyn DataSource>,
    request: FetchRequest,
) -> FetchResponse<T> {
    match T::fetch_from(source).await {
        Ok(records) => {
            tracing::debug!(count = records.len(), "fetch succeeded");
            FetchResponse::Loaded {
                generation: request.generation,
                records,
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "fetch returned an error");
            FetchResponse::Failed {
                generation: request.generation,
                message: e.to_string(),
            }
        }
    }
}

/// Spawns [`run_fetch`] on the current tokio runtime.
///
/// The response is sent on `responses`; if the receiving controller is gone the
/// response is dropped.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn spawn_fetch<T: Loadable>(
    source: Arc<dyn DataSource>,
    request: FetchRequest,
    responses: UnboundedSender<FetchResponse<T>>,
) -> JoinHandle<()> {
    let span = tracing::debug_span!(
        "fetch",
        kind = %request.kind,
        generation = %request.generation
    );

    tokio::spawn(
        async move {
            let response = run_fetch::<T>(source, request).await;
            if responses.send(response).is_err() {
                tracing::debug!("controller dropped before fetch completed");
            }
        }
        .instrument(span),
    )
}
