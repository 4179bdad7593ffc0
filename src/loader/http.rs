//! HTTP data source backed by `reqwest`.
//!
//! Collections are fetched with `GET {base_url}/courses` and
//! `GET {base_url}/schools`, each expected to return a JSON array of records.

use super::source::DataSource;
use crate::domain::{Course, ListingError, Result, School};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Data source reading collections from a JSON HTTP API.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpDataSource {
    /// Creates a source rooted at `base_url` with no request timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use edu_listing::loader::HttpDataSource;
    /// use std::time::Duration;
    ///
    /// let source = HttpDataSource::new("https://lms.example.org/api/")
    ///     .with_timeout(Duration::from_secs(10));
    /// assert_eq!(source.url_for("courses"), "https://lms.example.org/api/courses");
    /// ```
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full URL of a collection endpoint.
    #[must_use]
    pub fn url_for(&self, collection: &str) -> String {
        format!("{}/{collection}", self.base_url.trim_end_matches('/'))
    }

    #[instrument(skip(self))]
    async fn get_collection<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let url = self.url_for(collection);

        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ListingError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        let payload: serde_json::Value = serde_json::from_slice(&body)?;
        let records = decode_collection(collection, payload)?;

        debug!(url = %url, count = records.len(), "collection fetched");
        Ok(records)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_courses(&self) -> Result<Vec<Course>> {
        self.get_collection("courses").await
    }

    async fn fetch_schools(&self) -> Result<Vec<School>> {
        self.get_collection("schools").await
    }
}

/// Decodes a JSON array payload into records, tolerating malformed elements.
///
/// Record fields decode leniently, so a record missing display fields is kept and
/// rendered with fallbacks. Elements that are not JSON objects, or that still fail
/// to decode, are skipped with a warning instead of failing the whole collection.
///
/// # Errors
///
/// Returns [`ListingError::Decode`] if `payload` is not an array.
pub fn decode_collection<T: DeserializeOwned>(
    collection: &str,
    payload: serde_json::Value,
) -> Result<Vec<T>> {
    let serde_json::Value::Array(items) = payload else {
        return Err(ListingError::Decode(<serde_json::Error as serde::de::Error>::custom(
            format!("expected a JSON array of {collection}"),
        )));
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                warn!(collection, index, "skipping non-object record");
                return None;
            }
            serde_json::from_value(item)
                .map_err(|e| warn!(collection, index, error = %e, "skipping undecodable record"))
                .ok()
        })
        .collect();

    if records.len() != total {
        debug!(collection, total, kept = records.len(), "malformed records skipped");
    }
    Ok(records)
}
