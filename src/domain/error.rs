//! Error types for the listing controller.
//!
//! This module defines the centralized error type [`ListingError`] and a type alias
//! [`Result`] used throughout the crate. Fetch failures are modelled here so the
//! data-access layer can propagate them with `?`; the controller converts them into a
//! `Failed` status instead of handing them to the caller.

use thiserror::Error;

/// The main error type for listing operations.
///
/// Most variants wrap errors from external crates via `#[from]`, so data-access code
/// can propagate transport and decoding failures with `?`.
///
/// # Examples
///
/// ```
/// use edu_listing::ListingError;
///
/// fn validate() -> Result<(), ListingError> {
///     Err(ListingError::Config("course_preview_limit must be positive".to_string()))
/// }
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ListingError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("Unexpected response status {status} from {url}")]
    Status {
        /// HTTP status code returned by the API.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The payload was not the expected JSON shape.
    ///
    /// Only raised for the payload as a whole (e.g. not an array). Individual
    /// malformed records are tolerated during decoding.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for ListingError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A specialized `Result` type for listing operations.
pub type Result<T> = std::result::Result<T, ListingError>;
