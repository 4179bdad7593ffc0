//! edu-listing: filterable listings for course and school catalogues.
//!
//! The crate implements the listing core of an education-management front end:
//! sections that fetch a collection of courses or schools, let the user narrow
//! it by category or free-text search, and hand the result to a renderer as a
//! view state with loading, failed and empty states.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI shim (main.rs)                                 │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application layer (app/)                           │
//! │  - ListingController: setters, fetch tasks          │
//! │  - handle_event: Event → (render?, Vec<Action>)     │
//! │  - compute_visible: category + search filter        │
//! └─────────────────────────────────────────────────────┘
//!         │                                       │
//! ┌───────────────────────┐           ┌───────────────────────┐
//! │ Loader (loader/)      │           │ UI (ui/)              │
//! │ - DataSource trait    │           │ - ViewState, Card     │
//! │ - HTTP / fixture      │           │ - TextRenderer        │
//! │ - tokio fetch tasks   │           │                       │
//! └───────────────────────┘           └───────────────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): Course, School, ListingError     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Loading rules
//!
//! Each mount starts a new fetch generation and the listing goes back to
//! `Loading`. Only the response of the latest generation is applied; older
//! responses and anything arriving after `dispose` are dropped. A failed fetch
//! leaves the listing `Failed` with an empty collection and is logged, never
//! returned to the caller.
//!
//! # Configuration
//!
//! [`Config`] is read from an optional TOML file and overlaid with `key=value`
//! pairs, typically from the command line:
//!
//! ```toml
//! api_base_url = "https://lms.example.org/api"
//! request_timeout_secs = 10
//! course_preview_limit = 6
//! trace_level = "debug"
//! trace_file = "~/.local/share/edu-listing/edu-listing-otlp.json"
//! ```
//!
//! # Example
//!
//! ```rust
//! use edu_listing::{build_source, Config, ListingController, TextRenderer};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> edu_listing::Result<()> {
//! let config = Config::default();
//! let mut courses = ListingController::course_preview(build_source(&config), config.course_preview_limit);
//! courses.mount()?;
//! courses.settle().await?;
//! courses.select_category("technology")?;
//!
//! let text = TextRenderer::default().render_to_string(&courses.view_state());
//! assert!(text.contains("Courses · Technology"));
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod loader;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, Event, FilterCriteria, ListingController, ListingState, LoadStatus};
pub use domain::{Course, CourseType, ListingError, Resource, ResourceKind, Result, School, SchoolStatus};
pub use loader::{DataSource, FixtureSource, HttpDataSource};
pub use ui::{TextRenderer, ViewState};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Runtime configuration.
///
/// Every field has a default, so an empty file or map yields a working
/// configuration that serves the built-in demo catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the catalogue API. `None` selects the built-in fixtures.
    pub api_base_url: Option<String>,

    /// Per-request timeout for the HTTP source. `None` means no timeout.
    pub request_timeout_secs: Option<u64>,

    /// Number of courses kept by the course preview. Default: 6
    pub course_preview_limit: usize,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default: `"info"`
    pub trace_level: Option<String>,

    /// When set, spans are also exported as OTLP/JSON lines to this file.
    pub trace_file: Option<PathBuf>,

    /// Size at which the trace file rotates.
    pub trace_max_bytes: u64,

    /// Rotated trace files kept.
    pub trace_backups: usize,

    /// Initial course category selection.
    pub category: Option<String>,

    /// Initial search term applied to both listings.
    pub search: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            request_timeout_secs: None,
            course_preview_limit: app::DEFAULT_COURSE_PREVIEW_LIMIT,
            trace_level: None,
            trace_file: None,
            trace_max_bytes: observability::DEFAULT_MAX_BYTES,
            trace_backups: observability::DEFAULT_BACKUPS,
            category: None,
            search: None,
        }
    }
}

impl Config {
    /// Parses configuration from `key=value` pairs over the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use edu_listing::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("course_preview_limit".to_string(), "3".to_string());
    /// map.insert("search".to_string(), "jeddah".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.course_preview_limit, 3);
    /// assert_eq!(config.search.as_deref(), Some("jeddah"));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().merge(map)
    }

    /// Loads configuration from a TOML file. `~` in `trace_file` is expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Io`] if the file cannot be read and
    /// [`ListingError::Config`] if it is not valid configuration TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let mut config: Self = toml::from_str(&raw)?;
        config.trace_file = config
            .trace_file
            .map(|p| infrastructure::expand_tilde(&p.to_string_lossy()));
        Ok(config)
    }

    /// Overlays `key=value` pairs on this configuration.
    ///
    /// Unknown keys are ignored and unparsable numbers keep the current value;
    /// both are logged. An empty value clears an optional field.
    #[must_use]
    pub fn merge(mut self, map: &BTreeMap<String, String>) -> Self {
        for (key, value) in map {
            let value = value.trim();
            let text = (!value.is_empty()).then(|| value.to_string());
            match key.as_str() {
                "api_base_url" => self.api_base_url = text,
                "request_timeout_secs" => {
                    self.request_timeout_secs = match text {
                        None => None,
                        Some(v) => v.parse().map_or_else(
                            |_| {
                                tracing::warn!(key = %key, value = %v, "invalid number in configuration, keeping previous value");
                                self.request_timeout_secs
                            },
                            Some,
                        ),
                    };
                }
                "course_preview_limit" => {
                    self.course_preview_limit = parse_or_keep(key, value, self.course_preview_limit);
                }
                "trace_level" => self.trace_level = text,
                "trace_file" => self.trace_file = text.map(|p| infrastructure::expand_tilde(&p)),
                "trace_max_bytes" => self.trace_max_bytes = parse_or_keep(key, value, self.trace_max_bytes),
                "trace_backups" => self.trace_backups = parse_or_keep(key, value, self.trace_backups),
                "category" => self.category = text,
                "search" => self.search = text,
                _ => tracing::warn!(key = %key, "ignoring unknown configuration key"),
            }
        }
        self
    }

    /// Enables trace export to [`infrastructure::default_trace_file`] unless a
    /// trace file is already configured.
    #[must_use]
    pub fn with_default_trace_file(mut self) -> Self {
        if self.trace_file.is_none() {
            self.trace_file = Some(infrastructure::default_trace_file());
        }
        self
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_or_keep<N: std::str::FromStr + Copy>(key: &str, value: &str, current: N) -> N {
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(key = %key, value = %value, "invalid number in configuration, keeping previous value");
        current
    })
}

/// Builds the data source selected by `config`: HTTP when `api_base_url` is
/// set, the demo fixtures otherwise.
#[must_use]
pub fn build_source(config: &Config) -> Arc<dyn DataSource> {
    match &config.api_base_url {
        Some(base_url) => {
            tracing::debug!(base_url = %base_url, "using HTTP data source");
            let source = HttpDataSource::new(base_url.clone());
            match config.request_timeout() {
                Some(timeout) => Arc::new(source.with_timeout(timeout)),
                None => Arc::new(source),
            }
        }
        None => {
            tracing::debug!("no api_base_url configured, using demo fixtures");
            Arc::new(FixtureSource::demo())
        }
    }
}
