//! Filesystem locations for configuration and trace output.

use std::env;
use std::path::PathBuf;

/// File name of the trace export written when tracing to a file is enabled.
pub const TRACE_FILE_NAME: &str = "edu-listing-otlp.json";

/// Returns the data directory, `$XDG_DATA_HOME/edu-listing` or
/// `~/.local/share/edu-listing`.
///
/// Falls back to a relative `.edu-listing` directory when neither variable is set.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    if let Some(xdg) = env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join("edu-listing");
    }
    env::var_os("HOME").filter(|v| !v.is_empty()).map_or_else(
        || PathBuf::from(".edu-listing"),
        |home| PathBuf::from(home).join(".local/share/edu-listing"),
    )
}

/// Default location of the trace export file.
#[must_use]
pub fn default_trace_file() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Expands a leading `~` to `$HOME`.
///
/// Paths without a leading tilde, and all paths when `HOME` is unset, are
/// returned unchanged.
///
/// ```
/// use edu_listing::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/var/log/traces.json").to_str(), Some("/var/log/traces.json"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_with_home(path, env::var("HOME").ok().as_deref())
}

fn expand_with_home(path: &str, home: Option<&str>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => PathBuf::from(home),
        (p, Some(home)) if p.starts_with("~/") => PathBuf::from(home).join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
