//! Host environment helpers.
//!
//! - [`paths`]: home-directory expansion and default file locations

pub mod paths;

pub use paths::{default_trace_file, expand_tilde, get_data_dir};
