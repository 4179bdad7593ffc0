//! Resource loading: data sources and asynchronous fetch tasks.
//!
//! # Modules
//!
//! - `source`: the [`DataSource`] trait and the [`Loadable`] binding of record types
//! - `http`: `reqwest`-backed implementation
//! - `fixture`: in-memory demo catalogue
//! - `messages`: generation-tagged request/response types
//! - `handler`: spawning fetch tasks and reporting their outcome

pub mod fixture;
pub mod handler;
pub mod http;
pub mod messages;
pub mod source;

pub use fixture::FixtureSource;
pub use handler::{run_fetch, spawn_fetch};
pub use http::{decode_collection, HttpDataSource};
pub use messages::{FetchRequest, FetchResponse, Generation};
pub use source::{DataSource, Loadable};
