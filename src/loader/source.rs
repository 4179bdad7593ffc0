//! Data-access abstraction.
//!
//! This module defines the [`DataSource`] trait the controller fetches through. A
//! handle is passed explicitly to every controller, so tests substitute their own
//! implementation instead of relying on a global client.
//!
//! # Implementations
//!
//! - [`HttpDataSource`](super::HttpDataSource): JSON over HTTP via `reqwest`
//! - [`FixtureSource`](super::FixtureSource): built-in demo catalogue

use crate::domain::{Course, Resource, Result, School};
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::sync::Arc;

/// Asynchronous access to the course and school collections.
///
/// Implementations must return records in the order the backend provides them,
/// must not mutate their inputs and must be safe to call repeatedly.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches all courses.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status or a payload
    /// that is not a JSON array.
    async fn fetch_courses(&self) -> Result<Vec<Course>>;

    /// Fetches all schools.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status or a payload
    /// that is not a JSON array.
    async fn fetch_schools(&self) -> Result<Vec<School>>;
}

/// A resource type that knows which [`DataSource`] call produces it.
pub trait Loadable: Resource {
    /// Fetches the full collection of `Self` from `source`.
    fn fetch_from(source: Arc<dyn DataSource>) -> BoxFuture<'static, Result<Vec<Self>>>;
}

impl Loadable for Course {
    fn fetch_from(source: Arc<dyn DataSource>) -> BoxFuture<'static, Result<Vec<Self>>> {
        Box::pin(async move { source.fetch_courses().await })
    }
}

impl Loadable for School {
    fn fetch_from(source: Arc<dyn DataSource>) -> BoxFuture<'static, Result<Vec<Self>>> {
        Box::pin(async move { source.fetch_schools().await })
    }
}
