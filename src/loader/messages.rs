//! Request and response types exchanged between the controller and fetch tasks.
//!
//! Every fetch carries the [`Generation`] token allocated when it was started. The
//! response echoes it back, which is how the controller recognises responses that
//! were superseded by a newer fetch or arrived after teardown.

use crate::domain::ResourceKind;
use std::fmt;

/// Monotonic token identifying one fetch attempt of one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Request to fetch one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: Generation,
    pub kind: ResourceKind,
}

/// Outcome of a fetch task, reported back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResponse<T> {
    /// The data source returned a collection.
    Loaded {
        generation: Generation,
        records: Vec<T>,
    },

    /// The data source failed.
    Failed {
        generation: Generation,
        /// Human-readable error message.
        message: String,
    },
}

impl<T> FetchResponse<T> {
    #[must_use]
    pub const fn generation(&self) -> Generation {
        match self {
            Self::Loaded { generation, .. } | Self::Failed { generation, .. } => *generation,
        }
    }
}
