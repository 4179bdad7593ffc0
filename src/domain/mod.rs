//! Domain layer: resource records and errors.
//!
//! This module holds the record types the listing controller works with,
//! independent of how they are fetched or rendered.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`record`]: The [`Resource`] trait shared by all listable records
//! - [`course`]: Course model and delivery type
//! - [`school`]: School model and status
//!
//! # Examples
//!
//! ```
//! use edu_listing::domain::{Course, CourseType, Resource};
//!
//! let course = Course::new("1", "Digital Classrooms").with_type(CourseType::Vilt);
//! assert_eq!(course.category(), Some("VILT"));
//! ```

pub mod course;
pub mod error;
pub mod record;
pub mod school;

pub use course::{Course, CourseType};
pub use error::{ListingError, Result};
pub use record::{Resource, ResourceKind};
pub use school::{School, SchoolStatus};
