//! Application layer: listing state machine, filtering and controller.
//!
//! The layer follows a unidirectional data flow:
//!
//! ```text
//! UI setters / fetch responses → Event → handle_event → ListingState → Action
//!                                   ↑                                   ↓
//!                                   └──────── fetch task (loader) ──────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the handler
//! - [`controller`]: owns state, data-source handle and fetch tasks
//! - [`filter`]: the pure `compute_visible` algorithm
//! - [`handler`]: event processing
//! - [`model`]: load status and filter criteria
//! - [`state`]: listing state and view state snapshot

pub mod actions;
pub mod controller;
pub mod filter;
pub mod handler;
pub mod model;
pub mod state;

pub use actions::Action;
pub use controller::{ListingController, DEFAULT_COURSE_PREVIEW_LIMIT};
pub use filter::compute_visible;
pub use handler::{handle_event, Event};
pub use model::{category_label, CategoryOption, FilterCriteria, LoadStatus, ALL_CATEGORIES, COURSE_CATEGORIES};
pub use state::ListingState;
