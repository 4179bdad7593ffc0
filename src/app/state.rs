//! Listing state and view state computation.
//!
//! This module defines [`ListingState`], the single source of truth for one listing
//! section: the loaded collection, the filter criteria, the load status and the
//! derived visible subset. It also tracks fetch generations so that only the most
//! recently started fetch may change the collection.
//!
//! # State Components
//!
//! - **Collection**: records from the latest applied fetch, already truncated to
//!   the preview limit
//! - **Visible**: `compute_visible(collection, criteria)`, refreshed after every
//!   change to either input
//! - **Status**: `Loading` until the pending fetch resolves
//! - **Generations**: the pending fetch's token; responses carrying any other
//!   token are stale
//!
//! # Example
//!
//! ```rust
//! use edu_listing::app::{ListingState, LoadStatus};
//! use edu_listing::domain::School;
//!
//! let mut state: ListingState<School> = ListingState::new(None);
//! let generation = state.begin_fetch();
//! state.apply_loaded(generation, vec![School::new("1", "Dubai Modern Academy", "DMA")]);
//! assert_eq!(state.status, LoadStatus::Ready);
//! ```

use super::filter::compute_visible;
use super::model::{FilterCriteria, LoadStatus};
use crate::domain::Resource;
use crate::loader::Generation;
use crate::ui::viewmodel::ViewState;
use chrono::{DateTime, Utc};

/// State of one listing section.
#[derive(Debug, Clone)]
pub struct ListingState<T: Resource> {
    /// Records from the most recently applied fetch, in API order.
    pub collection: Vec<T>,

    /// Records passing the current criteria. Never mutated directly.
    pub visible: Vec<T>,

    /// Current filter criteria.
    pub criteria: FilterCriteria,

    /// Load status of the current fetch cycle.
    pub status: LoadStatus,

    /// When set, a successful fetch keeps only the first `n` records.
    pub preview_limit: Option<usize>,

    /// Time the latest response was applied.
    pub loaded_at: Option<DateTime<Utc>>,

    next_generation: u64,
    pending: Option<Generation>,
    disposed: bool,
}

impl<T: Resource> ListingState<T> {
    /// Creates an empty state in `Loading` status with default criteria.
    #[must_use]
    pub fn new(preview_limit: Option<usize>) -> Self {
        Self {
            collection: Vec::new(),
            visible: Vec::new(),
            criteria: FilterCriteria::default(),
            status: LoadStatus::Loading,
            preview_limit,
            loaded_at: None,
            next_generation: 0,
            pending: None,
            disposed: false,
        }
    }

    /// Starts a fresh fetch cycle and returns its generation token.
    ///
    /// Any fetch started earlier becomes stale. The previous collection is cleared so
    /// the loading view never shows records from an older cycle.
    pub fn begin_fetch(&mut self) -> Generation {
        self.next_generation += 1;
        let generation = Generation::new(self.next_generation);

        self.pending = Some(generation);
        self.status = LoadStatus::Loading;
        self.collection.clear();
        self.visible.clear();

        tracing::debug!(kind = %T::KIND, generation = %generation, "fetch cycle started");
        generation
    }

    /// Whether a response for `generation` may still be applied.
    #[must_use]
    pub fn accepts(&self, generation: Generation) -> bool {
        !self.disposed && self.pending == Some(generation)
    }

    /// Whether a fetch has been started and not yet resolved.
    #[must_use]
    pub const fn has_pending_fetch(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Applies a successful fetch. Returns `false` if the response was stale.
    pub fn apply_loaded(&mut self, generation: Generation, mut records: Vec<T>) -> bool {
        if !self.accepts(generation) {
            tracing::debug!(
                kind = %T::KIND,
                generation = %generation,
                disposed = self.disposed,
                "discarding stale fetch response"
            );
            return false;
        }

        let received = records.len();
        if let Some(limit) = self.preview_limit {
            records.truncate(limit);
        }

        self.collection = records;
        self.status = LoadStatus::Ready;
        self.pending = None;
        self.loaded_at = Some(Utc::now());
        self.recompute();

        tracing::debug!(
            kind = %T::KIND,
            generation = %generation,
            received,
            kept = self.collection.len(),
            "collection loaded"
        );
        true
    }

    /// Applies a failed fetch. Returns `false` if the response was stale.
    ///
    /// The failure is logged here and not propagated: the listing moves to
    /// `Failed` with an empty collection.
    pub fn apply_failed(&mut self, generation: Generation, message: &str) -> bool {
        if !self.accepts(generation) {
            tracing::debug!(
                kind = %T::KIND,
                generation = %generation,
                "discarding stale fetch failure"
            );
            return false;
        }

        tracing::error!(kind = %T::KIND, generation = %generation, error = %message, "fetch failed");

        self.collection.clear();
        self.status = LoadStatus::Failed;
        self.pending = None;
        self.loaded_at = Some(Utc::now());
        self.recompute();
        true
    }

    /// Sets the selected category and recomputes the visible records.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.criteria.selected_category = category.into();
        self.recompute();
    }

    /// Sets the search term and recomputes the visible records.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
        self.recompute();
    }

    /// Resets both criteria to their defaults.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.recompute();
    }

    /// Marks the listing as torn down. Later responses are discarded.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.pending = None;
    }

    /// Recomputes `visible` from the collection and criteria.
    pub fn recompute(&mut self) {
        let _span = tracing::debug_span!("recompute_visible",
            kind = %T::KIND,
            total = self.collection.len(),
            category = %self.criteria.selected_category,
            search_len = self.criteria.search_term.len()
        )
        .entered();

        self.visible = compute_visible(&self.collection, &self.criteria);

        tracing::debug!(visible = self.visible.len(), "visible records recomputed");
    }

    /// Whether a settled, successful load produced no visible records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status == LoadStatus::Ready && self.visible.is_empty()
    }

    /// Snapshot handed to the rendering layer.
    #[must_use]
    pub fn view_state(&self) -> ViewState<T> {
        ViewState {
            kind: T::KIND,
            status: self.status,
            visible_items: self.visible.clone(),
            is_empty: self.is_empty(),
            criteria: self.criteria.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Course, CourseType, School};

    fn ten_courses() -> Vec<Course> {
        (1..=10)
            .map(|n| Course::new(n.to_string(), format!("Course {n}")).with_type(CourseType::Ilt))
            .collect()
    }

    #[test]
    fn starts_loading_and_unfiltered() {
        let state: ListingState<Course> = ListingState::new(Some(6));
        assert_eq!(state.status, LoadStatus::Loading);
        assert!(state.collection.is_empty());
        assert!(!state.is_empty());
        assert!(state.criteria.is_unfiltered());
    }

    #[test]
    fn success_stores_collection_in_order() {
        let mut state: ListingState<Course> = ListingState::new(None);
        let generation = state.begin_fetch();
        let courses = ten_courses();

        assert!(state.apply_loaded(generation, courses.clone()));
        assert_eq!(state.status, LoadStatus::Ready);
        assert_eq!(state.collection, courses);
        assert_eq!(state.visible, courses);
        assert!(state.loaded_at.is_some());
    }

    #[test]
    fn preview_limit_keeps_first_records() {
        let mut state: ListingState<Course> = ListingState::new(Some(6));
        let generation = state.begin_fetch();
        state.apply_loaded(generation, ten_courses());

        let ids: Vec<&str> = state.collection.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
        assert_eq!(state.visible.len(), 6);
    }

    #[test]
    fn truncation_happens_before_filtering() {
        let mut courses = ten_courses();
        courses[8] = Course::new("9", "Late VILT").with_type(CourseType::Vilt);

        let mut state: ListingState<Course> = ListingState::new(Some(6));
        let generation = state.begin_fetch();
        state.apply_loaded(generation, courses);
        state.set_category("VILT");

        assert!(state.visible.is_empty());
        assert!(state.is_empty());
    }

    #[test]
    fn failure_empties_collection() {
        let mut state: ListingState<School> = ListingState::new(None);
        let generation = state.begin_fetch();

        assert!(state.apply_failed(generation, "connection refused"));
        assert_eq!(state.status, LoadStatus::Failed);
        assert!(state.collection.is_empty());
        assert!(!state.is_empty(), "failed is distinct from empty");
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut state: ListingState<School> = ListingState::new(None);
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        assert!(state.apply_loaded(second, vec![School::new("b", "B", "B")]));
        assert!(!state.apply_loaded(first, vec![School::new("a", "A", "A")]));
        assert_eq!(state.collection[0].id, "b");
    }

    #[test]
    fn resolved_generation_cannot_be_applied_twice() {
        let mut state: ListingState<School> = ListingState::new(None);
        let generation = state.begin_fetch();
        assert!(state.apply_loaded(generation, vec![School::new("a", "A", "A")]));
        assert!(!state.apply_failed(generation, "late duplicate"));
        assert_eq!(state.status, LoadStatus::Ready);
    }

    #[test]
    fn disposed_state_ignores_responses() {
        let mut state: ListingState<School> = ListingState::new(None);
        let generation = state.begin_fetch();
        state.dispose();

        assert!(!state.apply_loaded(generation, vec![School::new("a", "A", "A")]));
        assert_eq!(state.status, LoadStatus::Loading);
        assert!(state.collection.is_empty());
    }

    #[test]
    fn empty_search_result_reports_is_empty() {
        let mut state: ListingState<School> = ListingState::new(None);
        let generation = state.begin_fetch();
        state.apply_loaded(
            generation,
            vec![School::new("2", "Dubai Modern Academy", "DMA").with_location("Dubai", "UAE")],
        );
        state.set_search("zzz");

        let view = state.view_state();
        assert!(view.visible_items.is_empty());
        assert!(view.is_empty);
        assert_eq!(view.status, LoadStatus::Ready);
    }

    #[test]
    fn clear_filters_restores_collection() {
        let mut state: ListingState<Course> = ListingState::new(None);
        let generation = state.begin_fetch();
        state.apply_loaded(generation, ten_courses());
        state.set_category("VILT");
        state.set_search("course");
        assert!(state.visible.is_empty());

        state.clear_filters();
        assert_eq!(state.visible, state.collection);
    }

    #[test]
    fn new_cycle_clears_previous_collection() {
        let mut state: ListingState<Course> = ListingState::new(None);
        let generation = state.begin_fetch();
        state.apply_loaded(generation, ten_courses());

        state.begin_fetch();
        assert_eq!(state.status, LoadStatus::Loading);
        assert!(state.collection.is_empty());
        assert!(state.visible.is_empty());
    }
}
