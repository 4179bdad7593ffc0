//! Pure computation of the visible subset of a collection.
//!
//! [`compute_visible`] is the whole filtering algorithm: a single pass over the
//! collection that keeps records passing both the category and the search
//! criterion, in their original order. It has no side effects and no caches, so
//! the controller simply calls it again after every change.

use super::model::{fold_case, FilterCriteria};
use crate::domain::Resource;

/// Returns whether `record` passes the category criterion.
///
/// `"all"` passes everything. Otherwise the record's category identifier must be
/// exactly equal (case-sensitive) to the selected category; records without a
/// category never match a specific one.
#[must_use]
pub fn matches_category<T: Resource>(record: &T, criteria: &FilterCriteria) -> bool {
    criteria.is_all_categories()
        || record
            .category()
            .is_some_and(|category| category == criteria.selected_category)
}

/// Returns whether `record` contains the (already normalized) search needle in
/// any of its search fields, ignoring case.
#[must_use]
pub fn matches_search<T: Resource>(record: &T, needle: &str) -> bool {
    needle.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| fold_case(field).contains(needle))
}

/// Computes the records visible under `criteria`.
///
/// The result is an order-preserving subsequence of `collection`. Calling it twice
/// with equal arguments yields equal output.
///
/// # Examples
///
/// ```
/// use edu_listing::app::{compute_visible, FilterCriteria};
/// use edu_listing::domain::School;
///
/// let schools = vec![
///     School::new("2", "Dubai Modern Academy", "DMA").with_location("Dubai", "UAE"),
///     School::new("3", "Jeddah Excellence School", "JES").with_location("Jeddah", "Saudi Arabia"),
/// ];
/// let visible = compute_visible(&schools, &FilterCriteria::new("all", "JEDDAH"));
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].id, "3");
/// ```
#[must_use]
pub fn compute_visible<T: Resource>(collection: &[T], criteria: &FilterCriteria) -> Vec<T> {
    let needle = criteria.normalized_search();

    collection
        .iter()
        .filter(|record| matches_category(*record, criteria) && matches_search(*record, &needle))
        .cloned()
        .collect()
}
