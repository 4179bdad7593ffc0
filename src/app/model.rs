//! Shared status and criteria types for the listing state machine.
//!
//! This module defines the load status of a listing and the user-controlled filter
//! criteria. Both are small value types: the status is only changed by the
//! controller when a fetch starts or resolves, and the criteria only by explicit
//! setter events.
//!
//! # State Machine
//!
//! ```text
//!   create ──► Loading ──fetch ok──► Ready
//!                 │  ▲
//!                 │  └──── Mount (fresh cycle) ◄── Ready | Failed
//!                 └────fetch err─► Failed
//! ```

/// Category identifier that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Lifecycle status of a listing's fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// A fetch is in flight, or none has resolved yet.
    #[default]
    Loading,
    /// The latest fetch succeeded.
    Ready,
    /// The latest fetch failed; the collection is empty.
    Failed,
}

impl LoadStatus {
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// A selectable category: wire identifier plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: &'static str,
    pub label: &'static str,
}

/// Categories offered by the course section's selector.
pub const COURSE_CATEGORIES: &[CategoryOption] = &[
    CategoryOption { id: ALL_CATEGORIES, label: "All Courses" },
    CategoryOption { id: "teaching", label: "Teaching Skills" },
    CategoryOption { id: "assessment", label: "Assessment" },
    CategoryOption { id: "leadership", label: "Leadership" },
    CategoryOption { id: "technology", label: "Technology" },
];

/// Looks up the display label for a course category identifier.
#[must_use]
pub fn category_label(id: &str) -> Option<&'static str> {
    COURSE_CATEGORIES
        .iter()
        .find(|option| option.id == id)
        .map(|option| option.label)
}

/// Case-folds one character to its first lowercase character.
///
/// Folding per character keeps character counts unchanged, so positions found
/// in folded text are valid positions in the original text.
#[must_use]
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Case-folds `text` with [`fold_char`].
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// User-selected filter criteria.
///
/// Owned by the caller; only changed through `SelectCategory`, `SearchInput` and
/// `ClearFilters` events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Selected category identifier, `"all"` by default.
    pub selected_category: String,
    /// Raw search text as typed. Trimmed when matching.
    pub search_term: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            selected_category: ALL_CATEGORIES.to_string(),
            search_term: String::new(),
        }
    }
}

impl FilterCriteria {
    #[must_use]
    pub fn new(selected_category: impl Into<String>, search_term: impl Into<String>) -> Self {
        Self {
            selected_category: selected_category.into(),
            search_term: search_term.into(),
        }
    }

    /// Whether every record passes the category criterion.
    #[must_use]
    pub fn is_all_categories(&self) -> bool {
        self.selected_category == ALL_CATEGORIES
    }

    /// Search needle: trimmed and lowercased. Empty means "match everything".
    #[must_use]
    pub fn normalized_search(&self) -> String {
        fold_case(self.search_term.trim())
    }

    /// Whether neither criterion narrows the collection.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.is_all_categories() && self.search_term.trim().is_empty()
    }
}
