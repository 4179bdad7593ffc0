//! View models handed to the rendering layer.
//!
//! [`ViewState`] is the complete output of a listing controller: status, visible
//! records and the empty flag. [`Card`] is the display-ready form of one record,
//! with every fallback value already substituted, so renderers never need to know
//! which fields a record may be missing.

use crate::app::model::{category_label, FilterCriteria, LoadStatus};
use crate::domain::{Course, ResourceKind, School};
use crate::ui::helpers::{highlight_ranges, preview_text, strip_html};
use chrono::{DateTime, Utc};

/// Characters of a course summary shown on its card.
const SUMMARY_PREVIEW_CHARS: usize = 120;

/// Tags shown on a course card.
const MAX_CARD_TAGS: usize = 2;

const FALLBACK_COURSE_TITLE: &str = "Untitled course";
const FALLBACK_COURSE_SUMMARY: &str =
    "Comprehensive training program designed to enhance your professional skills.";
const FALLBACK_COURSE_TYPE: &str = "Self-paced";
const FALLBACK_SCHOOL_NAME: &str = "Unnamed school";

/// Derived output of a listing, consumed by rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub kind: ResourceKind,
    pub status: LoadStatus,
    /// Records to paint, in collection order.
    pub visible_items: Vec<T>,
    /// `true` only for a `Ready` listing with nothing visible.
    pub is_empty: bool,
    /// Criteria the items were filtered with.
    pub criteria: FilterCriteria,
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Message shown in place of the card grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Primary message (e.g. "No schools found").
    pub message: String,
    /// Secondary explanatory text.
    pub subtitle: String,
}

impl<T> ViewState<T> {
    /// Message for the loading, failed and empty states; `None` when there are
    /// cards to show.
    #[must_use]
    pub fn status_message(&self) -> Option<StatusMessage> {
        let noun = self.kind.noun();
        match self.status {
            LoadStatus::Loading => Some(StatusMessage {
                message: format!("Loading {noun}..."),
                subtitle: String::new(),
            }),
            LoadStatus::Failed => Some(StatusMessage {
                message: format!("Couldn't load {noun}"),
                subtitle: "Check your connection and try again".to_string(),
            }),
            LoadStatus::Ready if self.is_empty => Some(StatusMessage {
                message: format!("No {noun} found"),
                subtitle: if self.criteria.is_unfiltered() {
                    format!("There are no {noun} to show yet")
                } else {
                    "Try adjusting your search criteria".to_string()
                },
            }),
            LoadStatus::Ready => None,
        }
    }

    /// Header title, e.g. `"Schools (3)"` or `"Courses · Technology (0)"`.
    #[must_use]
    pub fn title(&self) -> String {
        let mut title = match self.kind {
            ResourceKind::Courses => "Courses".to_string(),
            ResourceKind::Schools => "Schools".to_string(),
        };
        if !self.criteria.is_all_categories() {
            let label = category_label(&self.criteria.selected_category)
                .unwrap_or(self.criteria.selected_category.as_str());
            title.push_str(" · ");
            title.push_str(label);
        }
        if self.status == LoadStatus::Ready {
            title.push_str(&format!(" ({})", self.visible_items.len()));
        }
        title
    }
}

/// Display-ready form of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub title: String,
    /// Secondary line under the title (short name for schools).
    pub subtitle: Option<String>,
    /// Badge text (course type or school status).
    pub badge: String,
    pub body: Option<String>,
    /// Short facts such as location, tags and counts.
    pub details: Vec<String>,
    /// Character ranges of the search term within `title`.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Conversion of a record into a [`Card`].
pub trait IntoCard {
    /// Builds the card, highlighting `search_term` in the title.
    fn to_card(&self, search_term: &str) -> Card;
}

impl IntoCard for Course {
    fn to_card(&self, search_term: &str) -> Card {
        let title = if self.title.trim().is_empty() {
            FALLBACK_COURSE_TITLE.to_string()
        } else {
            self.title.clone()
        };

        let summary = strip_html(&self.summary);
        let body = if summary.trim().is_empty() {
            FALLBACK_COURSE_SUMMARY.to_string()
        } else {
            preview_text(summary.trim(), SUMMARY_PREVIEW_CHARS)
        };

        let badge = self
            .course_type
            .as_ref()
            .map_or(FALLBACK_COURSE_TYPE, |t| t.as_str())
            .to_string();

        let details = self
            .tags
            .iter()
            .take(MAX_CARD_TAGS)
            .map(|tag| format!("#{tag}"))
            .collect();

        Card {
            id: self.id.clone(),
            highlight_ranges: highlight_ranges(&title, search_term),
            title,
            subtitle: None,
            badge,
            body: Some(body),
            details,
        }
    }
}

impl IntoCard for School {
    fn to_card(&self, search_term: &str) -> Card {
        let title = if self.name.trim().is_empty() {
            FALLBACK_SCHOOL_NAME.to_string()
        } else {
            self.name.clone()
        };

        let mut details = Vec::new();
        match (&self.city, &self.country) {
            (Some(city), Some(country)) => details.push(format!("{city}, {country}")),
            (Some(place), None) | (None, Some(place)) => details.push(place.clone()),
            (None, None) => {}
        }
        if let Some(users) = self.user_count {
            details.push(format!("{users} users"));
        }
        if let Some(courses) = self.course_count {
            details.push(format!("{courses} courses"));
        }

        Card {
            id: self.id.clone(),
            highlight_ranges: highlight_ranges(&title, search_term),
            title,
            subtitle: (!self.short_name.is_empty()).then(|| self.short_name.clone()),
            badge: self.status.as_str().to_string(),
            body: self.description.clone(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CourseType, SchoolStatus};

    fn view<T>(kind: ResourceKind, status: LoadStatus, items: Vec<T>, criteria: FilterCriteria) -> ViewState<T> {
        let is_empty = status == LoadStatus::Ready && items.is_empty();
        ViewState {
            kind,
            status,
            visible_items: items,
            is_empty,
            criteria,
            loaded_at: None,
        }
    }

    #[test]
    fn three_distinct_status_messages() {
        let loading = view::<School>(ResourceKind::Schools, LoadStatus::Loading, vec![], FilterCriteria::default());
        let failed = view::<School>(ResourceKind::Schools, LoadStatus::Failed, vec![], FilterCriteria::default());
        let empty = view::<School>(
            ResourceKind::Schools,
            LoadStatus::Ready,
            vec![],
            FilterCriteria::new("all", "zzz"),
        );

        let messages: Vec<String> = [loading, failed, empty]
            .iter()
            .map(|v| v.status_message().unwrap().message)
            .collect();
        assert_eq!(messages, vec!["Loading schools...", "Couldn't load schools", "No schools found"]);
    }

    #[test]
    fn ready_with_items_has_no_message() {
        let ready = view(
            ResourceKind::Schools,
            LoadStatus::Ready,
            vec![School::new("1", "A", "B")],
            FilterCriteria::default(),
        );
        assert!(ready.status_message().is_none());
        assert_eq!(ready.title(), "Schools (1)");
    }

    #[test]
    fn title_shows_category_label() {
        let ready = view::<Course>(
            ResourceKind::Courses,
            LoadStatus::Ready,
            vec![],
            FilterCriteria::new("technology", ""),
        );
        assert_eq!(ready.title(), "Courses · Technology (0)");
    }

    #[test]
    fn course_card_uses_fallbacks() {
        let card = Course::new("9", "  ").to_card("");
        assert_eq!(card.title, FALLBACK_COURSE_TITLE);
        assert_eq!(card.badge, "Self-paced");
        assert_eq!(card.body.as_deref(), Some(FALLBACK_COURSE_SUMMARY));
    }

    #[test]
    fn course_card_strips_summary_and_limits_tags() {
        let course = Course::new("1", "Leading Teams")
            .with_type(CourseType::Vilt)
            .with_summary("<p>Build trust</p>")
            .with_tags(["leadership", "teams", "k12"]);
        let card = course.to_card("teams");

        assert_eq!(card.badge, "VILT");
        assert_eq!(card.body.as_deref(), Some("Build trust..."));
        assert_eq!(card.details, vec!["#leadership", "#teams"]);
        assert_eq!(card.highlight_ranges, vec![(8, 13)]);
    }

    #[test]
    fn school_card_shows_location_status_and_counts() {
        let school = School::new("4", "Abu Dhabi Future School", "ADFS")
            .with_location("Abu Dhabi", "UAE")
            .with_counts(180, 28)
            .with_status(SchoolStatus::Inactive);
        let card = school.to_card("");

        assert_eq!(card.subtitle.as_deref(), Some("ADFS"));
        assert_eq!(card.badge, "inactive");
        assert_eq!(card.details, vec!["Abu Dhabi, UAE", "180 users", "28 courses"]);
        assert!(card.highlight_ranges.is_empty());
    }

    #[test]
    fn cards_are_deterministic() {
        let school = School::new("2", "Dubai Modern Academy", "DMA").with_counts(200, 30);
        assert_eq!(school.to_card("dubai"), school.to_card("dubai"));
    }
}
