//! Event handling and state transition logic.
//!
//! [`handle_event`] is the one place listing state changes. It pattern-matches an
//! [`Event`], mutates the [`ListingState`] and returns whether a re-render is
//! needed together with the actions to execute.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`, `Dispose`
//! - **Criteria**: `SelectCategory`, `SearchInput`, `ClearFilters`
//! - **Loader**: `FetchResponse` carrying a generation-tagged outcome
//!
//! # Example
//!
//! ```rust
//! use edu_listing::app::{handle_event, Action, Event, ListingState};
//! use edu_listing::domain::School;
//!
//! let mut state: ListingState<School> = ListingState::new(None);
//! let (render, actions) = handle_event(&mut state, Event::Mount)?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::Fetch(_)));
//! # Ok::<(), edu_listing::ListingError>(())
//! ```

use super::actions::Action;
use super::model::FilterCriteria;
use super::state::ListingState;
use crate::domain::{Resource, Result};
use crate::loader::{FetchRequest, FetchResponse};

/// Events triggered by the UI or by completed fetch tasks.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<T> {
    /// Starts a fresh fetch cycle (initial mount or remount).
    Mount,
    /// Category selector clicked.
    SelectCategory(String),
    /// Search box content changed.
    SearchInput(String),
    /// Resets category and search to their defaults.
    ClearFilters,
    /// A fetch task finished.
    FetchResponse(FetchResponse<T>),
    /// The owning view was torn down.
    Dispose,
}

/// Processes one event and returns `(needs_render, actions)`.
///
/// Events arriving after `Dispose` are ignored. Fetch responses whose generation is
/// not the pending one are discarded without a render.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the handler signature stable for
/// transitions that may fail.
pub fn handle_event<T: Resource>(
    state: &mut ListingState<T>,
    event: Event<T>,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", kind = %T::KIND, event = event_name(&event)).entered();

    if state.is_disposed() {
        tracing::debug!("listing disposed, ignoring event");
        return Ok((false, vec![]));
    }

    match event {
        Event::Mount => {
            let generation = state.begin_fetch();
            Ok((
                true,
                vec![Action::Fetch(FetchRequest {
                    generation,
                    kind: T::KIND,
                })],
            ))
        }
        Event::SelectCategory(category) => {
            if state.criteria.selected_category == category {
                return Ok((false, vec![]));
            }
            tracing::debug!(category = %category, "category selected");
            state.set_category(category);
            Ok((true, vec![]))
        }
        Event::SearchInput(term) => {
            if state.criteria.search_term == term {
                return Ok((false, vec![]));
            }
            tracing::trace!(term = %term, "search term updated");
            state.set_search(term);
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            if state.criteria == FilterCriteria::default() {
                return Ok((false, vec![]));
            }
            state.clear_filters();
            Ok((true, vec![]))
        }
        Event::FetchResponse(response) => {
            let applied = match response {
                FetchResponse::Loaded { generation, records } => state.apply_loaded(generation, records),
                FetchResponse::Failed { generation, message } => state.apply_failed(generation, &message),
            };
            Ok((applied, vec![]))
        }
        Event::Dispose => {
            tracing::debug!(pending = state.has_pending_fetch(), "disposing listing");
            state.dispose();
            Ok((false, vec![Action::CancelInFlight]))
        }
    }
}

const fn event_name<T>(event: &Event<T>) -> &'static str {
    match event {
        Event::Mount => "mount",
        Event::SelectCategory(_) => "select_category",
        Event::SearchInput(_) => "search_input",
        Event::ClearFilters => "clear_filters",
        Event::FetchResponse(FetchResponse::Loaded { .. }) => "fetch_loaded",
        Event::FetchResponse(FetchResponse::Failed { .. }) => "fetch_failed",
        Event::Dispose => "dispose",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LoadStatus;
    use crate::domain::{Course, CourseType, ResourceKind, School};
    use crate::loader::Generation;

    fn mount<T: Resource>(state: &mut ListingState<T>) -> Generation {
        let (_, actions) = handle_event(state, Event::Mount).unwrap();
        match actions.as_slice() {
            [Action::Fetch(request)] => request.generation,
            other => panic!("expected a single fetch action, got {other:?}"),
        }
    }

    #[test]
    fn mount_requests_fetch_for_kind() {
        let mut state: ListingState<Course> = ListingState::new(Some(6));
        let (render, actions) = handle_event(&mut state, Event::Mount).unwrap();

        assert!(render);
        assert_eq!(
            actions,
            vec![Action::Fetch(FetchRequest {
                generation: Generation::new(1),
                kind: ResourceKind::Courses,
            })]
        );
        assert_eq!(state.status, LoadStatus::Loading);
    }

    #[test]
    fn remount_allocates_newer_generation() {
        let mut state: ListingState<School> = ListingState::new(None);
        let first = mount(&mut state);
        let second = mount(&mut state);
        assert!(second > first);
    }

    #[test]
    fn loaded_response_renders() {
        let mut state: ListingState<School> = ListingState::new(None);
        let generation = mount(&mut state);
        let records = vec![School::new("1", "Dubai Modern Academy", "DMA")];

        let (render, actions) = handle_event(
            &mut state,
            Event::FetchResponse(FetchResponse::Loaded { generation, records: records.clone() }),
        )
        .unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.collection, records);
    }

    #[test]
    fn stale_response_does_not_render() {
        let mut state: ListingState<School> = ListingState::new(None);
        let stale = mount(&mut state);
        mount(&mut state);

        let (render, _) = handle_event(
            &mut state,
            Event::FetchResponse(FetchResponse::Loaded {
                generation: stale,
                records: vec![School::new("a", "A", "A")],
            }),
        )
        .unwrap();

        assert!(!render);
        assert_eq!(state.status, LoadStatus::Loading);
    }

    #[test]
    fn unchanged_criteria_skip_render() {
        let mut state: ListingState<Course> = ListingState::new(None);
        let (render, _) = handle_event(&mut state, Event::SelectCategory("all".to_string())).unwrap();
        assert!(!render);

        let (render, _) = handle_event(&mut state, Event::SearchInput(String::new())).unwrap();
        assert!(!render);

        let (render, _) = handle_event(&mut state, Event::ClearFilters).unwrap();
        assert!(!render);
    }

    #[test]
    fn criteria_changes_recompute_visible() {
        let mut state: ListingState<Course> = ListingState::new(None);
        let generation = mount(&mut state);
        handle_event(
            &mut state,
            Event::FetchResponse(FetchResponse::Loaded {
                generation,
                records: vec![
                    Course::new("1", "A").with_type(CourseType::Ilt),
                    Course::new("2", "B").with_type(CourseType::Vilt),
                ],
            }),
        )
        .unwrap();

        let (render, _) = handle_event(&mut state, Event::SelectCategory("VILT".to_string())).unwrap();
        assert!(render);
        assert_eq!(state.visible.len(), 1);
        assert_eq!(state.visible[0].id, "2");
    }

    #[test]
    fn criteria_changed_while_loading_apply_to_result() {
        let mut state: ListingState<School> = ListingState::new(None);
        let generation = mount(&mut state);
        handle_event(&mut state, Event::SearchInput("jeddah".to_string())).unwrap();

        handle_event(
            &mut state,
            Event::FetchResponse(FetchResponse::Loaded {
                generation,
                records: vec![
                    School::new("2", "Dubai Modern Academy", "DMA").with_location("Dubai", "UAE"),
                    School::new("3", "Jeddah Excellence School", "JES").with_location("Jeddah", "Saudi Arabia"),
                ],
            }),
        )
        .unwrap();

        assert_eq!(state.visible.len(), 1);
        assert_eq!(state.visible[0].id, "3");
    }

    #[test]
    fn dispose_cancels_and_ignores_later_events() {
        let mut state: ListingState<School> = ListingState::new(None);
        let generation = mount(&mut state);

        let (render, actions) = handle_event(&mut state, Event::Dispose).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CancelInFlight]);

        let (render, actions) = handle_event(
            &mut state,
            Event::FetchResponse(FetchResponse::Loaded {
                generation,
                records: vec![School::new("a", "A", "A")],
            }),
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.collection.is_empty());

        let (_, actions) = handle_event(&mut state, Event::Mount).unwrap();
        assert!(actions.is_empty());
    }
}
