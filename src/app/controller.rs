//! Listing controller: event dispatch plus fetch task management.
//!
//! [`ListingController`] ties a [`ListingState`] to a [`DataSource`] handle. UI code
//! calls its setters; fetches run as tokio tasks whose responses come back over an
//! unbounded channel and are applied by [`ListingController::next_update`]. All
//! state changes go through [`handle_event`], on the task that owns the controller.
//!
//! # Example
//!
//! ```rust
//! use edu_listing::app::{ListingController, LoadStatus};
//! use edu_listing::loader::FixtureSource;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> edu_listing::Result<()> {
//! let mut schools = ListingController::school_directory(Arc::new(FixtureSource::demo()));
//! schools.mount()?;
//! schools.settle().await?;
//! schools.set_search("jeddah")?;
//!
//! let view = schools.view_state();
//! assert_eq!(view.status, LoadStatus::Ready);
//! assert_eq!(view.visible_items[0].name, "Jeddah Excellence School");
//! # Ok(())
//! # }
//! ```

use super::actions::Action;
use super::handler::{handle_event, Event};
use super::state::ListingState;
use crate::domain::{Course, Result, School};
use crate::loader::{spawn_fetch, DataSource, FetchResponse, Loadable};
use crate::ui::viewmodel::ViewState;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Default number of courses shown by the course preview section.
pub const DEFAULT_COURSE_PREVIEW_LIMIT: usize = 6;

/// Controller for one listing section.
///
/// Must be driven from within a tokio runtime: [`mount`](Self::mount) spawns the
/// fetch task. Dropping the controller aborts fetches still in flight.
pub struct ListingController<T: Loadable> {
    state: ListingState<T>,
    source: Arc<dyn DataSource>,
    responses_tx: UnboundedSender<FetchResponse<T>>,
    responses_rx: UnboundedReceiver<FetchResponse<T>>,
    in_flight: Vec<JoinHandle<()>>,
}

impl ListingController<Course> {
    /// Course preview: keeps the first `limit` courses of each fetch.
    #[must_use]
    pub fn course_preview(source: Arc<dyn DataSource>, limit: usize) -> Self {
        Self::new(source, Some(limit))
    }
}

impl ListingController<School> {
    /// School directory: all schools, narrowed by search.
    #[must_use]
    pub fn school_directory(source: Arc<dyn DataSource>) -> Self {
        Self::new(source, None)
    }
}

impl<T: Loadable> ListingController<T> {
    /// Creates a controller in `Loading` status. Nothing is fetched until
    /// [`mount`](Self::mount).
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>, preview_limit: Option<usize>) -> Self {
        let (responses_tx, responses_rx) = mpsc::unbounded_channel();
        Self {
            state: ListingState::new(preview_limit),
            source,
            responses_tx,
            responses_rx,
            in_flight: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ListingState<T> {
        &self.state
    }

    /// Snapshot for the rendering layer.
    #[must_use]
    pub fn view_state(&self) -> ViewState<T> {
        self.state.view_state()
    }

    /// Processes an event and executes the resulting actions.
    ///
    /// Returns whether the view needs to be re-rendered.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn dispatch(&mut self, event: Event<T>) -> Result<bool> {
        let (render, actions) = handle_event(&mut self.state, event)?;
        for action in actions {
            self.execute(action);
        }
        Ok(render)
    }

    /// Starts a fresh fetch cycle. A fetch already in flight is aborted.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn mount(&mut self) -> Result<bool> {
        self.dispatch(Event::Mount)
    }

    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn select_category(&mut self, category: impl Into<String>) -> Result<bool> {
        self.dispatch(Event::SelectCategory(category.into()))
    }

    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn set_search(&mut self, term: impl Into<String>) -> Result<bool> {
        self.dispatch(Event::SearchInput(term.into()))
    }

    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn clear_filters(&mut self) -> Result<bool> {
        self.dispatch(Event::ClearFilters)
    }

    /// Tears the listing down: aborts in-flight fetches and ignores later responses.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn dispose(&mut self) -> Result<bool> {
        self.dispatch(Event::Dispose)
    }

    /// Waits for the next fetch response and applies it.
    ///
    /// Returns `Ok(None)` when no fetch task is outstanding and no response is
    /// queued, otherwise whether the applied response needs a render (stale
    /// responses yield `Some(false)`). A fetch that never resolves makes this wait
    /// forever; no timeout is imposed here.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub async fn next_update(&mut self) -> Result<Option<bool>> {
        let response = match self.responses_rx.try_recv() {
            Ok(response) => response,
            Err(_) => {
                self.in_flight.retain(|handle| !handle.is_finished());
                if self.in_flight.is_empty() {
                    // A task that finished after the first poll has already sent.
                    match self.responses_rx.try_recv() {
                        Ok(response) => return self.dispatch(Event::FetchResponse(response)).map(Some),
                        Err(_) => return Ok(None),
                    }
                }
                match self.responses_rx.recv().await {
                    Some(response) => response,
                    None => return Ok(None),
                }
            }
        };

        self.dispatch(Event::FetchResponse(response)).map(Some)
    }

    /// Applies responses until no fetch task is outstanding.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub async fn settle(&mut self) -> Result<()> {
        while self.next_update().await?.is_some() {}
        Ok(())
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::Fetch(request) => {
                // Earlier generations can no longer be applied.
                self.abort_in_flight();
                let handle = spawn_fetch::<T>(Arc::clone(&self.source), request, self.responses_tx.clone());
                self.in_flight.push(handle);
            }
            Action::CancelInFlight => self.abort_in_flight(),
        }
    }

    /// Aborts every fetch task and drops responses already queued.
    fn abort_in_flight(&mut self) {
        if !self.in_flight.is_empty() {
            tracing::debug!(tasks = self.in_flight.len(), "aborting in-flight fetches");
        }
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
        while self.responses_rx.try_recv().is_ok() {}
    }
}

impl<T: Loadable> Drop for ListingController<T> {
    fn drop(&mut self) {
        for handle in &self.in_flight {
            handle.abort();
        }
    }
}

impl<T: Loadable> std::fmt::Debug for ListingController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingController")
            .field("state", &self.state)
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}
