//! Actions representing side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) only mutates [`ListingState`](super::ListingState);
//! anything that touches the outside world (starting or cancelling fetch tasks) is
//! returned as an [`Action`] and executed by the controller.

use crate::loader::FetchRequest;

/// Side effects to be executed by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Starts a fetch task for the given generation.
    Fetch(FetchRequest),

    /// Aborts every fetch task still in flight.
    ///
    /// Emitted on teardown so no response is applied after dispose.
    CancelInFlight,
}
