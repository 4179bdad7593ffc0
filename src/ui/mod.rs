//! Rendering layer.
//!
//! Listing controllers hand a [`ViewState`] to this layer and never receive
//! anything back. The flow is one-directional:
//!
//! ```text
//! ListingState → view_state() → ViewState<T> → Card (per record) → TextRenderer
//! ```
//!
//! - [`viewmodel`]: view state, status messages and display cards with fallbacks
//! - [`renderer`]: plain-text card renderer
//! - [`helpers`]: HTML stripping, text previews and search highlighting

pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::TextRenderer;
pub use viewmodel::{Card, IntoCard, StatusMessage, ViewState};
