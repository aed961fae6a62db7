//! Interaction state for boxes on the canvas.
//!
//! Boxes stay plain data; this module describes the gesture a box is in
//! and where its resize handle sits.

mod handles;
mod state;

pub use handles::{HANDLE_SIZE, Handle};
pub use state::InteractionMode;
