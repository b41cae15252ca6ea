//! Playback: the backend abstraction, the controller state machine and the
//! shared handle types used across threads.

mod backend;
mod controller;
mod types;

pub use backend::{AudioBackend, BackendError, NullBackend, RodioBackend};
pub use controller::PlayerController;
pub use types::{PlaybackStatus, PlayerEvent, SharedPlayer};
