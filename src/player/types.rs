//! Small playback types and handles shared between the event loop and the
//! liveness monitor.

use std::sync::{Arc, Mutex};

use super::controller::PlayerController;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Messages emitted by background threads toward the event loop, which is the
/// single place that issues playback transitions.
#[derive(Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The current track reached its natural end; advance to the next one.
    TrackFinished,
}

pub type SharedPlayer = Arc<Mutex<PlayerController>>;
