use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::library::Track;

use super::backend::AudioBackend;
use super::types::{PlaybackStatus, SharedPlayer};

/// The playback state machine.
///
/// Owns the backend, the remembered current track and its position in the
/// filtered view, the status bits and the volume. All transitions run under
/// the `SharedPlayer` mutex, so only one writer is ever active. Backend
/// failures never escape: a failed load reverts the status to `Stopped` and
/// leaves a user-visible status line behind.
pub struct PlayerController {
    backend: Box<dyn AudioBackend>,
    simulated: bool,
    current: Option<Track>,
    current_index: Option<usize>,
    status: PlaybackStatus,
    volume: u8,
    advance_latched: bool,
    status_line: String,
}

impl PlayerController {
    pub fn new(backend: Box<dyn AudioBackend>, simulated: bool, volume: i32) -> Self {
        let mut controller = Self {
            backend,
            simulated,
            current: None,
            current_index: None,
            status: PlaybackStatus::Stopped,
            volume: 0,
            advance_latched: false,
            status_line: "Ready".to_string(),
        };
        controller.set_volume(volume);
        controller
    }

    pub fn shared(self) -> SharedPlayer {
        Arc::new(Mutex::new(self))
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn simulated(&self) -> bool {
        self.simulated
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Position of the current track in the current filtered view, or `None`
    /// when nothing is remembered or the track was filtered out.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    /// Load and start `track`, remembering `view_index` as its position in
    /// the filtered view. Restarts from the beginning when already playing.
    pub fn play(&mut self, track: &Track, view_index: Option<usize>) {
        self.advance_latched = false;
        self.current = Some(track.clone());
        self.current_index = view_index;

        match self.backend.load(&track.path) {
            Ok(()) => {
                self.backend.play();
                self.status = PlaybackStatus::Playing;
                let verb = if self.simulated { "Simulating" } else { "Playing" };
                self.status_line = format!("{verb}: {} - {}", track.artist, track.title);
            }
            Err(e) => {
                warn!("backend failed to start {}: {e}", track.path.display());
                self.backend.stop();
                self.status = PlaybackStatus::Stopped;
                self.status_line = format!("Error playing: {}", track.title);
            }
        }
    }

    /// Play/pause toggle.
    ///
    /// From `Stopped` this replays the remembered track from the beginning
    /// (not a resume), or falls back to `fallback` (the first view entry)
    /// when nothing was ever played.
    pub fn toggle(&mut self, fallback: Option<(&Track, usize)>) {
        match self.status {
            PlaybackStatus::Playing => {
                self.backend.pause();
                self.status = PlaybackStatus::Paused;
                self.status_line = "Paused".to_string();
            }
            PlaybackStatus::Paused => {
                self.backend.unpause();
                self.status = PlaybackStatus::Playing;
                self.status_line = "Resumed".to_string();
            }
            PlaybackStatus::Stopped => {
                if let Some(track) = self.current.clone() {
                    let index = self.current_index;
                    self.play(&track, index);
                } else if let Some((track, index)) = fallback {
                    self.play(track, Some(index));
                }
            }
        }
    }

    /// Stop playback. Idempotent: calling on `Stopped` changes nothing. The
    /// remembered track survives so `toggle` can replay it.
    pub fn stop(&mut self) {
        if self.status == PlaybackStatus::Stopped {
            return;
        }
        self.backend.stop();
        self.status = PlaybackStatus::Stopped;
        self.advance_latched = false;
        self.status_line = "Stopped".to_string();
    }

    /// Set volume, clamped to 0..=100. Applied to the backend regardless of
    /// playback status; in simulated mode the value is still recorded.
    pub fn set_volume(&mut self, volume: i32) {
        self.volume = volume.clamp(0, 100) as u8;
        self.backend.set_volume(self.volume as f32 / 100.0);
    }

    /// One-shot natural-end detection for the liveness monitor.
    ///
    /// Returns true at most once per played track: the signal latches until
    /// the next `play`/`stop` so a single completion can never trigger more
    /// than one advance.
    pub fn take_finished(&mut self) -> bool {
        if self.status != PlaybackStatus::Playing
            || self.advance_latched
            || self.backend.is_busy()
        {
            return false;
        }
        self.advance_latched = true;
        true
    }

    /// Re-resolve `current_index` against a freshly recomputed view by path
    /// lookup. Numeric indices from the previous view are never carried over.
    pub fn resync_view(&mut self, tracks: &[Track], view: &[usize]) {
        self.current_index = self.current.as_ref().and_then(|cur| {
            view.iter()
                .position(|&i| tracks.get(i).map(|t| t.path == cur.path).unwrap_or(false))
        });
    }
}
