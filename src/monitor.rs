//! Liveness monitor.
//!
//! A background thread polls the player every tick and reports when the
//! current track reached its natural end. The monitor never mutates playback
//! state itself: it only forwards `PlayerEvent`s to the event loop, which is
//! the single writer for playback transitions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::player::{PlayerEvent, SharedPlayer};

const TICK: Duration = Duration::from_millis(100);

pub fn spawn_monitor(
    player: SharedPlayer,
    events: Sender<PlayerEvent>,
    shutdown: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while !shutdown.load(Ordering::Relaxed) {
            let finished = match player.lock() {
                Ok(mut p) => p.take_finished(),
                Err(_) => {
                    debug!("player mutex poisoned, monitor exiting");
                    break;
                }
            };
            if finished && events.send(PlayerEvent::TrackFinished).is_err() {
                break;
            }
            thread::sleep(TICK);
        }
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;
    use crate::library::Track;
    use crate::player::{AudioBackend, BackendError, PlayerController};

    /// Backend whose sink drains instantly, as if every track were zero
    /// seconds long.
    struct InstantDone;

    impl AudioBackend for InstantDone {
        fn load(&mut self, _path: &Path) -> Result<(), BackendError> {
            Ok(())
        }
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn unpause(&mut self) {}
        fn stop(&mut self) {}
        fn set_volume(&mut self, _volume: f32) {}
        fn is_busy(&self) -> bool {
            false
        }
    }

    fn track() -> Track {
        Track {
            track_number: String::new(),
            title: "Short".into(),
            artist: "Artist".into(),
            album: "Album".into(),
            duration: "0:00".into(),
            year: String::new(),
            genre: String::new(),
            bitrate: String::new(),
            path: PathBuf::from("/music/short.mp3"),
        }
    }

    #[test]
    fn reports_a_finished_track_exactly_once() {
        let player = PlayerController::new(Box::new(InstantDone), false, 80).shared();
        player.lock().unwrap().play(&track(), Some(0));

        let (tx, rx) = mpsc::channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let handle = spawn_monitor(player.clone(), tx, shutdown.clone());

        assert_eq!(
            rx.recv_timeout(Duration::from_secs(2)),
            Ok(PlayerEvent::TrackFinished)
        );
        // The signal is latched: no duplicate while nothing new is played.
        assert!(rx.recv_timeout(Duration::from_millis(350)).is_err());

        shutdown.store(true, Ordering::Relaxed);
        handle.join().unwrap();
    }

    #[test]
    fn stays_quiet_while_stopped() {
        let player = PlayerController::new(Box::new(InstantDone), false, 80).shared();

        let (tx, rx) = mpsc::channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let handle = spawn_monitor(player.clone(), tx, shutdown.clone());

        assert!(rx.recv_timeout(Duration::from_millis(350)).is_err());

        shutdown.store(true, Ordering::Relaxed);
        handle.join().unwrap();
    }

    #[test]
    fn shuts_down_promptly_on_request() {
        let player = PlayerController::new(Box::new(InstantDone), false, 80).shared();

        let (tx, _rx) = mpsc::channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let handle = spawn_monitor(player, tx, shutdown.clone());

        shutdown.store(true, Ordering::Relaxed);
        handle.join().unwrap();
    }
}
