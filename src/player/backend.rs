//! Audio backend boundary.
//!
//! `RodioBackend` drives a real output device from a dedicated sink thread
//! (cpal streams are not `Send`, so the stream lives where it was created and
//! is talked to over a channel). `NullBackend` is the simulated fallback used
//! when no output device exists: state transitions still happen, nothing
//! plays.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("audio thread is not responding")]
    Unavailable,
}

/// The capability consumed by the playback controller.
///
/// `load` prepares a paused source; `is_busy` reports whether a loaded source
/// still has audio to render (the natural end-of-track signal goes false).
pub trait AudioBackend: Send {
    fn load(&mut self, path: &Path) -> Result<(), BackendError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn unpause(&mut self);
    fn stop(&mut self);
    /// Volume in the backend's native 0.0..=1.0 range.
    fn set_volume(&mut self, volume: f32);
    fn is_busy(&self) -> bool;
}

enum SinkCmd {
    Load(PathBuf, Sender<Result<(), BackendError>>),
    Play,
    Pause,
    Unpause,
    Stop,
    SetVolume(f32),
    Quit,
}

pub struct RodioBackend {
    tx: Sender<SinkCmd>,
    busy: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl RodioBackend {
    /// Open the default output device. Returns `None` when no device is
    /// available so callers can degrade to the simulated backend.
    pub fn open() -> Option<Self> {
        let (tx, rx) = mpsc::channel::<SinkCmd>();
        let (ready_tx, ready_rx) = mpsc::channel::<bool>();
        let busy = Arc::new(AtomicBool::new(false));

        let busy_for_thread = busy.clone();
        let join = thread::spawn(move || run_sink_thread(rx, busy_for_thread, ready_tx));

        match ready_rx.recv() {
            Ok(true) => Some(Self {
                tx,
                busy,
                join: Some(join),
            }),
            _ => {
                let _ = join.join();
                None
            }
        }
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, path: &Path) -> Result<(), BackendError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(SinkCmd::Load(path.to_path_buf(), reply_tx))
            .map_err(|_| BackendError::Unavailable)?;
        reply_rx
            .recv_timeout(Duration::from_secs(2))
            .map_err(|_| BackendError::Unavailable)?
    }

    fn play(&mut self) {
        let _ = self.tx.send(SinkCmd::Play);
    }

    fn pause(&mut self) {
        let _ = self.tx.send(SinkCmd::Pause);
    }

    fn unpause(&mut self) {
        let _ = self.tx.send(SinkCmd::Unpause);
    }

    fn stop(&mut self) {
        let _ = self.tx.send(SinkCmd::Stop);
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.tx.send(SinkCmd::SetVolume(volume));
    }

    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Relaxed)
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        let _ = self.tx.send(SinkCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

fn run_sink_thread(rx: Receiver<SinkCmd>, busy: Arc<AtomicBool>, ready: Sender<bool>) {
    let stream = match OutputStreamBuilder::open_default_stream() {
        Ok(s) => s,
        Err(_) => {
            let _ = ready.send(false);
            return;
        }
    };
    // rodio logs to stderr when OutputStream is dropped. That's useful in
    // debugging, but noisy for a TUI app.
    let mut stream = stream;
    stream.log_on_drop(false);
    let _ = ready.send(true);

    let mut sink: Option<Sink> = None;
    let mut volume = 1.0f32;

    loop {
        match rx.recv_timeout(Duration::from_millis(50)) {
            Ok(SinkCmd::Load(path, reply)) => {
                if let Some(s) = sink.take() {
                    s.stop();
                }
                match open_sink(&stream, &path, volume) {
                    Ok(new_sink) => {
                        sink = Some(new_sink);
                        // Publish busy before replying so a monitor tick can
                        // never observe a freshly loaded track as finished.
                        busy.store(true, Ordering::Relaxed);
                        let _ = reply.send(Ok(()));
                    }
                    Err(e) => {
                        let _ = reply.send(Err(e));
                    }
                }
            }
            Ok(SinkCmd::Play) | Ok(SinkCmd::Unpause) => {
                if let Some(s) = &sink {
                    s.play();
                }
            }
            Ok(SinkCmd::Pause) => {
                if let Some(s) = &sink {
                    s.pause();
                }
            }
            Ok(SinkCmd::Stop) => {
                if let Some(s) = sink.take() {
                    s.stop();
                }
            }
            Ok(SinkCmd::SetVolume(v)) => {
                volume = v;
                if let Some(s) = &sink {
                    s.set_volume(v);
                }
            }
            Ok(SinkCmd::Quit) => {
                if let Some(s) = sink.take() {
                    s.stop();
                }
                busy.store(false, Ordering::Relaxed);
                break;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        busy.store(
            sink.as_ref().map(|s| !s.empty()).unwrap_or(false),
            Ordering::Relaxed,
        );
    }
}

fn open_sink(stream: &OutputStream, path: &Path, volume: f32) -> Result<Sink, BackendError> {
    let file = File::open(path).map_err(|source| BackendError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let source = Decoder::new(BufReader::new(file)).map_err(|source| BackendError::Decode {
        path: path.display().to_string(),
        source,
    })?;

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    sink.set_volume(volume);
    Ok(sink)
}

/// Stand-in used when no audio output device is available.
///
/// `is_busy` stays true for as long as a track is "playing" so the liveness
/// monitor never auto-advances in simulated mode.
#[derive(Debug, Default)]
pub struct NullBackend {
    loaded: bool,
    busy: bool,
    volume: f32,
}

impl AudioBackend for NullBackend {
    fn load(&mut self, _path: &Path) -> Result<(), BackendError> {
        self.loaded = true;
        self.busy = false;
        Ok(())
    }

    fn play(&mut self) {
        if self.loaded {
            self.busy = true;
        }
    }

    fn pause(&mut self) {}

    fn unpause(&mut self) {
        if self.loaded {
            self.busy = true;
        }
    }

    fn stop(&mut self) {
        self.busy = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn is_busy(&self) -> bool {
        self.busy
    }
}
