use std::env;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::library::scan;
use crate::monitor::spawn_monitor;
use crate::player::{AudioBackend, NullBackend, PlayerController, PlayerEvent, RodioBackend};

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut settings = settings::load_settings();

    // Library folder precedence: CLI argument, then the configured active
    // folder, then the first configured folder. A folder given on the command
    // line is remembered for next time.
    let dir = match env::args().nth(1) {
        Some(arg) => {
            if !settings.library.paths.contains(&arg) {
                settings.library.paths.push(arg.clone());
            }
            settings.library.active_path = Some(arg.clone());
            arg
        }
        None => settings
            .library
            .active_path
            .clone()
            .or_else(|| settings.library.paths.first().cloned())
            .unwrap_or_else(|| {
                env::current_dir()
                    .ok()
                    .and_then(|p| p.to_str().map(|s| s.to_string()))
                    .unwrap_or_else(|| "Music".to_string())
            }),
    };

    let tracks = scan(Path::new(&dir));
    info!("scanned {} tracks from {dir}", tracks.len());

    // Degrade to simulated playback when no output device exists: state
    // transitions still happen, nothing comes out of the speakers.
    let (audio_backend, simulated): (Box<dyn AudioBackend>, bool) = match RodioBackend::open() {
        Some(backend) => (Box::new(backend), false),
        None => {
            warn!("no audio output device, running in simulated mode");
            (Box::new(NullBackend::default()), true)
        }
    };

    let volume = settings.audio.volume as i32;
    let player = PlayerController::new(audio_backend, simulated, volume).shared();
    let mut app = App::new(tracks, player.clone());
    app.library_root = Some(dir);

    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
    let shutdown = Arc::new(AtomicBool::new(false));
    let monitor = spawn_monitor(player.clone(), event_tx, shutdown.clone());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let run_result = event_loop::run(&mut terminal, &mut settings, &mut app, &event_rx);

    shutdown.store(true, Ordering::Relaxed);
    let _ = monitor.join();

    // Persist the volume the session ended on.
    if let Ok(p) = player.lock() {
        settings.audio.volume = p.volume();
    }
    if let Err(msg) = settings.save() {
        warn!("failed to save settings: {msg}");
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
