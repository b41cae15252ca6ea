use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::config;
use crate::library::scan;
use crate::player::PlayerEvent;
use crate::ui;

/// Main terminal event loop: draws the UI, drains monitor events and handles
/// input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &mut config::Settings,
    app: &mut App,
    player_events: &mpsc::Receiver<PlayerEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Monitor events first, so an auto-advance is visible in the same
        // frame it happened in.
        while let Ok(event) = player_events.try_recv() {
            match event {
                PlayerEvent::TrackFinished => app.next(),
            }
        }

        terminal.draw(|f| ui::draw(f, app, settings))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_key_event(
    key: KeyEvent,
    settings: &mut config::Settings,
    app: &mut App,
) -> Result<bool, Box<dyn std::error::Error>> {
    if app.filter_mode() {
        match key.code {
            KeyCode::Esc => {
                app.clear_query();
                app.exit_filter_mode();
            }
            KeyCode::Enter => {
                app.exit_filter_mode();
            }
            KeyCode::Backspace => {
                app.pop_query_char();
            }
            KeyCode::Down => {
                app.cursor_next();
            }
            KeyCode::Up => {
                app.cursor_prev();
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_query_char(c);
                }
            }
            _ => {}
        }

        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => {
            app.stop();
            return Ok(true);
        }
        KeyCode::Char('/') => {
            app.enter_filter_mode();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.cursor_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor_prev();
        }
        KeyCode::Enter => {
            app.play_selected();
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            app.toggle_playback();
        }
        KeyCode::Char('x') => {
            app.stop();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.next();
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.previous();
        }
        KeyCode::Char('s') => {
            app.toggle_shuffle();
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            change_volume(settings, app, 5);
        }
        KeyCode::Char('-') => {
            change_volume(settings, app, -5);
        }
        KeyCode::Char('t') => {
            let next = ui::next_theme(&settings.appearance.theme);
            settings.appearance.theme = next.to_string();
            persist(settings);
        }
        KeyCode::Char('r') => {
            if let Some(root) = app.library_root.clone() {
                let tracks = scan(Path::new(&root));
                info!("rescan of {root} found {} tracks", tracks.len());
                app.set_library(tracks);
            }
        }
        _ => {}
    }

    Ok(false)
}

fn change_volume(settings: &mut config::Settings, app: &mut App, delta: i32) {
    settings.audio.volume = app.adjust_volume(delta);
    persist(settings);
}

fn persist(settings: &config::Settings) {
    if let Err(msg) = settings.save() {
        warn!("failed to save settings: {msg}");
    }
}
