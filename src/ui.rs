//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Padding, Paragraph, Row, Table, TableState, Wrap},
};

use crate::app::App;
use crate::config::{Column, Settings};
use crate::player::PlaybackStatus;

/// A named color palette applied across the whole UI.
#[derive(Debug, Copy, Clone)]
pub struct Theme {
    /// Main text and borders.
    pub primary: Color,
    /// Table header and titles.
    pub accent: Color,
    /// Status and help text.
    pub muted: Color,
    /// Row highlight background.
    pub selection: Color,
}

pub const THEME_NAMES: [&str; 6] = [
    "Matrix Green",
    "Amber Terminal",
    "Cyan Blue",
    "Purple Haze",
    "Classic DOS",
    "Dark Console",
];

pub fn theme_for(name: &str) -> Theme {
    match name {
        "Amber Terminal" => Theme {
            primary: Color::Rgb(0xff, 0xb0, 0x00),
            accent: Color::Rgb(0xff, 0xd7, 0x00),
            muted: Color::Rgb(0xaa, 0x77, 0x00),
            selection: Color::Rgb(0x44, 0x2b, 0x00),
        },
        "Cyan Blue" => Theme {
            primary: Color::Rgb(0x00, 0xd7, 0xff),
            accent: Color::Rgb(0x87, 0xff, 0xff),
            muted: Color::Rgb(0x00, 0x87, 0xaf),
            selection: Color::Rgb(0x00, 0x30, 0x44),
        },
        "Purple Haze" => Theme {
            primary: Color::Rgb(0xbf, 0x87, 0xff),
            accent: Color::Rgb(0xdf, 0xaf, 0xff),
            muted: Color::Rgb(0x87, 0x5f, 0xaf),
            selection: Color::Rgb(0x30, 0x1a, 0x44),
        },
        "Classic DOS" => Theme {
            primary: Color::White,
            accent: Color::Yellow,
            muted: Color::Gray,
            selection: Color::Blue,
        },
        "Dark Console" => Theme {
            primary: Color::Rgb(0xc0, 0xc0, 0xc0),
            accent: Color::White,
            muted: Color::DarkGray,
            selection: Color::Rgb(0x33, 0x33, 0x33),
        },
        // "Matrix Green" and anything unrecognized.
        _ => Theme {
            primary: Color::Rgb(0x00, 0xff, 0x41),
            accent: Color::Rgb(0x87, 0xff, 0x87),
            muted: Color::Rgb(0x00, 0xaf, 0x2f),
            selection: Color::Rgb(0x00, 0x3b, 0x0f),
        },
    }
}

/// The theme after `name` in the cycle order, wrapping at the end.
pub fn next_theme(name: &str) -> &'static str {
    let pos = THEME_NAMES.iter().position(|&n| n == name).unwrap_or(0);
    THEME_NAMES[(pos + 1) % THEME_NAMES.len()]
}

fn cell_text(track: &crate::library::Track, column: Column) -> String {
    match column {
        Column::Track => track.track_number.clone(),
        Column::Title => track.title.clone(),
        Column::Artist => track.artist.clone(),
        Column::Album => track.album.clone(),
        Column::Time => track.duration.clone(),
        Column::Year => track.year.clone(),
        Column::Genre => track.genre.clone(),
        Column::Bitrate => track.bitrate.clone(),
        Column::Path => track.path.display().to_string(),
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, settings: &Settings) {
    let theme = theme_for(&settings.appearance.theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let title = match &app.library_root {
        Some(root) => format!("termtunes ~ {root}"),
        None => "termtunes".to_string(),
    };
    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.accent))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary)),
        );
    frame.render_widget(header, chunks[0]);

    // Track table
    let columns = settings.columns.visible();
    let widths: Vec<Constraint> = columns.iter().map(|c| c.constraint()).collect();

    let header_row = Row::new(columns.iter().map(|c| c.header().to_string())).style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .view()
        .iter()
        .filter_map(|&i| app.library().get(i))
        .map(|track| Row::new(columns.iter().map(|&c| cell_text(track, c))))
        .collect();

    let table_title = if app.filter_mode() || !app.query().is_empty() {
        format!(" {} [filter: {}] ", app.summary(), app.query())
    } else {
        format!(" {} ", app.summary())
    };
    let table = Table::new(rows, widths)
        .header(header_row)
        .style(Style::default().fg(theme.primary))
        .row_highlight_style(Style::default().bg(theme.selection).fg(theme.accent))
        .highlight_symbol("> ")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .title(table_title),
        );

    let mut state = TableState::default();
    if !app.view().is_empty() {
        state.select(Some(app.selected()));
    }
    frame.render_stateful_widget(table, chunks[1], &mut state);

    // Player box
    let player_text = match app.player().lock() {
        Ok(player) => {
            let state_word = match player.status() {
                PlaybackStatus::Playing => {
                    if player.simulated() {
                        "Simulating"
                    } else {
                        "Playing"
                    }
                }
                PlaybackStatus::Paused => "Paused",
                PlaybackStatus::Stopped => "Stopped",
            };
            // Stop clears the now-playing line even though the controller
            // remembers the track for replay.
            let now = match player.current() {
                Some(t) if player.status() != PlaybackStatus::Stopped => {
                    format!("{} - {} [{}]", t.artist, t.title, t.duration)
                }
                _ => "nothing playing".to_string(),
            };
            let shuffle = if app.shuffle() { "ON" } else { "OFF" };
            format!(
                "{state_word}: {now}\nVolume: {}% | Shuffle: {shuffle}\n{}",
                player.volume(),
                player.status_line()
            )
        }
        Err(_) => "player unavailable".to_string(),
    };
    let player_box = Paragraph::new(player_text)
        .style(Style::default().fg(theme.muted))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .title(" player ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(player_box, chunks[2]);

    // Footer
    let footer_text = if app.filter_mode() {
        format!("filter: {}_  [enter] apply  [esc] clear", app.query())
    } else {
        "[j/k] move | [enter] play | [space] pause | [h/l] prev/next | [/] filter | [s] shuffle | [t] theme | [r] rescan | [-/+] volume | [q] quit"
            .to_string()
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(theme.muted))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
