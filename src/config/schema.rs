use ratatui::layout::Constraint;
use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/termtunes/config.toml` or `~/.config/termtunes/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TERMTUNES__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub appearance: AppearanceSettings,
    pub audio: AudioSettings,
    pub columns: ColumnSettings,
    pub library: LibrarySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            appearance: AppearanceSettings::default(),
            audio: AudioSettings::default(),
            columns: ColumnSettings::default(),
            library: LibrarySettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceSettings {
    /// One of the built-in theme names, e.g. "Matrix Green".
    pub theme: String,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            theme: "Matrix Green".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Startup volume, 0..=100.
    pub volume: u8,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { volume: 80 }
    }
}

/// Which columns the track table shows. Column order is fixed; each flag only
/// toggles visibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSettings {
    pub track: bool,
    pub title: bool,
    pub artist: bool,
    pub album: bool,
    pub time: bool,
    pub year: bool,
    pub genre: bool,
    pub bitrate: bool,
    pub path: bool,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            track: true,
            title: true,
            artist: true,
            album: true,
            time: true,
            year: false,
            genre: false,
            bitrate: false,
            path: false,
        }
    }
}

impl ColumnSettings {
    pub fn visible(&self) -> Vec<Column> {
        let flags = [
            (Column::Track, self.track),
            (Column::Title, self.title),
            (Column::Artist, self.artist),
            (Column::Album, self.album),
            (Column::Time, self.time),
            (Column::Year, self.year),
            (Column::Genre, self.genre),
            (Column::Bitrate, self.bitrate),
            (Column::Path, self.path),
        ];
        flags
            .into_iter()
            .filter_map(|(col, on)| on.then_some(col))
            .collect()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Column {
    Track,
    Title,
    Artist,
    Album,
    Time,
    Year,
    Genre,
    Bitrate,
    Path,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Self::Track => "#",
            Self::Title => "Title",
            Self::Artist => "Artist",
            Self::Album => "Album",
            Self::Time => "Time",
            Self::Year => "Year",
            Self::Genre => "Genre",
            Self::Bitrate => "kbps",
            Self::Path => "Path",
        }
    }

    pub fn constraint(self) -> Constraint {
        match self {
            Self::Track => Constraint::Length(4),
            Self::Title => Constraint::Min(20),
            Self::Artist => Constraint::Min(14),
            Self::Album => Constraint::Min(14),
            Self::Time => Constraint::Length(6),
            Self::Year => Constraint::Length(6),
            Self::Genre => Constraint::Length(12),
            Self::Bitrate => Constraint::Length(5),
            Self::Path => Constraint::Min(20),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Folders to scan for audio files.
    pub paths: Vec<String>,
    /// The folder currently in use. Must be one of `paths` (enforced at load).
    pub active_path: Option<String>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            active_path: None,
        }
    }
}
