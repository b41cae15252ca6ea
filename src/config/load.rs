use std::{env, fs, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `TERMTUNES__`),
/// then an optional config file and falls back to struct defaults. `save`
/// writes the full settings back so edits made in the UI (theme, volume,
/// library folders) survive restarts.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("TERMTUNES")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.audio.volume > 100 {
            return Err("audio.volume must be in 0..=100".to_string());
        }
        if let Some(active) = &self.library.active_path {
            if !self.library.paths.iter().any(|p| p == active) {
                return Err(format!(
                    "library.active_path {active:?} is not one of library.paths"
                ));
            }
        }
        Ok(())
    }

    /// Persist settings as TOML to the resolved config path, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = resolve_config_path() else {
            return Err("no config path could be resolved".to_string());
        };
        let body = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        fs::write(&path, body).map_err(|e| format!("{}: {e}", path.display()))
    }
}

/// Resolve the config path from `TERMTUNES_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("TERMTUNES_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/termtunes/config.toml`
/// or `~/.config/termtunes/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("termtunes").join("config.toml"))
}

/// Log file location, kept next to the config file.
pub fn log_path() -> Option<PathBuf> {
    resolve_config_path().map(|p| p.with_file_name("termtunes.log"))
}
