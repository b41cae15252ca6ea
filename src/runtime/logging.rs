use std::fs::{self, OpenOptions};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config;

/// Install the tracing subscriber, appending to a log file next to the config
/// file. Raw mode owns the terminal, so nothing is ever logged to stderr once
/// the UI is up.
///
/// Logging is best effort: if the file cannot be opened the app runs without
/// a subscriber.
pub fn init() {
    let Some(path) = config::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}
