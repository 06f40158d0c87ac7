//! Diagnostic logging to disk.
//!
//! The terminal belongs to the UI, so `tracing` output is written to the file
//! named in the config (default: `~/.local/share/todo-tui/todo-tui.log`).
//! Failed requests end up here and nowhere else.

use crate::config::model::LoggingConfig;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;

/// Install the global subscriber. No-op if logging is disabled.
///
/// Falls back to discarding output if the log file cannot be opened.
pub fn init(config: &LoggingConfig) {
    if !config.enabled {
        return;
    }

    let level = parse_level(&config.level);
    let path = expand_home(&config.file);
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false);

    let installed = match open_log_file(&path) {
        Some(file) => builder.with_writer(Mutex::new(file)).try_init(),
        None => builder.with_writer(std::io::sink).try_init(),
    };
    if let Err(e) = installed {
        // A subscriber from an earlier call keeps receiving events
        tracing::debug!(error = %e, "global subscriber already set");
    }
}

fn open_log_file(path: &Path) -> Option<fs::File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

pub fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
