use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TENDIES_LOG";
pub const LOG_FILE: &str = "tendies.log";
const DEFAULT_FILTER: &str = "warn";

pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE)
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Send tracing output to `<data_dir>/tendies.log`; the terminal belongs to
/// the TUI. Does nothing when the data dir doesn't exist yet or the file
/// can't be opened.
pub fn init(data_dir: &Path) {
    if !data_dir.is_dir() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(data_dir))
    else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
