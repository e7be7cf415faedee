use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "TIMEDQUIZ_LOG";

pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "timedquiz").map(|dirs| dirs.data_local_dir().join("timedquiz.log"))
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. The TUI owns the terminal, so events go
/// to a file; if none can be opened logging is simply off.
pub fn init(path: Option<PathBuf>) -> Option<PathBuf> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let opened = path
        .or_else(default_log_path)
        .and_then(|p| open_log_file(&p).ok().map(|f| (p, f)));

    match opened {
        Some((log_path, file)) => {
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .try_init()
                .is_ok();
            if installed {
                tracing::info!(path = %log_path.display(), "Logging initialized");
            }
            Some(log_path)
        }
        None => {
            let _ = tracing_subscriber::registry().with(env_filter).try_init();
            None
        }
    }
}
