use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashboard_core::error::DashboardError;
use dashboard_core::settings::DEFAULT_DATA_FILE;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Name of the per-user application directory under `$HOME`.
pub const APP_DIR: &str = ".sales-dashboard";

/// Log file name inside `~/.sales-dashboard/logs/`.
pub const LOG_FILE_NAME: &str = "sales-dashboard.log";

// ── Directory bootstrap ────────────────────────────────────────────────────────

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Ensure the `~/.sales-dashboard/logs/` hierarchy exists.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    ensure_directories_in(&home_dir())
}

/// Create `<home>/.sales-dashboard/logs/` (and parents) and return the
/// logs directory.
pub fn ensure_directories_in(home: &Path) -> anyhow::Result<PathBuf> {
    let logs = home.join(APP_DIR).join("logs");
    std::fs::create_dir_all(&logs)?;
    Ok(logs)
}

/// Default log file used by the interactive dashboard.
pub fn default_log_file() -> PathBuf {
    home_dir().join(APP_DIR).join("logs").join(LOG_FILE_NAME)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `DEBUG/INFO/WARNING/ERROR/CRITICAL` level name to a tracing
/// filter directive. Unknown names fall back to `"info"`.
pub fn level_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, output is appended to that file (parents are
/// created) without ANSI colours, keeping the terminal free for the TUI.
/// Otherwise output goes to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, stderr_layer) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(layer), None)
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            (None, Some(layer))
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

// ── Data-file discovery ────────────────────────────────────────────────────────

/// Resolve the sales CSV relative to the current directory.
///
/// See [`discover_data_file_in`].
pub fn discover_data_file(explicit: Option<&Path>) -> Result<PathBuf, DashboardError> {
    let cwd = std::env::current_dir()?;
    discover_data_file_in(&cwd, explicit)
}

/// Resolve the sales CSV.
///
/// An explicit path must exist. Without one, the following are checked in
/// order and the first that exists is returned:
/// 1. `<base>/Superstore_Sales_utf8.csv`
/// 2. `<base>/data/Superstore_Sales_utf8.csv`
pub fn discover_data_file_in(
    base: &Path,
    explicit: Option<&Path>,
) -> Result<PathBuf, DashboardError> {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        };
        return if path.is_file() {
            Ok(path)
        } else {
            Err(DashboardError::DataFileNotFound(path))
        };
    }

    let candidates = [
        base.join(DEFAULT_DATA_FILE),
        base.join("data").join(DEFAULT_DATA_FILE),
    ];
    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or_else(|| DashboardError::DataFileNotFound(candidates[0].clone()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
