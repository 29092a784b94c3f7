//! File-backed `tracing` setup. The terminal belongs to the dashboard, so
//! log lines go to `<cache_dir>/omnix-tui/omnix-tui.log`.

use std::fs;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::tui::AppError;

const LOG_ENV: &str = "OMNIX_TUI_LOG";
const LOG_FILE: &str = "omnix-tui.log";

/// Installs the global subscriber and returns the log file path.
///
/// `OMNIX_TUI_LOG` overrides `default_filter` when set.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn init(default_filter: &str) -> Result<PathBuf, AppError> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("omnix-tui");
    fs::create_dir_all(&dir)?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(tracing_appender::rolling::never(&dir, LOG_FILE))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(dir.join(LOG_FILE))
}
