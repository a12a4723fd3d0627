//! Logging configuration resolved from flags and environment.
//!
//! Precedence: `YARNBOARD_DEBUG` forces `debug`, then `--log-level` /
//! `YARNBOARD_LOG_LEVEL`, then the build default. The log directory comes
//! from `--log-dir` / `YARNBOARD_LOG_DIR`, falling back to the platform's
//! local data directory.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use yarnboard_core::{resolve_log_level, LogLevel};

pub const DEBUG_ENV: &str = "YARNBOARD_DEBUG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LogLevel,
    pub log_dir: PathBuf,
}

impl LogSettings {
    /// Returns `None` when no log directory can be determined.
    pub fn resolve(
        level: Option<&str>,
        log_dir: Option<&Path>,
        debug_flag: Option<&str>,
    ) -> Result<Option<Self>> {
        let level = resolve_log_level(level, debug_flag).map_err(|err| anyhow!(err))?;

        let log_dir = match log_dir {
            Some(dir) => Some(absolutize(dir)?),
            None => dirs::data_local_dir().map(|dir| dir.join("yarnboard").join("logs")),
        };

        Ok(log_dir.map(|log_dir| Self { level, log_dir }))
    }
}

/// Makes `path` absolute against the current directory.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}
