//! Config file and snapshot directory resolution.
//!
//! - `--config PATH` must exist; without it `surebet.toml` in the working
//!   directory is used when present, defaults otherwise.
//! - `--snapshot DIR` wins over `monitor.snapshot_dir`.

use std::fs;
use std::path::{Path, PathBuf};

use miette::Report;

use super::command::{SnapshotArg, DEFAULT_CONFIG};
use super::diagnostic;
use crate::error::ConfigError;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::snapshot::SnapshotDir;

/// The config path in effect.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), Path::to_path_buf)
}

/// Load and validate the configuration.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, Report> {
    let path = config_path(explicit);
    if explicit.is_none() && !path.exists() {
        return Config::parse_toml("").map_err(diagnostic::report);
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| diagnostic::report(ConfigError::ReadFile(e).into()))?;
    Config::parse_toml(&content).map_err(|e| diagnostic::config_report(e, &path, Some(&content)))
}

/// Snapshot directory for a command.
pub fn snapshot_dir(arg: &SnapshotArg, config: &Config) -> SnapshotDir {
    match &arg.snapshot {
        Some(dir) => SnapshotDir::new(dir.clone()),
        None => SnapshotDir::new(config.monitor.snapshot_dir.clone()),
    }
}
