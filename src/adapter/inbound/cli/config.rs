//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use super::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

const HEADER: &str = "\
# surebet configuration
#
# Every section is optional; omitted keys take the values shown here.
# SUREBET_SNAPSHOT_DIR, ORDERS_INTERVAL and TRADES_INTERVAL override [monitor].

";

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: format!("{} already exists (use --force to overwrite)", path.display()),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let body = Config::default().to_toml()?;
    fs::write(path, format!("{HEADER}{body}"))?;

    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} to taste", path.display()));
    output::note("2. Point monitor.snapshot_dir at your fetcher's output");
    output::note(&format!("3. Run: surebet --config {} scan", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(config: &Config) -> Result<()> {
    if output::is_json() {
        output::record("config", config);
        return Ok(());
    }
    output::section("Effective Configuration");
    output::lines(&config.to_toml()?);
    Ok(())
}

/// Execute `config validate`.
///
/// The configuration was already loaded and validated on startup, so this
/// only reports where it came from.
pub fn execute_validate(path: &Path, config: &Config) -> Result<()> {
    if path.exists() {
        output::success(&format!("{} is valid", path.display()));
    } else {
        output::success("No configuration file, defaults are valid");
    }
    output::field("Snapshot", config.monitor.snapshot_dir.display());
    output::field("Min ROI", format!("{}%", config.arbitrage.min_roi));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_parseable_file_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("surebet.toml");

        execute_init(&path, false).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# surebet configuration"));
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.monitor.orders_interval_secs, 10);

        assert!(execute_init(&path, false).is_err());
        assert!(execute_init(&path, true).is_ok());
    }
}
