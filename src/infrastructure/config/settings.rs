//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file where every section is
//! optional, then a few environment variables override the monitor
//! cadence and snapshot location.
//!
//! # Example
//!
//! ```no_run
//! use surebet::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("surebet.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::detection::{ArbitrageSection, HedgeSection, PrematchSection};
use super::logging::LoggingConfig;
use super::monitor::MonitorSection;
use crate::domain::{ArbitrageConfig, HedgeConfig, PrematchConfig, ScoreWeights};
use crate::error::{ConfigError, Result};

/// Overrides `[monitor] snapshot_dir`.
pub const ENV_SNAPSHOT_DIR: &str = "SUREBET_SNAPSHOT_DIR";
/// Overrides `[monitor] orders_interval_secs`.
pub const ENV_ORDERS_INTERVAL: &str = "ORDERS_INTERVAL";
/// Overrides `[monitor] trades_interval_secs`.
pub const ENV_TRADES_INTERVAL: &str = "TRADES_INTERVAL";

/// Tolerance when checking that score weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Arbitrage acceptance thresholds.
    #[serde(default)]
    pub arbitrage: ArbitrageSection,

    /// Pre-match scan filters and score weights.
    #[serde(default)]
    pub prematch: PrematchSection,

    /// Hedge execution limits.
    #[serde(default)]
    pub hedge: HedgeSection,

    /// Monitor loop cadence and snapshot location.
    #[serde(default)]
    pub monitor: MonitorSection,
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

fn parse_secs(field: &'static str, raw: &str) -> std::result::Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| invalid(field, format!("expected whole seconds, got {raw:?} ({e})")))
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Environment overrides are applied before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed, an override does
    /// not parse, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsing fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], plus override and validation failures for
    /// the default configuration.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when an interval override is
    /// not a whole number of seconds.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> std::result::Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_SNAPSHOT_DIR).filter(|d| !d.trim().is_empty()) {
            self.monitor.snapshot_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_ORDERS_INTERVAL) {
            self.monitor.orders_interval_secs = parse_secs(ENV_ORDERS_INTERVAL, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TRADES_INTERVAL) {
            self.monitor.trades_interval_secs = parse_secs(ENV_TRADES_INTERVAL, &raw)?;
        }
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for an empty snapshot
    /// directory, otherwise the first [`ConfigError::InvalidValue`] found.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.arbitrage.min_roi < 0.0 {
            return Err(invalid("arbitrage.min_roi", "must not be negative").into());
        }
        if self.arbitrage.min_live_odds < 1.0 {
            return Err(invalid("arbitrage.min_live_odds", "must be at least 1.0").into());
        }

        let prematch = &self.prematch;
        if prematch.min_roi < 0.0 {
            return Err(invalid("prematch.min_roi", "must not be negative").into());
        }
        if prematch.min_hours < 0.0 {
            return Err(invalid("prematch.min_hours", "must not be negative").into());
        }
        if prematch.min_hours >= prematch.max_hours {
            return Err(invalid("prematch.max_hours", "must be greater than min_hours").into());
        }
        if prematch.min_liquidity < 0.0 {
            return Err(invalid("prematch.min_liquidity", "must not be negative").into());
        }
        if prematch.viability_tolerance <= 0.0 || prematch.viability_tolerance > 1.0 {
            return Err(invalid("prematch.viability_tolerance", "must be in (0, 1]").into());
        }

        let weights = ScoreWeights::from(&prematch.weights);
        let all = [
            weights.odds,
            weights.liquidity,
            weights.spread,
            weights.timing,
            weights.sport,
        ];
        if all.iter().any(|w| *w < 0.0) {
            return Err(invalid("prematch.weights", "weights must not be negative").into());
        }
        if (weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid(
                "prematch.weights",
                format!("weights must sum to 1.0, got {:.6}", weights.sum()),
            )
            .into());
        }

        if self.hedge.min_stake < 0.0 {
            return Err(invalid("hedge.min_stake", "must not be negative").into());
        }
        if self.hedge.balance_reserve < 0.0 {
            return Err(invalid("hedge.balance_reserve", "must not be negative").into());
        }

        if self.monitor.snapshot_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "monitor.snapshot_dir",
            }
            .into());
        }
        if self.monitor.orders_interval_secs == 0 {
            return Err(invalid("monitor.orders_interval_secs", "must be greater than 0").into());
        }
        if self.monitor.trades_interval_secs == 0 {
            return Err(invalid("monitor.trades_interval_secs", "must be greater than 0").into());
        }

        Ok(())
    }

    /// Render as TOML, as written by `config init`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    #[allow(clippy::result_large_err)]
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::Serialize)?)
    }

    /// Arbitrage engine thresholds.
    #[must_use]
    pub fn arbitrage_config(&self) -> ArbitrageConfig {
        ArbitrageConfig::from(&self.arbitrage)
    }

    /// Pre-match scorer filters and weights.
    #[must_use]
    pub fn prematch_config(&self) -> PrematchConfig {
        PrematchConfig::from(&self.prematch)
    }

    /// Hedge planner limits.
    #[must_use]
    pub fn hedge_config(&self) -> HedgeConfig {
        HedgeConfig::from(&self.hedge)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
