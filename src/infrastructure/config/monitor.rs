//! Monitor loop cadence and snapshot location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// `[monitor]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorSection {
    /// Directory holding `trades.json`, `markets.json` and `orders.json`.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
    /// Seconds between order book reloads and scan passes.
    #[serde(default = "default_orders_interval_secs")]
    pub orders_interval_secs: u64,
    /// Maximum age of the trades and markets cache, in seconds.
    #[serde(default = "default_trades_interval_secs")]
    pub trades_interval_secs: u64,
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("snapshots")
}

const fn default_orders_interval_secs() -> u64 {
    10
}

const fn default_trades_interval_secs() -> u64 {
    60
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
            orders_interval_secs: default_orders_interval_secs(),
            trades_interval_secs: default_trades_interval_secs(),
        }
    }
}
