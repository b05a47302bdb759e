//! Handler for `monitor`.
//!
//! Order books are reloaded every `orders_interval_secs`; trades and market
//! metadata only when the cache is older than `trades_interval_secs`. A
//! failed trades reload keeps the previous positions. File reads run on the
//! blocking pool.

use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::signal;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use super::command::SnapshotArg;
use super::{format, output, paths};
use crate::application::monitor::{MonitorState, MonitorStats};
use crate::domain::ArbitrageOpportunity;
use crate::error::{Result, SnapshotError};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::snapshot::SnapshotDir;

async fn load_blocking<T, F>(dir: &SnapshotDir, load: F) -> std::result::Result<T, SnapshotError>
where
    T: Send + 'static,
    F: FnOnce(&SnapshotDir) -> std::result::Result<T, SnapshotError> + Send + 'static,
{
    let dir = dir.clone();
    tokio::task::spawn_blocking(move || load(&dir))
        .await
        .map_err(|e| SnapshotError::Task(e.to_string()))?
}

fn alert_message(opp: &ArbitrageOpportunity) -> String {
    let labels = opp.labels.as_ref();
    format!(
        "{} [{}] {} @ {} -> hedge {} @ {} for {} ({})",
        format::event(labels, &opp.position),
        format::side(labels, &opp.position),
        format::money(opp.position.total_stake),
        format::odds(opp.position.avg_odds),
        format::money(opp.hedge.hedge_stake),
        format::odds(opp.live_opp_odds),
        format::money(opp.guaranteed_profit()),
        format::percent(opp.roi()),
    )
}

async fn tick(dir: &SnapshotDir, state: &mut MonitorState) -> Result<()> {
    if state.needs_refresh(Instant::now()) {
        let loaded = load_blocking(dir, |d| Ok((d.load_fills()?, d.load_markets()?))).await;
        match loaded {
            Ok((fills, markets)) => {
                state.cache_mut().refresh(&fills, markets, Instant::now());
                info!(
                    positions = state.cache().positions().len(),
                    "trades cache refreshed"
                );
            }
            Err(e) => warn!(error = %e, "trades refresh failed, keeping cached positions"),
        }
    }

    let books = load_blocking(dir, SnapshotDir::load_orders).await?;
    let outcome = state.pass(&books, Utc::now());

    let stamp = Utc::now().format("%H:%M:%S").to_string();
    for opp in &outcome.new_alerts {
        output::alert(&stamp, &alert_message(opp));
    }
    Ok(())
}

fn print_stats(stats: &MonitorStats) {
    if output::is_json() {
        output::record("monitor_stats", stats);
        return;
    }
    output::section("Monitor Stopped");
    output::field("Scans", stats.total_scans);
    output::field(
        "Last scan",
        stats
            .last_scan
            .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
    );
    output::field("Last found", stats.last_found);
}

/// Execute `monitor` until Ctrl-C.
pub async fn execute(config: &Config, arg: &SnapshotArg) -> Result<()> {
    let dir = paths::snapshot_dir(arg, config);
    let orders_every = Duration::from_secs(config.monitor.orders_interval_secs);
    let trades_max_age = Duration::from_secs(config.monitor.trades_interval_secs);
    let mut state = MonitorState::new(trades_max_age, config.arbitrage_config());

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Snapshot", dir.root().display());
    output::field("Orders", format!("every {}s", orders_every.as_secs()));
    output::field("Trades", format!("every {}s", trades_max_age.as_secs()));
    output::field("Min ROI", format::percent(config.arbitrage.min_roi));
    info!(snapshot = %dir.root().display(), "monitor started");

    let mut ticker = interval(orders_every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = tick(&dir, &mut state).await {
                    warn!(error = %e, "monitor pass failed");
                    output::warning(&format!("pass skipped: {e}"));
                }
            }
            _ = &mut shutdown => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    print_stats(state.stats());
    Ok(())
}
