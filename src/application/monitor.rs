//! Monitor state: everything the periodic scan keeps between passes.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::cache::SnapshotCache;
use super::ledger::NotificationLedger;
use super::scan::{run_scan, ScanReport};
use crate::domain::{ArbitrageConfig, ArbitrageOpportunity, OrderBooks};

/// Counters reported by the monitor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MonitorStats {
    pub total_scans: u64,
    pub last_scan: Option<DateTime<Utc>>,
    /// Opportunities found by the last pass, alerted or not.
    pub last_found: usize,
}

/// Outcome of one monitor pass.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub report: ScanReport,
    /// Opportunities not alerted on before.
    pub new_alerts: Vec<ArbitrageOpportunity>,
}

/// Explicit state owned by the monitor loop.
#[derive(Debug)]
pub struct MonitorState {
    cache: SnapshotCache,
    ledger: NotificationLedger,
    stats: MonitorStats,
    config: ArbitrageConfig,
}

impl MonitorState {
    #[must_use]
    pub fn new(cache_max_age: Duration, config: ArbitrageConfig) -> Self {
        Self {
            cache: SnapshotCache::new(cache_max_age),
            ledger: NotificationLedger::new(),
            stats: MonitorStats::default(),
            config,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut SnapshotCache {
        &mut self.cache
    }

    #[must_use]
    pub fn needs_refresh(&self, now: Instant) -> bool {
        self.cache.is_stale(now)
    }

    #[must_use]
    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }

    /// Scan the cached positions against fresh books and pick out new alerts.
    pub fn pass(&mut self, books: &OrderBooks, at: DateTime<Utc>) -> PassOutcome {
        let report = run_scan(
            self.cache.positions(),
            books,
            self.cache.markets(),
            &self.config,
        );

        let fresh = self
            .ledger
            .observe(report.opportunities.iter().map(ArbitrageOpportunity::key));
        let new_alerts: Vec<ArbitrageOpportunity> = report
            .opportunities
            .iter()
            .filter(|opp| fresh.contains(&opp.key()))
            .cloned()
            .collect();

        self.stats.total_scans += 1;
        self.stats.last_scan = Some(at);
        self.stats.last_found = report.opportunities.len();

        info!(
            scan = self.stats.total_scans,
            found = report.opportunities.len(),
            new = new_alerts.len(),
            closed = report.closed.len(),
            "monitor pass complete"
        );

        PassOutcome { report, new_alerts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Markets, Side};
    use crate::testkit::domain::{fill, offer};

    #[test]
    fn alerts_once_then_again_after_disappearing() {
        let start = Instant::now();
        let mut state = MonitorState::new(Duration::from_secs(60), ArbitrageConfig::default());
        state
            .cache_mut()
            .refresh(&[fill("m", Side::OutcomeOne, 4.0, 100.0)], Markets::default(), start);

        let liquid = OrderBooks::from_entries(vec![offer("m", Side::OutcomeTwo, 1.5, 500.0)]);
        let dry = OrderBooks::default();
        let now = Utc::now();

        assert_eq!(state.pass(&liquid, now).new_alerts.len(), 1);
        assert!(state.pass(&liquid, now).new_alerts.is_empty());
        assert_eq!(state.pass(&dry, now).report.opportunities.len(), 0);
        assert_eq!(state.pass(&liquid, now).new_alerts.len(), 1);

        assert_eq!(state.stats().total_scans, 4);
        assert_eq!(state.stats().last_found, 1);
        assert!(!state.needs_refresh(start));
    }
}
