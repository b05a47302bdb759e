//! Snapshot cache with an explicit freshness window.
//!
//! Trades and market metadata change slowly and are expensive to fetch, so
//! the monitor keeps the last aggregated copy and only reloads it once it
//! is older than the configured window. Order books are never cached.

use std::time::{Duration, Instant};

use crate::domain::{aggregate_positions, Fill, Markets, Position};

/// Positions and market metadata from the last trades refresh.
#[derive(Debug)]
pub struct SnapshotCache {
    positions: Vec<Position>,
    markets: Markets,
    refreshed_at: Option<Instant>,
    max_age: Duration,
}

impl SnapshotCache {
    /// An empty cache that is stale until the first refresh.
    #[must_use]
    pub fn new(max_age: Duration) -> Self {
        Self {
            positions: Vec::new(),
            markets: Markets::default(),
            refreshed_at: None,
            max_age,
        }
    }

    /// True when the cache has never been filled or is older than `max_age`.
    #[must_use]
    pub fn is_stale(&self, now: Instant) -> bool {
        self.refreshed_at
            .map_or(true, |at| now.saturating_duration_since(at) >= self.max_age)
    }

    /// Replace the cached data with a fresh load.
    pub fn refresh(&mut self, fills: &[Fill], markets: Markets, now: Instant) {
        self.positions = aggregate_positions(fills);
        self.markets = markets;
        self.refreshed_at = Some(now);
    }

    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[must_use]
    pub fn markets(&self) -> &Markets {
        &self.markets
    }

    /// Time since the last refresh, if any.
    #[must_use]
    pub fn age(&self, now: Instant) -> Option<Duration> {
        self.refreshed_at
            .map(|at| now.saturating_duration_since(at))
    }
}
