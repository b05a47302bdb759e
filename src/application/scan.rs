//! One analysis pass over a snapshot.

use serde::Serialize;

use crate::domain::{
    detect_closed_surebets, find_arbitrage, ArbitrageConfig, ArbitrageOpportunity, ClosedSurebet,
    Markets, OrderBooks, Position,
};

/// Results of a scan pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Hedgeable positions, best ROI first.
    pub opportunities: Vec<ArbitrageOpportunity>,
    /// Markets already hedged on both sides.
    pub closed: Vec<ClosedSurebet>,
}

impl ScanReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty() && self.closed.is_empty()
    }
}

/// Run the arbitrage engine and the closed-position reconciler.
#[must_use]
pub fn run_scan(
    positions: &[Position],
    books: &OrderBooks,
    markets: &Markets,
    config: &ArbitrageConfig,
) -> ScanReport {
    ScanReport {
        opportunities: find_arbitrage(positions, books, markets, config),
        closed: detect_closed_surebets(positions, markets),
    }
}
