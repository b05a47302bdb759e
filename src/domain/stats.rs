//! Statistics over settled positions.

use std::collections::BTreeMap;

use serde::Serialize;

use super::market::{Markets, UNKNOWN_LABEL};
use super::position::{Position, SettlementResult};

/// Won/lost/void tallies with stake and P&L for one sport or league.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BucketStats {
    pub won: usize,
    pub lost: usize,
    /// Settled positions that neither won nor lost.
    pub void: usize,
    pub stake: f64,
    pub pnl: f64,
    pub roi: f64,
}

impl BucketStats {
    fn record(&mut self, position: &Position) {
        self.stake += position.total_stake;
        self.pnl += position.realized_pnl();
        match position.result {
            SettlementResult::Won => self.won += 1,
            SettlementResult::Lost => self.lost += 1,
            SettlementResult::Pending | SettlementResult::Void => self.void += 1,
        }
        self.roi = percent(self.pnl, self.stake);
    }
}

/// Portfolio-level statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    /// All positions, settled or not.
    pub total: usize,
    pub active: usize,
    pub settled: usize,
    pub won: usize,
    pub lost: usize,
    pub void: usize,
    /// Won over decided (won + lost), in percent.
    pub win_rate: f64,
    /// Stake across settled positions.
    pub settled_stake: f64,
    pub pnl: f64,
    /// P&L over settled stake, in percent.
    pub roi: f64,
    pub by_sport: BTreeMap<String, BucketStats>,
    pub by_league: BTreeMap<String, BucketStats>,
}

fn percent(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// Roll positions up into [`Statistics`].
///
/// Sport and league come from market metadata; markets without it land in
/// the `"Unknown"` bucket.
#[must_use]
pub fn compute_statistics(positions: &[Position], markets: &Markets) -> Statistics {
    let mut stats = Statistics {
        total: positions.len(),
        ..Statistics::default()
    };

    for position in positions {
        if !position.settled {
            stats.active += 1;
            continue;
        }

        stats.settled += 1;
        stats.settled_stake += position.total_stake;
        stats.pnl += position.realized_pnl();
        match position.result {
            SettlementResult::Won => stats.won += 1,
            SettlementResult::Lost => stats.lost += 1,
            SettlementResult::Void => stats.void += 1,
            SettlementResult::Pending => {}
        }

        let market = markets.get(&position.market_id);
        let sport = market.map_or(UNKNOWN_LABEL, |m| m.sport());
        let league = market.map_or(UNKNOWN_LABEL, |m| m.league());

        stats.by_sport.entry(sport.to_string()).or_default().record(position);
        stats.by_league.entry(league.to_string()).or_default().record(position);
    }

    stats.win_rate = percent(stats.won as f64, (stats.won + stats.lost) as f64);
    stats.roi = percent(stats.pnl, stats.settled_stake);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::{MarketId, Side};
    use crate::domain::position::aggregate_positions;
    use crate::testkit::domain::{fill, market_starting_at};

    #[test]
    fn totals_and_rates() {
        let fills = vec![
            fill("a", Side::OutcomeOne, 3.0, 10.0).settled_with(1, 1),
            fill("b", Side::OutcomeOne, 2.0, 20.0).settled_with(2, 1),
            fill("c", Side::OutcomeOne, 2.0, 5.0).settled_with(0, 1),
            fill("d", Side::OutcomeOne, 2.0, 7.0),
        ];
        let positions = aggregate_positions(&fills);
        let stats = compute_statistics(&positions, &Markets::default());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.settled, 3);
        assert_eq!((stats.won, stats.lost, stats.void), (1, 1, 1));
        assert!((stats.win_rate - 50.0).abs() < 1e-9);
        assert!((stats.settled_stake - 35.0).abs() < 1e-9);
        // +20 - 20 + 0
        assert!(stats.pnl.abs() < 1e-9);
        assert_eq!(stats.roi, stats.pnl / 35.0 * 100.0);
    }

    #[test]
    fn empty_input_has_zero_rates() {
        let stats = compute_statistics(&[], &Markets::default());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.roi, 0.0);
        assert!(stats.by_sport.is_empty());
    }

    #[test]
    fn buckets_by_sport_and_league() {
        let fills = vec![
            fill("t", Side::OutcomeOne, 3.0, 10.0).settled_with(1, 1),
            fill("x", Side::OutcomeOne, 2.0, 10.0).settled_with(2, 1),
        ];
        let mut tennis = market_starting_at(0, "Tennis");
        tennis.league_label = Some("ATP".into());
        let markets = Markets::from_pairs(vec![(MarketId::new("t"), tennis)]);

        let stats = compute_statistics(&aggregate_positions(&fills), &markets);

        let t = &stats.by_sport["Tennis"];
        assert_eq!(t.won, 1);
        assert!((t.pnl - 20.0).abs() < 1e-9);
        assert!((t.roi - 200.0).abs() < 1e-9);

        let unknown = &stats.by_sport[UNKNOWN_LABEL];
        assert_eq!(unknown.lost, 1);
        assert!((unknown.roi + 100.0).abs() < 1e-9);

        assert!(stats.by_league.contains_key("ATP"));
        assert!(stats.by_league.contains_key(UNKNOWN_LABEL));
    }
}
