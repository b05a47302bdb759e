//! Arbitrage engine: hedging a held position against the live book.
//!
//! For a pending position with potential payout `P` and stake `S`, and the
//! best taker odds `L` on the opposite side, the hedge stake is `P / L`.
//! Both settlement paths are priced explicitly and the guaranteed profit is
//! the smaller of the two.
//!
//! [`recommend_hedge`] solves the inverse problem: the hedge stake and the
//! minimum opposing odds that hit a target ROI exactly.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, trace};

use super::closed::closed_market_ids;
use super::id::PositionKey;
use super::market::{MarketLabels, Markets};
use super::order_book::OrderBooks;
use super::position::Position;

/// Thresholds for accepting an arbitrage opportunity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbitrageConfig {
    /// Minimum ROI in percent.
    pub min_roi: f64,
    /// Opposing odds at or below this count as no usable liquidity.
    pub min_live_odds: f64,
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            min_roi: 0.0,
            min_live_odds: 1.01,
        }
    }
}

/// Hedge pricing for one position at one opposing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HedgeOutcome {
    /// Stake to place on the opposite side.
    pub hedge_stake: f64,
    /// Profit when the held side wins.
    pub profit_if_original_wins: f64,
    /// Profit when the hedge wins.
    pub profit_if_hedge_wins: f64,
    /// `min` of the two paths.
    pub guaranteed_profit: f64,
    /// Guaranteed profit over the held stake, in percent.
    pub roi: f64,
}

/// Price a hedge of `position` at opposing taker odds `live_opp_odds`.
///
/// Returns `None` when the inputs cannot produce a hedge: non-positive
/// odds or a position without stake.
#[must_use]
pub fn evaluate_hedge(position: &Position, live_opp_odds: f64) -> Option<HedgeOutcome> {
    let usable = |value: f64| value.is_finite() && value > 0.0;
    if !usable(live_opp_odds) || !usable(position.total_stake) {
        return None;
    }

    let stake = position.total_stake;
    let payout = position.potential_payout;
    let hedge_stake = payout / live_opp_odds;

    let profit_if_original_wins = payout - stake - hedge_stake;
    let profit_if_hedge_wins = hedge_stake * live_opp_odds - stake - hedge_stake;
    let guaranteed_profit = profit_if_original_wins.min(profit_if_hedge_wins);

    Some(HedgeOutcome {
        hedge_stake,
        profit_if_original_wins,
        profit_if_hedge_wins,
        guaranteed_profit,
        roi: guaranteed_profit / stake * 100.0,
    })
}

/// A held position that can be hedged into a guaranteed profit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageOpportunity {
    /// Copy of the held position.
    pub position: Position,
    /// Best taker odds on the opposite side.
    pub live_opp_odds: f64,
    /// Best taker odds on the held side, 0.0 if none.
    pub live_same_odds: f64,
    #[serde(flatten)]
    pub hedge: HedgeOutcome,
    /// Whether the opportunity clears the acceptance thresholds.
    pub viable: bool,
    /// Market labels, when metadata is available.
    pub labels: Option<MarketLabels>,
}

impl ArbitrageOpportunity {
    /// Stable alert identity.
    #[must_use]
    pub fn key(&self) -> PositionKey {
        self.position.key()
    }

    #[must_use]
    pub fn roi(&self) -> f64 {
        self.hedge.roi
    }

    #[must_use]
    pub fn guaranteed_profit(&self) -> f64 {
        self.hedge.guaranteed_profit
    }
}

/// Evaluate one pending position against the books.
///
/// `None` means there is no usable opposing liquidity. A returned
/// opportunity may still be non-viable; check [`ArbitrageOpportunity::viable`].
#[must_use]
pub fn evaluate_position(
    position: &Position,
    books: &OrderBooks,
    markets: &Markets,
    config: &ArbitrageConfig,
) -> Option<ArbitrageOpportunity> {
    let book = books.get(&position.market_id)?;
    let live_opp_odds = book.best_taker_odds(position.side.opposite());
    if live_opp_odds <= config.min_live_odds {
        trace!(market_id = %position.market_id, live_opp_odds, "no opposing liquidity");
        return None;
    }

    let hedge = evaluate_hedge(position, live_opp_odds)?;
    let viable = hedge.guaranteed_profit > 0.0 && hedge.roi >= config.min_roi;

    Some(ArbitrageOpportunity {
        position: position.clone(),
        live_opp_odds,
        live_same_odds: book.best_taker_odds(position.side),
        hedge,
        viable,
        labels: markets
            .get(&position.market_id)
            .map(|market| MarketLabels::new(market, position.side)),
    })
}

/// Viable arbitrage opportunities across all pending positions, best ROI first.
///
/// Markets already locked as closed surebets are skipped so a completed
/// hedge is never recommended again.
#[must_use]
pub fn find_arbitrage(
    positions: &[Position],
    books: &OrderBooks,
    markets: &Markets,
    config: &ArbitrageConfig,
) -> Vec<ArbitrageOpportunity> {
    let closed: HashSet<_> = closed_market_ids(positions);

    let mut opportunities: Vec<ArbitrageOpportunity> = positions
        .iter()
        .filter(|p| p.is_pending())
        .filter(|p| !closed.contains(&p.market_id))
        .filter_map(|p| evaluate_position(p, books, markets, config))
        .filter(|opp| opp.viable)
        .collect();

    opportunities.sort_by(|a, b| b.roi().total_cmp(&a.roi()));

    debug!(
        positions = positions.len(),
        closed = closed.len(),
        found = opportunities.len(),
        "arbitrage scan complete"
    );
    opportunities
}

/// Hedge that hits a target ROI exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HedgeRecommendation {
    /// Potential payout of the held position.
    pub potential_payout: f64,
    /// Stake to place on the opposite side.
    pub stake: f64,
    /// Minimum decimal odds the hedge must get.
    pub min_odds: f64,
    /// Target ROI in percent.
    pub target_roi: f64,
}

/// Stake and minimum odds for a hedge returning `target_roi` percent.
///
/// With `r = target_roi / 100`, the hedge stake is
/// `(P - S(1 + r)) / (1 + r)` and the required odds are `P / stake`.
/// Returns `None` when no positive stake achieves the target.
#[must_use]
pub fn recommend_hedge(total_stake: f64, avg_odds: f64, target_roi: f64) -> Option<HedgeRecommendation> {
    let r = target_roi / 100.0;
    let potential_payout = total_stake * avg_odds;
    let stake = (potential_payout - total_stake * (1.0 + r)) / (1.0 + r);

    if !(stake.is_finite() && stake > 0.0) {
        return None;
    }

    Some(HedgeRecommendation {
        potential_payout,
        stake,
        min_odds: potential_payout / stake,
        target_roi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::Side;
    use crate::domain::order_book::OrderBooks;
    use crate::testkit::domain::{order, pending_position};

    #[test]
    fn worked_example_four_against_one_and_a_half() {
        let position = pending_position("m", Side::OutcomeOne, 100.0, 4.0);
        let hedge = evaluate_hedge(&position, 1.5).unwrap();

        assert!((hedge.hedge_stake - 266.666_666).abs() < 1e-3);
        assert!((hedge.profit_if_original_wins - 33.333_333).abs() < 1e-3);
        assert!((hedge.profit_if_hedge_wins - 33.333_333).abs() < 1e-3);
        assert!((hedge.guaranteed_profit - 33.333_333).abs() < 1e-3);
        assert!((hedge.roi - 33.333_333).abs() < 1e-3);
    }

    #[test]
    fn evaluate_hedge_rejects_degenerate_inputs() {
        let position = pending_position("m", Side::OutcomeOne, 100.0, 4.0);
        assert!(evaluate_hedge(&position, 0.0).is_none());

        let empty = pending_position("m", Side::OutcomeOne, 0.0, 4.0);
        assert!(evaluate_hedge(&empty, 2.0).is_none());
    }

    #[test]
    fn no_liquidity_is_omitted() {
        let positions = vec![pending_position("m", Side::OutcomeOne, 100.0, 4.0)];
        let books = OrderBooks::from_entries(vec![
            // maker on two: serves takers on one, not the hedge side
            order("m", Side::OutcomeTwo, 0.5, 100.0),
        ]);
        let found = find_arbitrage(&positions, &books, &Markets::default(), &ArbitrageConfig::default());
        assert!(found.is_empty());
    }

    #[test]
    fn losing_hedge_is_not_viable() {
        let position = pending_position("m", Side::OutcomeOne, 100.0, 1.8);
        // maker on one at implied 0.4 -> taker on two gets 1/0.6
        let books = OrderBooks::from_entries(vec![order("m", Side::OutcomeOne, 0.4, 500.0)]);

        let opp = evaluate_position(&position, &books, &Markets::default(), &ArbitrageConfig::default())
            .unwrap();
        assert!(!opp.viable);
        assert!(opp.guaranteed_profit() < 0.0);
    }

    #[test]
    fn min_roi_threshold_filters() {
        let positions = vec![pending_position("m", Side::OutcomeOne, 100.0, 4.0)];
        // taker on two at 1.5 -> roi 33.3%
        let books = OrderBooks::from_entries(vec![order("m", Side::OutcomeOne, 1.0 / 3.0, 500.0)]);

        let lenient = ArbitrageConfig { min_roi: 30.0, ..ArbitrageConfig::default() };
        let strict = ArbitrageConfig { min_roi: 40.0, ..ArbitrageConfig::default() };

        assert_eq!(find_arbitrage(&positions, &books, &Markets::default(), &lenient).len(), 1);
        assert!(find_arbitrage(&positions, &books, &Markets::default(), &strict).is_empty());
    }

    #[test]
    fn recommend_hedge_for_target_roi() {
        // P = 400, S = 100, r = 0.1 -> stake = (400 - 110) / 1.1
        let rec = recommend_hedge(100.0, 4.0, 10.0).unwrap();
        assert!((rec.stake - 263.636_363).abs() < 1e-3);
        assert!((rec.min_odds - 400.0 / rec.stake).abs() < 1e-9);

        // hedging at exactly min_odds yields the target ROI on the total outlay
        let total = 100.0 + rec.stake;
        assert!(((rec.potential_payout - total) / total - 0.1).abs() < 1e-9);
    }

    #[test]
    fn recommend_hedge_infeasible() {
        assert!(recommend_hedge(100.0, 1.05, 10.0).is_none());
        assert!(recommend_hedge(0.0, 3.0, 5.0).is_none());
    }
}
