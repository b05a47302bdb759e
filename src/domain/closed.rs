//! Closed-position reconciler.
//!
//! A market where pending positions exist on both outcomes is a locked
//! surebet: the hedge is already in place and the result no longer
//! depends on which side wins.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::id::{MarketId, Side};
use super::market::{MarketLabels, Markets};
use super::position::Position;

/// Both legs of a hedge that is already filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedSurebet {
    pub market_id: MarketId,
    /// Position backing outcome one.
    pub leg_one: Position,
    /// Position backing outcome two.
    pub leg_two: Position,
    /// Sum of both stakes.
    pub combined_stake: f64,
    /// `min(payout_one, payout_two) - combined_stake`.
    pub guaranteed_profit: f64,
    /// Guaranteed profit over combined stake, in percent.
    pub roi: f64,
    /// Event label for outcome one, when metadata is available.
    pub labels: Option<MarketLabels>,
}

/// Pending legs per market, indexed by side.
fn pending_legs(positions: &[Position]) -> Vec<(MarketId, [Option<&Position>; 2])> {
    let mut index: HashMap<&MarketId, usize> = HashMap::new();
    let mut legs: Vec<(MarketId, [Option<&Position>; 2])> = Vec::new();

    for position in positions.iter().filter(|p| p.is_pending()) {
        let slot = *index.entry(&position.market_id).or_insert_with(|| {
            legs.push((position.market_id.clone(), [None, None]));
            legs.len() - 1
        });
        let side_slot = match position.side {
            Side::OutcomeOne => 0,
            Side::OutcomeTwo => 1,
        };
        legs[slot].1[side_slot].get_or_insert(position);
    }

    legs
}

/// Markets with pending positions on both sides.
#[must_use]
pub fn closed_market_ids(positions: &[Position]) -> HashSet<MarketId> {
    pending_legs(positions)
        .into_iter()
        .filter(|(_, legs)| legs.iter().all(Option::is_some))
        .map(|(market_id, _)| market_id)
        .collect()
}

/// One closed surebet per market staked on both sides, best ROI first.
///
/// Markets with only one side staked produce nothing.
#[must_use]
pub fn detect_closed_surebets(positions: &[Position], markets: &Markets) -> Vec<ClosedSurebet> {
    let mut closed: Vec<ClosedSurebet> = pending_legs(positions)
        .into_iter()
        .filter_map(|(market_id, legs)| match legs {
            [Some(one), Some(two)] => Some(reconcile(market_id, one, two, markets)),
            _ => None,
        })
        .collect();

    closed.sort_by(|a, b| b.roi.total_cmp(&a.roi));
    closed
}

fn reconcile(market_id: MarketId, one: &Position, two: &Position, markets: &Markets) -> ClosedSurebet {
    let combined_stake = one.total_stake + two.total_stake;
    let guaranteed_profit = one.potential_payout.min(two.potential_payout) - combined_stake;
    let roi = if combined_stake > 0.0 {
        guaranteed_profit / combined_stake * 100.0
    } else {
        0.0
    };

    let labels = markets
        .get(&market_id)
        .map(|market| MarketLabels::new(market, Side::OutcomeOne));

    ClosedSurebet {
        market_id,
        leg_one: one.clone(),
        leg_two: two.clone(),
        combined_stake,
        guaranteed_profit,
        roi,
        labels,
    }
}
