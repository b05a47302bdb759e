//! Positions aggregated from fills.
//!
//! A [`Position`] is rebuilt from scratch on every pass. Fills sharing a
//! market, a side and a settlement flag collapse into one position with a
//! stake-weighted average price.

use std::collections::HashMap;

use serde::Serialize;

use super::fill::{Fill, OutcomeCode};
use super::id::{MarketId, PositionKey, Side};

/// How a position resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementResult {
    /// Market still open.
    Pending,
    /// The held side won.
    Won,
    /// The held side lost.
    Lost,
    /// Market voided, stake returned.
    Void,
}

impl SettlementResult {
    /// Label used in tables and alerts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SettlementResult::Pending => "PENDING",
            SettlementResult::Won => "WON",
            SettlementResult::Lost => "LOST",
            SettlementResult::Void => "VOID",
        }
    }
}

/// An aggregated holding on one side of one market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    /// Market the position is on.
    pub market_id: MarketId,
    /// Side the position backs.
    pub side: Side,
    /// Whether the underlying fills are settled.
    pub settled: bool,
    /// Sum of fill stakes in currency units.
    pub total_stake: f64,
    /// Stake-weighted mean decimal odds.
    pub avg_odds: f64,
    /// `total_stake × avg_odds`.
    pub potential_payout: f64,
    /// Settlement result taken from the most recent fill.
    pub result: SettlementResult,
    /// Number of fills merged into this position.
    pub fill_count: usize,
    /// Latest bet time among the fills (epoch seconds).
    pub last_bet_time: i64,
    /// Settlement time of the most recent fill, if known.
    pub settled_at: Option<i64>,
}

impl Position {
    /// Stable identity of the position (market × side).
    #[must_use]
    pub fn key(&self) -> PositionKey {
        PositionKey::new(self.market_id.clone(), self.side)
    }

    /// True while the market has not settled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.settled && self.result == SettlementResult::Pending
    }

    /// Realised profit and loss.
    ///
    /// Won pays `payout - stake`, lost costs the stake, anything else is flat.
    #[must_use]
    pub fn realized_pnl(&self) -> f64 {
        match self.result {
            SettlementResult::Won => self.potential_payout - self.total_stake,
            SettlementResult::Lost => -self.total_stake,
            SettlementResult::Pending | SettlementResult::Void => 0.0,
        }
    }

    /// Timestamp used to order settled history: settlement, else bet time.
    #[must_use]
    pub fn history_time(&self) -> i64 {
        self.settled_at.unwrap_or(self.last_bet_time)
    }
}

#[derive(Debug)]
struct Accumulator {
    market_id: MarketId,
    side: Side,
    settled: bool,
    total_stake: f64,
    weighted_odds: f64,
    fill_count: usize,
    last_bet_time: i64,
    latest: Option<(i64, bool, Option<OutcomeCode>, Option<i64>)>,
}

impl Accumulator {
    fn new(fill: &Fill) -> Self {
        Self {
            market_id: fill.market_id.clone(),
            side: fill.side(),
            settled: fill.settled,
            total_stake: 0.0,
            weighted_odds: 0.0,
            fill_count: 0,
            last_bet_time: i64::MIN,
            latest: None,
        }
    }

    fn add(&mut self, fill: &Fill) {
        let stake = fill.stake_amount();
        self.total_stake += stake;
        self.weighted_odds += stake * fill.decimal_odds();
        self.fill_count += 1;

        let bet_time = fill.bet_time_secs();
        self.last_bet_time = self.last_bet_time.max(bet_time);

        // `>=` so that on equal timestamps the later fill in input order wins.
        let newer = self.latest.map_or(true, |(time, ..)| bet_time >= time);
        if newer {
            self.latest = Some((
                bet_time,
                fill.settled,
                fill.outcome_code(),
                fill.settle_secs(),
            ));
        }
    }

    fn finish(self) -> Position {
        let avg_odds = if self.total_stake > 0.0 {
            self.weighted_odds / self.total_stake
        } else {
            0.0
        };

        let (settled_flag, outcome, settled_at) = self
            .latest
            .map_or((false, None, None), |(_, settled, outcome, at)| {
                (settled, outcome, at)
            });

        let result = match outcome {
            Some(OutcomeCode::Void) => SettlementResult::Void,
            Some(OutcomeCode::Winner(side)) if side == self.side => SettlementResult::Won,
            _ if settled_flag => SettlementResult::Lost,
            _ => SettlementResult::Pending,
        };

        Position {
            market_id: self.market_id,
            side: self.side,
            settled: self.settled,
            total_stake: self.total_stake,
            avg_odds,
            potential_payout: self.total_stake * avg_odds,
            result,
            fill_count: self.fill_count,
            last_bet_time: self.last_bet_time.max(0),
            settled_at,
        }
    }
}

/// Group fills into positions by (market, side, settled).
///
/// Positions come out in first-seen order. Callers should sort fills by
/// bet time ascending beforehand: the settlement result is read from the
/// most recent fill, and equal timestamps fall back to input order.
#[must_use]
pub fn aggregate_positions(fills: &[Fill]) -> Vec<Position> {
    let mut index: HashMap<(MarketId, Side, bool), usize> = HashMap::new();
    let mut groups: Vec<Accumulator> = Vec::new();

    for fill in fills {
        let group_key = (fill.market_id.clone(), fill.side(), fill.settled);
        let slot = *index.entry(group_key).or_insert_with(|| {
            groups.push(Accumulator::new(fill));
            groups.len() - 1
        });
        groups[slot].add(fill);
    }

    groups.into_iter().map(Accumulator::finish).collect()
}

/// Pending positions, most recently traded first.
#[must_use]
pub fn active_positions(positions: &[Position]) -> Vec<Position> {
    let mut active: Vec<Position> = positions.iter().filter(|p| p.is_pending()).cloned().collect();
    active.sort_by(|a, b| b.last_bet_time.cmp(&a.last_bet_time));
    active
}

/// Settled positions, most recently settled first, truncated to `limit`.
#[must_use]
pub fn settled_history(positions: &[Position], limit: usize) -> Vec<Position> {
    let mut settled: Vec<Position> = positions.iter().filter(|p| p.settled).cloned().collect();
    settled.sort_by(|a, b| b.history_time().cmp(&a.history_time()));
    settled.truncate(limit);
    settled
}
