//! Builders for domain records used across tests.
//!
//! Odds are given as decimal odds or maker implied probabilities and
//! amounts in currency units; the builders encode them the way the
//! exchange does so tests exercise the real normalisation path.

use crate::domain::{
    Fill, Market, MarketId, OrderBookEntry, OrderHash, Position, RawTimestamp, RawValue,
    SettlementResult, Side,
};

const ODDS_SCALE: f64 = 1e20;
const USDC_SCALE: f64 = 1e6;

/// Create a [`MarketId`] from a string.
pub fn market_id(id: &str) -> MarketId {
    MarketId::new(id)
}

/// Fixed-point encoding of the implied probability behind `decimal_odds`.
pub fn encode_odds(decimal_odds: f64) -> RawValue {
    RawValue::Number((1.0 - 1.0 / decimal_odds) * ODDS_SCALE)
}

/// Minor-unit encoding of a currency amount.
pub fn encode_amount(amount: f64) -> RawValue {
    RawValue::Number(amount * USDC_SCALE)
}

/// A pending fill at `decimal_odds` for `stake` currency units.
pub fn fill(market: &str, side: Side, decimal_odds: f64, stake: f64) -> Fill {
    Fill::new(market_id(market), side, encode_odds(decimal_odds), encode_amount(stake))
}

/// A pending fill with a raw fixed-point odds string.
pub fn fill_with_implied(market: &str, side: Side, raw_odds: &str, stake: f64) -> Fill {
    Fill::new(market_id(market), side, RawValue::from(raw_odds), encode_amount(stake))
}

/// A maker order backing `maker_side` at implied probability `implied`.
pub fn order(market: &str, maker_side: Side, implied: f64, fillable: f64) -> OrderBookEntry {
    OrderBookEntry {
        market_id: market_id(market),
        is_maker_betting_outcome_one: maker_side.is_outcome_one(),
        percentage_odds: Some(RawValue::Number(implied * ODDS_SCALE)),
        fill_amount: Some(encode_amount(fillable)),
        order_hash: Some(OrderHash::new(format!("{market}-{maker_side}-{implied}-{fillable}"))),
    }
}

/// A maker order whose taker side gets exactly `taker_odds`.
pub fn offer(market: &str, taker_side: Side, taker_odds: f64, fillable: f64) -> OrderBookEntry {
    order(market, taker_side.opposite(), 1.0 - 1.0 / taker_odds, fillable)
}

/// A pending position built directly, bypassing aggregation.
pub fn pending_position(market: &str, side: Side, stake: f64, avg_odds: f64) -> Position {
    Position {
        market_id: market_id(market),
        side,
        settled: false,
        total_stake: stake,
        avg_odds,
        potential_payout: stake * avg_odds,
        result: SettlementResult::Pending,
        fill_count: 1,
        last_bet_time: 0,
        settled_at: None,
    }
}

/// Market metadata with a scheduled start and sport label.
pub fn market_starting_at(game_time: i64, sport: &str) -> Market {
    Market {
        team_one_name: Some("Home".into()),
        team_two_name: Some("Away".into()),
        outcome_one_name: Some("Home".into()),
        outcome_two_name: Some("Away".into()),
        sport_label: Some(sport.into()),
        league_label: None,
        game_time: Some(RawTimestamp::Epoch(game_time)),
        market_type: Some(RawValue::from("52")),
        ..Market::default()
    }
}
