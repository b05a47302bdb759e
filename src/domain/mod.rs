//! Pure surebet engine.
//!
//! Everything here is a function of its arguments: no I/O, no clocks, no
//! shared state. Malformed exchange data degrades to zero or is skipped;
//! nothing in this module fails a pass.

mod arbitrage;
mod closed;
mod fill;
mod hedge;
mod id;
mod market;
mod order_book;
mod position;
mod prematch;
mod scale;
mod stats;

// Identifiers
pub use id::{MarketId, OrderHash, PositionKey, Side};

// Exchange encodings
pub use scale::{
    amount_to_minor_units, decimal_odds, implied_probability, minor_units_to_amount, taker_odds,
    RawValue, ODDS_SCALE, USDC_SCALE,
};

// Input records
pub use fill::{Fill, OutcomeCode, RawTimestamp};
pub use market::{market_type_label, market_type_name, Market, MarketLabels, Markets, UNKNOWN_LABEL};
pub use order_book::{OrderBook, OrderBookEntry, OrderBooks};

// Positions
pub use position::{
    active_positions, aggregate_positions, settled_history, Position, SettlementResult,
};

// Engine
pub use arbitrage::{
    evaluate_hedge, evaluate_position, find_arbitrage, recommend_hedge, ArbitrageConfig,
    ArbitrageOpportunity, HedgeOutcome, HedgeRecommendation,
};
pub use closed::{closed_market_ids, detect_closed_surebets, ClosedSurebet};
pub use hedge::{plan_hedge, HedgeConfig, HedgePlan, HedgeRejection};
pub use prematch::{
    analyze_prematches, overround, required_odds_for_roi, score_liquidity, score_odds,
    score_spread, score_sport, score_timing, AvoidReason, PrematchConfig, PrematchOpportunity,
    Recommendation, ScoreBreakdown, ScoreWeights, INFEASIBLE_ODDS,
};
pub use stats::{compute_statistics, BucketStats, Statistics};
