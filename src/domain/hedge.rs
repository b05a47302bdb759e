//! Hedge execution planning.
//!
//! Picks the maker order a covering bet should fill and sizes the fill
//! against exchange minimums, the wallet balance and the order's
//! remaining amount. Signing and submission are out of scope; the
//! [`HedgePlan`] carries everything an executor needs.

use serde::Serialize;
use thiserror::Error;

use super::id::{MarketId, OrderHash, Side};
use super::order_book::{OrderBook, OrderBookEntry};
use super::scale::{amount_to_minor_units, RawValue};

/// Execution limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HedgeConfig {
    /// Smallest stake the exchange accepts.
    pub min_stake: f64,
    /// Amount always left in the wallet.
    pub balance_reserve: f64,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            min_stake: 5.0,
            balance_reserve: 2.0,
        }
    }
}

/// Why a hedge cannot be placed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HedgeRejection {
    #[error("hedge stake {stake:.2} is below the minimum of {min:.2}")]
    StakeBelowMinimum { stake: f64, min: f64 },

    #[error("insufficient balance: {available:.2} available after reserve, minimum is {min:.2}")]
    InsufficientBalance { available: f64, min: f64 },

    #[error("no fillable orders on the book")]
    NoOrders,

    #[error("best available odds {best:.3} are below the required {min:.3}")]
    OddsBelowMinimum { best: f64, min: f64 },

    #[error("insufficient liquidity: best order only has {fillable:.2} fillable")]
    InsufficientLiquidity { fillable: f64 },
}

/// A sized fill against one maker order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HedgePlan {
    pub market_id: MarketId,
    /// Side the taker backs.
    pub side: Side,
    pub order_hash: OrderHash,
    pub taker_odds: f64,
    /// The order's fixed-point odds, passed through untouched for signing.
    pub percentage_odds: RawValue,
    /// Stake in currency units.
    pub stake: f64,
    /// Stake in minor units, rounded down.
    pub taker_amount: u128,
    /// True when the stake was cut below what was asked for.
    pub stake_reduced: bool,
}

struct Candidate<'a> {
    entry: &'a OrderBookEntry,
    order_hash: &'a OrderHash,
    percentage_odds: &'a RawValue,
    taker_odds: f64,
    fillable: f64,
}

/// Orders a taker backing `side` can execute against, best odds first.
fn candidates(book: &OrderBook, side: Side) -> Vec<Candidate<'_>> {
    let mut found: Vec<Candidate<'_>> = book
        .offers_for(side)
        .filter_map(|entry| {
            let taker_odds = entry.taker_odds();
            let fillable = entry.fillable();
            if taker_odds <= 0.0 || fillable <= 0.0 {
                return None;
            }
            Some(Candidate {
                entry,
                order_hash: entry.order_hash.as_ref()?,
                percentage_odds: entry.percentage_odds.as_ref()?,
                taker_odds,
                fillable,
            })
        })
        .collect();
    found.sort_by(|a, b| b.taker_odds.total_cmp(&a.taker_odds));
    found
}

/// Plan a covering bet of `desired_stake` on `side` at no less than `min_odds`.
///
/// `balance` is the wallet balance when known; `None` skips the balance check.
pub fn plan_hedge(
    book: &OrderBook,
    side: Side,
    desired_stake: f64,
    min_odds: f64,
    balance: Option<f64>,
    config: &HedgeConfig,
) -> Result<HedgePlan, HedgeRejection> {
    if desired_stake < config.min_stake {
        return Err(HedgeRejection::StakeBelowMinimum {
            stake: desired_stake,
            min: config.min_stake,
        });
    }

    let mut stake = desired_stake;
    if let Some(balance) = balance {
        let available = balance - config.balance_reserve;
        if available < config.min_stake {
            return Err(HedgeRejection::InsufficientBalance {
                available,
                min: config.min_stake,
            });
        }
        stake = stake.min(available);
    }

    let orders = candidates(book, side);
    let Some(top) = orders.first() else {
        return Err(HedgeRejection::NoOrders);
    };
    let Some(best) = orders.iter().find(|c| c.taker_odds >= min_odds) else {
        return Err(HedgeRejection::OddsBelowMinimum {
            best: top.taker_odds,
            min: min_odds,
        });
    };

    let stake = stake.min(best.fillable);
    if stake < config.min_stake {
        return Err(HedgeRejection::InsufficientLiquidity {
            fillable: best.fillable,
        });
    }

    Ok(HedgePlan {
        market_id: best.entry.market_id.clone(),
        side,
        order_hash: best.order_hash.clone(),
        taker_odds: best.taker_odds,
        percentage_odds: best.percentage_odds.clone(),
        stake,
        taker_amount: amount_to_minor_units(stake),
        stake_reduced: stake < desired_stake - 0.01,
    })
}
