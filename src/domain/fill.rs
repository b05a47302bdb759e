//! Fill records: the atomic trades the bettor already holds.
//!
//! Field names follow the exchange's trade feed. Every numeric field is
//! optional; the accessors document how missing or malformed values fall
//! back so the aggregator never has to check for presence itself.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::id::{MarketId, Side};
use super::scale::{decimal_odds, lenient_flag, lenient_raw, minor_units_to_amount, RawValue};

/// A timestamp as either epoch seconds or an RFC 3339 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Seconds since the Unix epoch.
    Epoch(i64),
    /// Fractional epoch seconds.
    Fractional(f64),
    /// Textual form: digits or RFC 3339.
    Text(String),
}

impl RawTimestamp {
    /// Epoch seconds, or `None` when the value cannot be interpreted.
    #[must_use]
    pub fn epoch_secs(&self) -> Option<i64> {
        match self {
            RawTimestamp::Epoch(secs) => Some(*secs),
            RawTimestamp::Fractional(secs) if secs.is_finite() => Some(secs.trunc() as i64),
            RawTimestamp::Fractional(_) => None,
            RawTimestamp::Text(text) => {
                let text = text.trim();
                text.parse::<i64>().ok().or_else(|| {
                    DateTime::parse_from_rfc3339(text)
                        .ok()
                        .map(|dt| dt.timestamp())
                })
            }
        }
    }
}

/// Outcome code published when a market settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeCode {
    /// Code 0: the market was voided and stakes are returned.
    Void,
    /// Code 1 or 2: the winning side.
    Winner(Side),
}

impl OutcomeCode {
    /// Decode the exchange's numeric outcome. Unknown codes are `None`.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(OutcomeCode::Void),
            1 => Some(OutcomeCode::Winner(Side::OutcomeOne)),
            2 => Some(OutcomeCode::Winner(Side::OutcomeTwo)),
            _ => None,
        }
    }
}

/// A single filled trade.
///
/// Immutable once received. Stake fallbacks, in order:
/// `normalizedStake`, then `betTimeValue`, then `stake` in minor units,
/// then zero. Null or wrongly typed flags read as `false`, and non-numeric
/// raw fields as absent, so one bad field never drops the trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    /// Market the trade was placed on.
    #[serde(rename = "marketHash")]
    pub market_id: MarketId,
    /// True when the bettor backed outcome one.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub betting_outcome_one: bool,
    /// Implied probability in fixed point (scale 10^20).
    #[serde(default, deserialize_with = "lenient_raw")]
    pub odds: Option<RawValue>,
    /// Stake in minor units (scale 10^6).
    #[serde(default, deserialize_with = "lenient_raw")]
    pub stake: Option<RawValue>,
    /// Stake already expressed in currency units.
    #[serde(default, deserialize_with = "lenient_raw")]
    pub normalized_stake: Option<RawValue>,
    /// Stake valued at bet time, in currency units.
    #[serde(default, deserialize_with = "lenient_raw")]
    pub bet_time_value: Option<RawValue>,
    /// Whether the market has settled.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub settled: bool,
    /// Settlement outcome code (0 void, 1 outcome one, 2 outcome two).
    #[serde(default, deserialize_with = "lenient_raw")]
    pub outcome: Option<RawValue>,
    /// When the trade was placed.
    #[serde(default)]
    pub bet_time: Option<RawTimestamp>,
    /// When the market settled.
    #[serde(default)]
    pub settle_date: Option<RawTimestamp>,
}

impl Fill {
    /// A pending fill with a raw fixed-point odds field and a minor-unit stake.
    #[must_use]
    pub fn new(market_id: MarketId, side: Side, odds: RawValue, stake: RawValue) -> Self {
        Self {
            market_id,
            betting_outcome_one: side.is_outcome_one(),
            odds: Some(odds),
            stake: Some(stake),
            normalized_stake: None,
            bet_time_value: None,
            settled: false,
            outcome: None,
            bet_time: None,
            settle_date: None,
        }
    }

    /// Set the bet timestamp (epoch seconds).
    #[must_use]
    pub fn placed_at(mut self, epoch_secs: i64) -> Self {
        self.bet_time = Some(RawTimestamp::Epoch(epoch_secs));
        self
    }

    /// Mark the fill settled with the given outcome code.
    #[must_use]
    pub fn settled_with(mut self, outcome: i64, settle_secs: i64) -> Self {
        self.settled = true;
        self.outcome = Some(RawValue::Text(outcome.to_string()));
        self.settle_date = Some(RawTimestamp::Epoch(settle_secs));
        self
    }

    /// Side the bettor backed.
    #[must_use]
    pub const fn side(&self) -> Side {
        Side::from_outcome_one(self.betting_outcome_one)
    }

    /// Decimal odds of the fill, 0.0 when missing or unusable.
    #[must_use]
    pub fn decimal_odds(&self) -> f64 {
        self.odds.as_ref().map_or(0.0, decimal_odds)
    }

    /// Stake in currency units following the documented fallback chain.
    ///
    /// A field counts as present only if it parses to a finite, non-zero
    /// value; otherwise the next field is tried.
    #[must_use]
    pub fn stake_amount(&self) -> f64 {
        let usable = |value: f64| value.is_finite() && value != 0.0;

        self.normalized_stake
            .as_ref()
            .and_then(RawValue::to_amount)
            .filter(|v| usable(*v))
            .or_else(|| {
                self.bet_time_value
                    .as_ref()
                    .and_then(RawValue::to_amount)
                    .filter(|v| usable(*v))
            })
            .or_else(|| {
                self.stake
                    .as_ref()
                    .and_then(minor_units_to_amount)
                    .filter(|v| usable(*v))
            })
            .unwrap_or(0.0)
    }

    /// Bet time in epoch seconds, 0 when missing.
    #[must_use]
    pub fn bet_time_secs(&self) -> i64 {
        self.bet_time
            .as_ref()
            .and_then(RawTimestamp::epoch_secs)
            .unwrap_or(0)
    }

    /// Settlement time in epoch seconds, if known.
    #[must_use]
    pub fn settle_secs(&self) -> Option<i64> {
        self.settle_date.as_ref().and_then(RawTimestamp::epoch_secs)
    }

    /// Decoded settlement outcome, if any.
    #[must_use]
    pub fn outcome_code(&self) -> Option<OutcomeCode> {
        self.outcome
            .as_ref()
            .and_then(RawValue::to_integer)
            .and_then(OutcomeCode::from_code)
    }
}
