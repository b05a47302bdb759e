//! Exchange-native numeric encodings.
//!
//! The exchange publishes odds as implied probabilities in fixed point with
//! 20 decimal places, and currency amounts in minor units with 6 decimal
//! places. Both arrive as JSON strings or numbers and may be missing or
//! malformed. Every conversion here is total: bad input degrades to `None`
//! or zero instead of failing the pass.
//!
//! Parsing goes through [`Decimal`] so that a value such as
//! `"75000000000000000000"` converts to exactly `0.75` before it becomes a
//! float.
//!
//! [`lenient_flag`] and [`lenient_raw`] are `deserialize_with` adapters for
//! record fields: a wrongly typed value reads as `false` or `None` so the
//! rest of the record still decodes.

use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Fixed-point scale of implied-probability odds (10^20).
///
/// Spelled out as 96-bit mantissa parts because the literal overflows `u64`.
pub const ODDS_SCALE: Decimal = Decimal::from_parts(1_661_992_960, 1_808_227_885, 5, false, 0);

/// Minor units per currency unit (10^6).
pub const USDC_SCALE: Decimal = dec!(1000000);

/// A raw numeric field as received from the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Decimal digits in a JSON string.
    Text(String),
    /// A JSON number.
    Number(f64),
}

impl RawValue {
    /// Parse as an exact decimal, if possible.
    #[must_use]
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            RawValue::Text(text) => {
                let text = text.trim();
                Decimal::from_str(text)
                    .or_else(|_| Decimal::from_scientific(text))
                    .ok()
            }
            RawValue::Number(value) if value.is_finite() => Decimal::from_f64(*value),
            RawValue::Number(_) => None,
        }
    }

    /// Interpret as a plain amount already expressed in the target unit.
    #[must_use]
    pub fn to_amount(&self) -> Option<f64> {
        match self {
            RawValue::Number(value) if value.is_finite() => Some(*value),
            RawValue::Number(_) => None,
            RawValue::Text(_) => self.to_decimal()?.to_f64(),
        }
    }

    /// Divide by a fixed-point scale and return the result as a float.
    #[must_use]
    pub fn scaled(&self, scale: Decimal) -> Option<f64> {
        match self {
            RawValue::Number(value) if value.is_finite() => Some(value / scale.to_f64()?),
            RawValue::Number(_) => None,
            RawValue::Text(_) => self.to_decimal()?.checked_div(scale)?.to_f64(),
        }
    }

    /// Interpret as a whole number, such as an outcome or market-type code.
    ///
    /// `"1"`, `1` and `1.0` all read as 1; fractional values are `None`.
    #[must_use]
    pub fn to_integer(&self) -> Option<i64> {
        let value = self.to_decimal()?;
        if value.fract().is_zero() {
            value.to_i64()
        } else {
            None
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseFlag {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Read a boolean flag that may be null or wrongly typed.
///
/// Null and unrecognised values are `false`. Numbers are `true` when
/// non-zero; strings when they spell `true` or `1`.
///
/// # Errors
///
/// Only fails if the deserializer itself fails.
pub fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = match Option::<LooseFlag>::deserialize(deserializer)? {
        Some(LooseFlag::Bool(flag)) => flag,
        Some(LooseFlag::Number(value)) => value != 0.0 && !value.is_nan(),
        Some(LooseFlag::Text(text)) => {
            let text = text.trim();
            text.eq_ignore_ascii_case("true") || text == "1"
        }
        Some(LooseFlag::Other(_)) | None => false,
    };
    Ok(flag)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseRaw {
    Raw(RawValue),
    Other(IgnoredAny),
}

/// Read an optional raw numeric field, mapping null and non-numeric shapes
/// (booleans, arrays, objects) to `None`.
///
/// # Errors
///
/// Only fails if the deserializer itself fails.
pub fn lenient_raw<'de, D>(deserializer: D) -> Result<Option<RawValue>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LooseRaw>::deserialize(deserializer)? {
        Some(LooseRaw::Raw(value)) => Ok(Some(value)),
        Some(LooseRaw::Other(_)) | None => Ok(None),
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// Implied probability encoded in fixed point, or `None` when unparsable.
#[must_use]
pub fn implied_probability(raw: &RawValue) -> Option<f64> {
    raw.scaled(ODDS_SCALE)
}

/// Taker decimal odds for a maker implied probability.
///
/// Returns 0.0 unless `0 < implied < 1`, so callers never divide by zero.
#[must_use]
pub fn taker_odds(implied: f64) -> f64 {
    if implied > 0.0 && implied < 1.0 {
        1.0 / (1.0 - implied)
    } else {
        0.0
    }
}

/// Decimal odds for a raw fixed-point odds field.
///
/// 0.0 marks the odds as unusable: unparsable input, or an implied
/// probability outside the open interval (0, 1).
#[must_use]
pub fn decimal_odds(raw: &RawValue) -> f64 {
    implied_probability(raw).map_or(0.0, taker_odds)
}

/// Currency amount for a raw minor-unit field, or `None` when unparsable.
#[must_use]
pub fn minor_units_to_amount(raw: &RawValue) -> Option<f64> {
    raw.scaled(USDC_SCALE)
}

/// Convert a currency amount to whole minor units, rounding down.
///
/// Negative or non-finite amounts map to zero.
#[must_use]
pub fn amount_to_minor_units(amount: f64) -> u128 {
    if !amount.is_finite() || amount <= 0.0 {
        return 0;
    }
    Decimal::from_f64(amount)
        .and_then(|value| value.checked_mul(USDC_SCALE))
        .and_then(|value| value.floor().to_u128())
        .unwrap_or(0)
}
