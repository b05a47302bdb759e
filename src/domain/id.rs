//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Market identifier (the exchange's market hash) - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(String);

impl MarketId {
    /// Create a new `MarketId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the market ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for log lines and tables.
    #[must_use]
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(12) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MarketId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for MarketId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Resting maker order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderHash(String);

impl OrderHash {
    /// Create a new `OrderHash` from a string.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Get the order hash as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderHash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One of the two outcomes of a binary market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Backing outcome one.
    OutcomeOne,
    /// Backing outcome two.
    OutcomeTwo,
}

impl Side {
    /// Map the exchange's `bettingOutcomeOne`-style flag to a side.
    #[must_use]
    pub const fn from_outcome_one(flag: bool) -> Self {
        if flag {
            Side::OutcomeOne
        } else {
            Side::OutcomeTwo
        }
    }

    /// True for [`Side::OutcomeOne`].
    #[must_use]
    pub const fn is_outcome_one(self) -> bool {
        matches!(self, Side::OutcomeOne)
    }

    /// The other side of the market.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::OutcomeOne => Side::OutcomeTwo,
            Side::OutcomeTwo => Side::OutcomeOne,
        }
    }

    /// Settlement outcome code that pays this side (1 or 2).
    #[must_use]
    pub const fn outcome_code(self) -> u8 {
        match self {
            Side::OutcomeOne => 1,
            Side::OutcomeTwo => 2,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::OutcomeOne => write!(f, "one"),
            Side::OutcomeTwo => write!(f, "two"),
        }
    }
}

/// Stable identity of a position: market × side.
///
/// Used to de-duplicate alerts across scan passes, so it must not depend on
/// stake, odds or settlement state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PositionKey {
    market_id: MarketId,
    side: Side,
}

impl PositionKey {
    /// Create a key for the given market and side.
    #[must_use]
    pub fn new(market_id: MarketId, side: Side) -> Self {
        Self { market_id, side }
    }

    /// The market half of the key.
    #[must_use]
    pub fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    /// The side half of the key.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = if self.side.is_outcome_one() { "1" } else { "0" };
        write!(f, "{}__{}", self.market_id, flag)
    }
}
