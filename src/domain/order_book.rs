//! Resting maker orders and the taker quotes derived from them.
//!
//! A maker backing one outcome offers takers the other one, so every query
//! here is phrased from the taker's point of view: "the side I want to
//! back" is served by makers on the opposite side.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::id::{MarketId, OrderHash, Side};
use super::scale::{
    implied_probability, lenient_flag, lenient_raw, minor_units_to_amount, taker_odds, RawValue,
};

/// A resting maker order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookEntry {
    /// Market the order rests on.
    #[serde(rename = "marketHash")]
    pub market_id: MarketId,
    /// True when the maker backs outcome one; null reads as outcome two.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_maker_betting_outcome_one: bool,
    /// Maker implied probability in fixed point (scale 10^20).
    #[serde(default, deserialize_with = "lenient_raw")]
    pub percentage_odds: Option<RawValue>,
    /// Remaining fillable amount in minor units.
    #[serde(default, deserialize_with = "lenient_raw")]
    pub fill_amount: Option<RawValue>,
    /// Order identifier, needed to execute against the order.
    #[serde(default)]
    pub order_hash: Option<OrderHash>,
}

impl OrderBookEntry {
    /// Side the maker is backing.
    #[must_use]
    pub const fn maker_side(&self) -> Side {
        Side::from_outcome_one(self.is_maker_betting_outcome_one)
    }

    /// Side a taker backs when filling this order.
    #[must_use]
    pub const fn taker_side(&self) -> Side {
        self.maker_side().opposite()
    }

    /// Maker implied probability, if parsable.
    #[must_use]
    pub fn maker_implied(&self) -> Option<f64> {
        self.percentage_odds.as_ref().and_then(implied_probability)
    }

    /// Decimal odds a taker receives, 0.0 when the order is unusable.
    #[must_use]
    pub fn taker_odds(&self) -> f64 {
        self.maker_implied().map_or(0.0, taker_odds)
    }

    /// Fillable amount in currency units, 0.0 when missing or malformed.
    #[must_use]
    pub fn fillable(&self) -> f64 {
        self.fill_amount
            .as_ref()
            .and_then(minor_units_to_amount)
            .filter(|amount| amount.is_finite())
            .unwrap_or(0.0)
    }
}

/// All resting orders for one market.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderBook {
    entries: Vec<OrderBookEntry>,
}

impl OrderBook {
    /// Wrap a list of entries.
    #[must_use]
    pub fn new(entries: Vec<OrderBookEntry>) -> Self {
        Self { entries }
    }

    /// All entries in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[OrderBookEntry] {
        &self.entries
    }

    /// True when there are no resting orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries a taker backing `side` can fill.
    pub fn offers_for(&self, side: Side) -> impl Iterator<Item = &OrderBookEntry> {
        self.entries.iter().filter(move |e| e.taker_side() == side)
    }

    /// Best decimal odds a taker can get backing `side`.
    ///
    /// Orders with an implied probability outside (0, 1) are ignored.
    /// Returns 0.0 when nothing usable rests on the book.
    #[must_use]
    pub fn best_taker_odds(&self, side: Side) -> f64 {
        self.offers_for(side)
            .map(OrderBookEntry::taker_odds)
            .fold(0.0, f64::max)
    }

    /// Total fillable amount available to a taker backing `side`.
    #[must_use]
    pub fn liquidity(&self, side: Side) -> f64 {
        self.offers_for(side).map(OrderBookEntry::fillable).sum()
    }
}

/// Order books keyed by market.
#[derive(Debug, Clone, Default)]
pub struct OrderBooks {
    books: HashMap<MarketId, OrderBook>,
}

impl OrderBooks {
    /// Group a flat list of entries by market, keeping arrival order.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = OrderBookEntry>) -> Self {
        let mut books: HashMap<MarketId, OrderBook> = HashMap::new();
        for entry in entries {
            books
                .entry(entry.market_id.clone())
                .or_default()
                .entries
                .push(entry);
        }
        Self { books }
    }

    /// Book for a market, if any orders rest on it.
    #[must_use]
    pub fn get(&self, market_id: &MarketId) -> Option<&OrderBook> {
        self.books.get(market_id)
    }

    /// Number of markets with at least one order.
    #[must_use]
    pub fn market_count(&self) -> usize {
        self.books.len()
    }

    /// Total number of entries across all markets.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.books.values().map(|b| b.entries.len()).sum()
    }

    /// Iterate over `(market, book)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&MarketId, &OrderBook)> {
        self.books.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::order;

    #[test]
    fn best_taker_odds_reads_opposite_makers() {
        // maker backs one at implied 0.75 -> taker on two gets 4.0
        let book = OrderBook::new(vec![
            order("m", Side::OutcomeOne, 0.75, 100.0),
            order("m", Side::OutcomeOne, 0.5, 100.0),
            order("m", Side::OutcomeTwo, 0.6, 100.0),
        ]);

        assert!((book.best_taker_odds(Side::OutcomeTwo) - 4.0).abs() < 1e-9);
        assert!((book.best_taker_odds(Side::OutcomeOne) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn best_taker_odds_skips_invalid_probabilities() {
        let mut bad = order("m", Side::OutcomeOne, 0.5, 100.0);
        bad.percentage_odds = Some(RawValue::from("100000000000000000000"));
        let mut garbage = order("m", Side::OutcomeOne, 0.5, 100.0);
        garbage.percentage_odds = Some(RawValue::from("oops"));

        let book = OrderBook::new(vec![bad, garbage]);
        assert_eq!(book.best_taker_odds(Side::OutcomeTwo), 0.0);
    }

    #[test]
    fn empty_book_has_no_quotes() {
        let book = OrderBook::default();
        assert!(book.is_empty());
        assert_eq!(book.best_taker_odds(Side::OutcomeOne), 0.0);
        assert_eq!(book.liquidity(Side::OutcomeOne), 0.0);
    }

    #[test]
    fn liquidity_sums_opposite_makers() {
        let book = OrderBook::new(vec![
            order("m", Side::OutcomeOne, 0.5, 30.0),
            order("m", Side::OutcomeOne, 0.6, 20.0),
            order("m", Side::OutcomeTwo, 0.6, 1000.0),
        ]);
        assert!((book.liquidity(Side::OutcomeTwo) - 50.0).abs() < 1e-9);
        assert!((book.liquidity(Side::OutcomeOne) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn order_books_group_by_market() {
        let books = OrderBooks::from_entries(vec![
            order("a", Side::OutcomeOne, 0.5, 10.0),
            order("b", Side::OutcomeOne, 0.5, 10.0),
            order("a", Side::OutcomeTwo, 0.5, 10.0),
        ]);
        assert_eq!(books.market_count(), 2);
        assert_eq!(books.order_count(), 3);
        assert_eq!(books.get(&MarketId::new("a")).map(|b| b.entries().len()), Some(2));
        assert!(books.get(&MarketId::new("z")).is_none());
    }
}
