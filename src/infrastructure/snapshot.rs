//! Snapshot files written by the exchange fetcher.
//!
//! A snapshot directory holds `trades.json`, `markets.json` and
//! `orders.json` in the exchange's response shapes. Whole-file problems
//! (missing file, invalid JSON) are errors. Unrecognised shapes are logged
//! and yield an empty collection, and records that fail to decode are
//! skipped, so one bad row never sinks a scan.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{Fill, Market, MarketId, Markets, OrderBookEntry, OrderBooks};
use crate::error::SnapshotError;

pub const TRADES_FILE: &str = "trades.json";
pub const MARKETS_FILE: &str = "markets.json";
pub const ORDERS_FILE: &str = "orders.json";

/// Everything one scan pass needs.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Fills sorted by bet time ascending.
    pub fills: Vec<Fill>,
    pub markets: Markets,
    pub books: OrderBooks,
}

/// A directory of snapshot files.
#[derive(Debug, Clone)]
pub struct SnapshotDir {
    root: PathBuf,
}

impl SnapshotDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load and decode `trades.json`.
    pub fn load_fills(&self) -> Result<Vec<Fill>, SnapshotError> {
        read_json(&self.root.join(TRADES_FILE)).map(decode_fills)
    }

    /// Load and decode `markets.json`.
    pub fn load_markets(&self) -> Result<Markets, SnapshotError> {
        read_json(&self.root.join(MARKETS_FILE)).map(decode_markets)
    }

    /// Load and decode `orders.json`.
    pub fn load_orders(&self) -> Result<OrderBooks, SnapshotError> {
        read_json(&self.root.join(ORDERS_FILE)).map(decode_orders)
    }

    /// Load all three files.
    pub fn load(&self) -> Result<Snapshot, SnapshotError> {
        Ok(Snapshot {
            fills: self.load_fills()?,
            markets: self.load_markets()?,
            books: self.load_orders()?,
        })
    }
}

fn read_json(path: &Path) -> Result<Value, SnapshotError> {
    let content = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SnapshotError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Strip a `{"data": ...}` response envelope if present.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn decode_records<T: DeserializeOwned>(kind: &'static str, records: Vec<Value>) -> Vec<T> {
    let total = records.len();
    let decoded: Vec<T> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!(kind, index, error = %e, "skipping malformed record");
                None
            }
        })
        .collect();
    if decoded.len() < total {
        debug!(kind, total, kept = decoded.len(), "dropped malformed records");
    }
    decoded
}

/// Decode trades from a bare array or `{"data": {"trades": [...]}}`.
///
/// The result is sorted by bet time ascending, as position aggregation expects.
#[must_use]
pub fn decode_fills(value: Value) -> Vec<Fill> {
    let records = match unwrap_envelope(value) {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("trades") {
            Some(Value::Array(items)) => items,
            _ => {
                warn!(kind = "trades", "unrecognised snapshot shape, expected trade list");
                return Vec::new();
            }
        },
        _ => {
            warn!(kind = "trades", "unrecognised snapshot shape, expected trade list");
            return Vec::new();
        }
    };

    let mut fills: Vec<Fill> = decode_records("trade", records);
    fills.sort_by_key(Fill::bet_time_secs);
    fills
}

/// Decode markets from a bare array or a map keyed by market id.
#[must_use]
pub fn decode_markets(value: Value) -> Markets {
    let pairs: Vec<(MarketId, Market)> = match unwrap_envelope(value) {
        Value::Array(items) => decode_records::<Market>("market", items)
            .into_iter()
            .filter_map(|market| match market.market_id.clone() {
                Some(id) => Some((id, market)),
                None => {
                    debug!("skipping market without marketHash");
                    None
                }
            })
            .collect(),
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(id, record)| match serde_json::from_value::<Market>(record) {
                Ok(market) => Some((MarketId::new(id), market)),
                Err(e) => {
                    debug!(market_id = %id, error = %e, "skipping malformed market");
                    None
                }
            })
            .collect(),
        _ => {
            warn!(kind = "markets", "unrecognised snapshot shape, expected list or map");
            return Markets::default();
        }
    };
    Markets::from_pairs(pairs)
}

/// Decode orders from a bare array or a map of market id to order arrays.
///
/// In the map form the key supplies `marketHash` when an order lacks it.
#[must_use]
pub fn decode_orders(value: Value) -> OrderBooks {
    let records: Vec<Value> = match unwrap_envelope(value) {
        Value::Array(items) => items,
        Value::Object(map) => map
            .into_iter()
            .flat_map(|(market_id, orders)| match orders {
                Value::Array(items) => items
                    .into_iter()
                    .map(|mut order| {
                        if let Value::Object(fields) = &mut order {
                            fields
                                .entry("marketHash")
                                .or_insert_with(|| Value::String(market_id.clone()));
                        }
                        order
                    })
                    .collect::<Vec<_>>(),
                _ => {
                    debug!(market_id = %market_id, "skipping non-list order entry");
                    Vec::new()
                }
            })
            .collect(),
        _ => {
            warn!(kind = "orders", "unrecognised snapshot shape, expected list or map");
            return OrderBooks::default();
        }
    };
    OrderBooks::from_entries(decode_records::<OrderBookEntry>("order", records))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::Side;

    #[test]
    fn fills_from_envelope_are_sorted_and_skip_bad_rows() {
        let value = json!({"data": {"trades": [
            {"marketHash": "m", "bettingOutcomeOne": true, "odds": "50000000000000000000",
             "stake": "10000000", "betTime": 200},
            {"bettingOutcomeOne": true},
            {"marketHash": "m", "bettingOutcomeOne": true, "odds": "50000000000000000000",
             "stake": "10000000", "betTime": 100}
        ]}});
        let fills = decode_fills(value);
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].bet_time_secs(), 100);
    }

    #[test]
    fn fills_with_unknown_shape_are_empty() {
        assert!(decode_fills(json!("nope")).is_empty());
        assert!(decode_fills(json!({"data": {"other": []}})).is_empty());
    }

    #[test]
    fn markets_from_map_use_key_as_id() {
        let markets = decode_markets(json!({
            "0xa": {"teamOneName": "A", "teamTwoName": "B"},
            "0xb": "garbage"
        }));
        assert_eq!(markets.len(), 1);
        let market = markets.get(&MarketId::new("0xa")).unwrap();
        assert_eq!(market.event_name(), "A vs B");
    }

    #[test]
    fn markets_from_array_need_hash() {
        let markets = decode_markets(json!([
            {"marketHash": "0xa", "sportLabel": "Tennis"},
            {"sportLabel": "Soccer"}
        ]));
        assert_eq!(markets.len(), 1);
        assert_eq!(markets.get(&MarketId::new("0xa")).unwrap().sport(), "Tennis");
    }

    #[test]
    fn orders_from_map_fill_market_hash() {
        let books = decode_orders(json!({"data": {
            "0xa": [
                {"isMakerBettingOutcomeOne": true, "percentageOdds": "50000000000000000000",
                 "fillAmount": "100000000", "orderHash": "h1"}
            ],
            "0xb": "nope"
        }}));
        let book = books.get(&MarketId::new("0xa")).unwrap();
        assert!((book.best_taker_odds(Side::OutcomeTwo) - 2.0).abs() < 1e-9);
        assert!((book.liquidity(Side::OutcomeTwo) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn orders_with_unknown_shape_are_empty() {
        assert_eq!(decode_orders(json!(42)).order_count(), 0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SnapshotDir::new(dir.path()).load_fills();
        assert!(matches!(result, Err(SnapshotError::Read { .. })));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ORDERS_FILE), "{not json").unwrap();
        let result = SnapshotDir::new(dir.path()).load_orders();
        assert!(matches!(result, Err(SnapshotError::Decode { .. })));
    }
}
