//! Snapshot directories for tests that go through the file loader.

use std::fs;
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::domain::{Fill, Market, OrderBookEntry};
use crate::infrastructure::snapshot::{MARKETS_FILE, ORDERS_FILE, TRADES_FILE};

/// Write `trades.json`, `markets.json` and `orders.json` into `dir`.
///
/// Trades use the `{"data": {"trades": [...]}}` envelope and markets the
/// map form keyed by market id, matching what the fetcher stores.
pub fn write_snapshot(
    dir: &Path,
    fills: &[Fill],
    markets: &[(&str, Market)],
    orders: &[OrderBookEntry],
) -> std::io::Result<()> {
    let trades = json!({ "data": { "trades": fills } });

    let mut market_map = Map::new();
    for (id, market) in markets {
        market_map.insert((*id).to_string(), serde_json::to_value(market)?);
    }

    write_json(&dir.join(TRADES_FILE), &trades)?;
    write_json(&dir.join(MARKETS_FILE), &Value::Object(market_map))?;
    write_json(&dir.join(ORDERS_FILE), &serde_json::to_value(orders)?)
}

fn write_json(path: &Path, value: &Value) -> std::io::Result<()> {
    fs::write(path, serde_json::to_string_pretty(value)?)
}
