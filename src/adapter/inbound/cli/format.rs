//! Value formatting shared by the table renderers.

use chrono::{DateTime, Utc};

use crate::domain::{MarketLabels, Position};

pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

pub fn signed_money(value: f64) -> String {
    format!("{value:+.2}")
}

pub fn odds(value: f64) -> String {
    format!("{value:.3}")
}

pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Epoch seconds as `YYYY-MM-DD HH:MM` UTC, or `-` when unknown.
pub fn epoch(secs: i64) -> String {
    if secs <= 0 {
        return "-".to_string();
    }
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

/// Event name, or the shortened market id when metadata is missing.
pub fn event(labels: Option<&MarketLabels>, position: &Position) -> String {
    labels.map_or_else(
        || position.market_id.short().to_string(),
        |labels| labels.event.clone(),
    )
}

/// Side name from labels, else the raw side.
pub fn side(labels: Option<&MarketLabels>, position: &Position) -> String {
    labels.map_or_else(|| position.side.to_string(), |labels| labels.side.clone())
}
