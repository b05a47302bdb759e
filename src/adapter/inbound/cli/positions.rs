//! Handlers for `positions` and `history`.

use tabled::Tabled;

use super::command::{HistoryArgs, SnapshotArg};
use super::{format, output, paths};
use crate::domain::{active_positions, aggregate_positions, settled_history, MarketLabels, Markets, Position};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

fn labels(markets: &Markets, position: &Position) -> Option<MarketLabels> {
    markets
        .get(&position.market_id)
        .map(|market| MarketLabels::new(market, position.side))
}

#[derive(Tabled)]
struct ActiveRow {
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Type")]
    market_type: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Payout")]
    payout: String,
    #[tabled(rename = "Fills")]
    fills: usize,
    #[tabled(rename = "Last bet")]
    last_bet: String,
}

impl ActiveRow {
    fn new(position: &Position, markets: &Markets) -> Self {
        let labels = labels(markets, position);
        Self {
            event: format::event(labels.as_ref(), position),
            market_type: labels
                .as_ref()
                .map_or_else(|| "-".to_string(), |l| l.market_type.clone()),
            side: format::side(labels.as_ref(), position),
            stake: format::money(position.total_stake),
            odds: format::odds(position.avg_odds),
            payout: format::money(position.potential_payout),
            fills: position.fill_count,
            last_bet: format::epoch(position.last_bet_time),
        }
    }
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Settled")]
    settled: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Result")]
    result: &'static str,
    #[tabled(rename = "P&L")]
    pnl: String,
}

impl HistoryRow {
    fn new(position: &Position, markets: &Markets) -> Self {
        let labels = labels(markets, position);
        Self {
            settled: format::epoch(position.history_time()),
            event: format::event(labels.as_ref(), position),
            side: format::side(labels.as_ref(), position),
            stake: format::money(position.total_stake),
            odds: format::odds(position.avg_odds),
            result: position.result.label(),
            pnl: format::signed_money(position.realized_pnl()),
        }
    }
}

/// Execute `positions`.
pub fn execute_active(config: &Config, arg: &SnapshotArg) -> Result<()> {
    let dir = paths::snapshot_dir(arg, config);
    let fills = dir.load_fills()?;
    let markets = dir.load_markets()?;
    let active = active_positions(&aggregate_positions(&fills));

    if output::is_json() {
        output::record("positions", &active);
        return Ok(());
    }

    output::section("Active Positions");
    if active.is_empty() {
        output::note("No pending positions");
        return Ok(());
    }
    output::table(active.iter().map(|p| ActiveRow::new(p, &markets)));
    let staked: f64 = active.iter().map(|p| p.total_stake).sum();
    output::field("Positions", active.len());
    output::field("Staked", format::money(staked));
    Ok(())
}

/// Execute `history`.
pub fn execute_history(config: &Config, args: &HistoryArgs) -> Result<()> {
    let dir = paths::snapshot_dir(&args.source, config);
    let fills = dir.load_fills()?;
    let markets = dir.load_markets()?;
    let history = settled_history(&aggregate_positions(&fills), args.limit);

    if output::is_json() {
        let entries: Vec<serde_json::Value> = history
            .iter()
            .map(|p| {
                serde_json::json!({
                    "position": p,
                    "pnl": p.realized_pnl(),
                })
            })
            .collect();
        output::record("history", &entries);
        return Ok(());
    }

    output::section("Settled Positions");
    if history.is_empty() {
        output::note("No settled positions");
        return Ok(());
    }
    output::table(history.iter().map(|p| HistoryRow::new(p, &markets)));
    let pnl: f64 = history.iter().map(Position::realized_pnl).sum();
    output::field("Shown", history.len());
    output::field("P&L", output::signed(pnl, format::signed_money(pnl)));
    Ok(())
}
