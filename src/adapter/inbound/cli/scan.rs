//! Handlers for `scan` and `closed`.

use tabled::Tabled;
use tracing::info;

use super::command::{ScanArgs, SnapshotArg};
use super::{format, output, paths};
use crate::application::scan::run_scan;
use crate::domain::{aggregate_positions, detect_closed_surebets, ArbitrageOpportunity, ClosedSurebet};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Held")]
    side: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Live opp")]
    live_opp: String,
    #[tabled(rename = "Hedge")]
    hedge: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "ROI")]
    roi: String,
}

impl From<&ArbitrageOpportunity> for OpportunityRow {
    fn from(opp: &ArbitrageOpportunity) -> Self {
        let labels = opp.labels.as_ref();
        Self {
            event: format::event(labels, &opp.position),
            side: format::side(labels, &opp.position),
            stake: format::money(opp.position.total_stake),
            odds: format::odds(opp.position.avg_odds),
            live_opp: format::odds(opp.live_opp_odds),
            hedge: format::money(opp.hedge.hedge_stake),
            profit: format::money(opp.hedge.guaranteed_profit),
            roi: format::percent(opp.hedge.roi),
        }
    }
}

#[derive(Tabled)]
struct ClosedRow {
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Leg 1")]
    leg_one: String,
    #[tabled(rename = "Leg 2")]
    leg_two: String,
    #[tabled(rename = "Staked")]
    staked: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "ROI")]
    roi: String,
}

impl From<&ClosedSurebet> for ClosedRow {
    fn from(surebet: &ClosedSurebet) -> Self {
        let leg = |stake: f64, odds: f64| format!("{} @ {}", format::money(stake), format::odds(odds));
        Self {
            event: format::event(surebet.labels.as_ref(), &surebet.leg_one),
            leg_one: leg(surebet.leg_one.total_stake, surebet.leg_one.avg_odds),
            leg_two: leg(surebet.leg_two.total_stake, surebet.leg_two.avg_odds),
            staked: format::money(surebet.combined_stake),
            profit: format::money(surebet.guaranteed_profit),
            roi: format::percent(surebet.roi),
        }
    }
}

/// Print opportunities as a table, or a note when there are none.
pub fn print_opportunities(opportunities: &[ArbitrageOpportunity]) {
    output::section("Arbitrage Opportunities");
    if opportunities.is_empty() {
        output::note("No hedgeable positions at current prices");
        return;
    }
    output::table(opportunities.iter().map(OpportunityRow::from));
}

fn print_closed(closed: &[ClosedSurebet]) {
    output::section("Closed Surebets");
    if closed.is_empty() {
        output::note("No markets are covered on both sides");
        return;
    }
    output::table(closed.iter().map(ClosedRow::from));
    let locked: f64 = closed.iter().map(|s| s.guaranteed_profit).sum();
    output::field("Locked profit", output::signed(locked, format::money(locked)));
}

/// Execute `scan`.
pub fn execute_scan(config: &Config, args: &ScanArgs) -> Result<()> {
    let dir = paths::snapshot_dir(&args.source, config);
    let snapshot = dir.load()?;
    let positions = aggregate_positions(&snapshot.fills);

    let mut arbitrage = config.arbitrage_config();
    if let Some(min_roi) = args.min_roi {
        arbitrage.min_roi = min_roi;
    }

    let report = run_scan(&positions, &snapshot.books, &snapshot.markets, &arbitrage);
    info!(
        positions = positions.len(),
        markets = snapshot.books.market_count(),
        opportunities = report.opportunities.len(),
        closed = report.closed.len(),
        "scan complete"
    );

    if output::is_json() {
        output::record("scan", &report);
        return Ok(());
    }

    print_opportunities(&report.opportunities);
    print_closed(&report.closed);

    if let Some(best) = report.opportunities.first() {
        output::section("Best");
        output::field("Market", output::highlight(best.position.market_id.as_str()));
        output::field("Hedge", format!(
            "back {} with {} at {} or better",
            best.position.side.opposite(),
            format::money(best.hedge.hedge_stake),
            format::odds(best.live_opp_odds)
        ));
        output::field("Same side", format::odds(best.live_same_odds));
        output::field("Guaranteed", output::positive(format::money(best.guaranteed_profit())));
    }
    Ok(())
}

/// Execute `closed`.
pub fn execute_closed(config: &Config, arg: &SnapshotArg) -> Result<()> {
    let dir = paths::snapshot_dir(arg, config);
    let fills = dir.load_fills()?;
    let markets = dir.load_markets()?;
    let closed = detect_closed_surebets(&aggregate_positions(&fills), &markets);
    info!(closed = closed.len(), "closed surebet scan complete");

    if output::is_json() {
        output::record("closed", &closed);
        return Ok(());
    }
    print_closed(&closed);
    Ok(())
}
