//! Handler for `stats`.

use std::collections::BTreeMap;

use tabled::Tabled;

use super::command::SnapshotArg;
use super::{format, output, paths};
use crate::domain::{aggregate_positions, compute_statistics, BucketStats};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Won")]
    won: usize,
    #[tabled(rename = "Lost")]
    lost: usize,
    #[tabled(rename = "Void")]
    void: usize,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "P&L")]
    pnl: String,
    #[tabled(rename = "ROI")]
    roi: String,
}

fn bucket_rows(buckets: &BTreeMap<String, BucketStats>) -> Vec<BucketRow> {
    let mut rows: Vec<(&String, &BucketStats)> = buckets.iter().collect();
    rows.sort_by(|a, b| b.1.pnl.total_cmp(&a.1.pnl).then_with(|| a.0.cmp(b.0)));
    rows.into_iter()
        .map(|(name, bucket)| BucketRow {
            name: name.clone(),
            won: bucket.won,
            lost: bucket.lost,
            void: bucket.void,
            stake: format::money(bucket.stake),
            pnl: format::signed_money(bucket.pnl),
            roi: format::percent(bucket.roi),
        })
        .collect()
}

/// Execute `stats`.
pub fn execute(config: &Config, arg: &SnapshotArg) -> Result<()> {
    let dir = paths::snapshot_dir(arg, config);
    let fills = dir.load_fills()?;
    let markets = dir.load_markets()?;
    let stats = compute_statistics(&aggregate_positions(&fills), &markets);

    if output::is_json() {
        output::record("stats", &stats);
        return Ok(());
    }

    output::section("Positions");
    output::field("Total", stats.total);
    output::field("Active", stats.active);
    output::field("Settled", stats.settled);

    output::section("Results");
    output::field(
        "Won / Lost",
        format!("{} / {} ({} void)", stats.won, stats.lost, stats.void),
    );
    output::field("Win rate", format::percent(stats.win_rate));
    output::field("Staked", format::money(stats.settled_stake));
    output::field("P&L", output::signed(stats.pnl, format::signed_money(stats.pnl)));
    output::field("ROI", output::signed(stats.roi, format::percent(stats.roi)));

    if !stats.by_sport.is_empty() {
        output::section("By Sport");
        output::table(bucket_rows(&stats.by_sport));
    }
    if !stats.by_league.is_empty() {
        output::section("By League");
        output::table(bucket_rows(&stats.by_league));
    }
    Ok(())
}
