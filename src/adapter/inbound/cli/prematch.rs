//! Handler for `prematch`.

use chrono::Utc;
use tabled::Tabled;
use tracing::info;

use super::command::PrematchArgs;
use super::{format, output, paths};
use crate::domain::{analyze_prematches, PrematchOpportunity, INFEASIBLE_ODDS};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct PrematchRow {
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Sport")]
    sport: String,
    #[tabled(rename = "Back")]
    side: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Opp")]
    opp_odds: String,
    #[tabled(rename = "Need")]
    required: String,
    #[tabled(rename = "Liquidity")]
    liquidity: String,
    #[tabled(rename = "Starts")]
    starts: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Tier")]
    tier: String,
}

impl From<&PrematchOpportunity> for PrematchRow {
    fn from(opp: &PrematchOpportunity) -> Self {
        let required = if opp.required_odds >= INFEASIBLE_ODDS {
            "-".to_string()
        } else {
            format::odds(opp.required_odds)
        };
        Self {
            event: opp.event.clone(),
            sport: opp.sport.clone(),
            side: opp.side_name.clone(),
            odds: format::odds(opp.odds),
            opp_odds: format::odds(opp.opp_odds),
            required,
            liquidity: format::money(opp.liquidity),
            starts: format!("{:.1}h", opp.hours_until),
            score: format!("{:.1}", opp.score),
            tier: opp.recommendation.to_string(),
        }
    }
}

/// Execute `prematch`.
pub fn execute(config: &Config, args: &PrematchArgs) -> Result<()> {
    let dir = paths::snapshot_dir(&args.source, config);
    let markets = dir.load_markets()?;
    let books = dir.load_orders()?;

    let mut prematch = config.prematch_config();
    if let Some(min_roi) = args.min_roi {
        prematch.min_roi = min_roi;
    }
    let now = args.now.unwrap_or_else(|| Utc::now().timestamp());

    let mut ranked = analyze_prematches(&markets, &books, now, &prematch);
    let total = ranked.len();
    let strong = ranked.iter().filter(|o| o.recommendation.is_strong()).count();
    ranked.truncate(args.limit);
    info!(markets = markets.len(), scored = total, strong, "pre-match scan complete");

    if output::is_json() {
        output::record("prematch", &ranked);
        return Ok(());
    }

    output::section("Pre-match Entries");
    if ranked.is_empty() {
        output::note(&format!(
            "No markets start between {}h and {}h with at least {} liquidity",
            prematch.min_hours, prematch.max_hours, prematch.min_liquidity
        ));
        return Ok(());
    }
    output::table(ranked.iter().map(PrematchRow::from));
    output::field("Scored", total);
    output::field("Strong", output::positive(strong));
    output::field("Target ROI", format::percent(prematch.min_roi));
    Ok(())
}
