//! Handlers for the `hedge` command group.

use tracing::info;

use super::command::{PlanArgs, RecommendArgs};
use super::{format, output, paths};
use crate::domain::{plan_hedge, recommend_hedge, MarketId, Side};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;

/// Execute `hedge recommend`.
pub fn execute_recommend(config: &Config, args: &RecommendArgs) -> Result<()> {
    let target_roi = args.roi.unwrap_or(config.prematch.min_roi);

    let Some(recommendation) = recommend_hedge(args.stake, args.odds, target_roi) else {
        output::warning(&format!(
            "no positive hedge reaches {} on {} @ {}",
            format::percent(target_roi),
            format::money(args.stake),
            format::odds(args.odds)
        ));
        return Ok(());
    };

    if output::is_json() {
        output::record("recommendation", &recommendation);
        return Ok(());
    }

    output::section("Hedge Recommendation");
    output::field("Payout", format::money(recommendation.potential_payout));
    output::field("Target ROI", format::percent(recommendation.target_roi));
    output::field("Hedge stake", output::highlight(format::money(recommendation.stake)));
    output::field("Min odds", output::highlight(format::odds(recommendation.min_odds)));
    Ok(())
}

/// Execute `hedge plan`.
pub fn execute_plan(config: &Config, args: &PlanArgs) -> Result<()> {
    let dir = paths::snapshot_dir(&args.source, config);
    let books = dir.load_orders()?;
    let market_id = MarketId::new(args.market.clone());
    let book = books
        .get(&market_id)
        .ok_or_else(|| Error::MarketNotFound(market_id.to_string()))?;

    let side = Side::from(args.side);
    let plan = plan_hedge(
        book,
        side,
        args.stake,
        args.min_odds,
        args.balance,
        &config.hedge_config(),
    )?;
    info!(
        market_id = %plan.market_id,
        order = %plan.order_hash,
        stake = plan.stake,
        odds = plan.taker_odds,
        "hedge planned"
    );

    if output::is_json() {
        output::record("plan", &plan);
        return Ok(());
    }

    output::section("Hedge Plan");
    output::field("Market", plan.market_id.as_str());
    output::field("Back", plan.side);
    output::field("Order", plan.order_hash.as_str());
    output::field("Taker odds", output::highlight(format::odds(plan.taker_odds)));
    output::field("Stake", output::highlight(format::money(plan.stake)));
    output::field("Amount", plan.taker_amount);
    if plan.stake_reduced {
        output::warning(&format!(
            "stake reduced from {} to {}",
            format::money(args.stake),
            format::money(plan.stake)
        ));
    }
    Ok(())
}
