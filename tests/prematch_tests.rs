mod support;

use support::assertions::{assert_near, TOLERANCE};
use surebet::domain::{
    analyze_prematches, required_odds_for_roi, MarketId, Markets, OrderBooks, PrematchConfig,
    Recommendation, ScoreBreakdown, ScoreWeights, Side, INFEASIBLE_ODDS,
};
use surebet::testkit::domain::{market_starting_at, offer};

const NOW: i64 = 1_800_000_000;
const HOUR: i64 = 3_600;

#[test]
fn tennis_scenario_scores_ninety_eight() {
    let opp_odds = 1.0 / 0.78;
    let breakdown = ScoreBreakdown::compute(4.0, opp_odds, 600.0, 2.0, "Tennis");

    assert_eq!(breakdown.odds, 1.0);
    assert_eq!(breakdown.liquidity, 1.0);
    assert_eq!(breakdown.spread, 0.9);
    assert_eq!(breakdown.timing, 1.0);
    assert_eq!(breakdown.sport, 1.0);
    assert_near(ScoreWeights::default().total(&breakdown), 98.0, TOLERANCE);
}

#[test]
fn required_odds_scenarios() {
    assert_near(required_odds_for_roi(1.4, 3.0), 1.4 * 1.03 / 0.37, TOLERANCE);
    assert_near(required_odds_for_roi(1.4, 3.0), 3.897, 1e-3);
    assert_eq!(required_odds_for_roi(1.02, 3.0), INFEASIBLE_ODDS);
    assert_eq!(required_odds_for_roi(1.01, 0.0), INFEASIBLE_ODDS);
}

fn upcoming(offset: i64, sport: &str, id: &str) -> (MarketId, surebet::domain::Market) {
    (MarketId::new(id), market_starting_at(NOW + offset, sport))
}

#[test]
fn scores_only_markets_inside_the_window() {
    let markets = Markets::from_pairs(vec![
        upcoming(2 * HOUR, "Tennis", "in"),
        upcoming(10 * 60, "Tennis", "too-soon"),
        upcoming(7 * HOUR, "Tennis", "too-late"),
        upcoming(-HOUR, "Tennis", "started"),
    ]);
    let mut entries = Vec::new();
    for id in ["in", "too-soon", "too-late", "started"] {
        entries.push(offer(id, Side::OutcomeOne, 4.0, 600.0));
        entries.push(offer(id, Side::OutcomeTwo, 1.0 / 0.78, 600.0));
    }
    let books = OrderBooks::from_entries(entries);

    let found = analyze_prematches(&markets, &books, NOW, &PrematchConfig::default());
    assert_eq!(found.len(), 1, "only outcome one of the in-window market qualifies");

    let entry = &found[0];
    assert_eq!(entry.market_id.as_str(), "in");
    assert_eq!(entry.side, Side::OutcomeOne);
    assert_near(entry.hours_until, 2.0, TOLERANCE);
    assert_near(entry.score, 98.0, 1e-6);
    assert_near(entry.liquidity, 600.0, 1e-6);
    // 1.282 falls short of 95% of the 1.387 needed for 3%.
    assert!(!entry.viable);
    assert_eq!(entry.recommendation, Recommendation::Good);
    assert_eq!(entry.side_name, "Home");
    assert_eq!(entry.opp_name, "Away");
}

#[test]
fn thin_or_missing_books_are_skipped() {
    let markets = Markets::from_pairs(vec![
        upcoming(2 * HOUR, "Soccer", "thin"),
        upcoming(2 * HOUR, "Soccer", "no-book"),
    ]);
    let books = OrderBooks::from_entries(vec![
        offer("thin", Side::OutcomeOne, 3.0, 20.0),
        offer("thin", Side::OutcomeTwo, 1.6, 20.0),
    ]);
    assert!(analyze_prematches(&markets, &books, NOW, &PrematchConfig::default()).is_empty());
}

#[test]
fn sorted_by_score_then_market() {
    let markets = Markets::from_pairs(vec![
        upcoming(2 * HOUR, "Soccer", "b"),
        upcoming(2 * HOUR, "Soccer", "a"),
        upcoming(2 * HOUR, "Tennis", "c"),
    ]);
    let mut entries = Vec::new();
    for id in ["a", "b", "c"] {
        entries.push(offer(id, Side::OutcomeOne, 3.5, 600.0));
        entries.push(offer(id, Side::OutcomeTwo, 1.4, 600.0));
    }
    let books = OrderBooks::from_entries(entries);

    let found = analyze_prematches(&markets, &books, NOW, &PrematchConfig::default());
    let ids: Vec<&str> = found.iter().map(|o| o.market_id.as_str()).collect();
    assert_eq!(ids, ["c", "a", "b"]);
    assert!(found.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn viable_strong_entry() {
    let markets = Markets::from_pairs(vec![upcoming(2 * HOUR, "Basketball", "m")]);
    let books = OrderBooks::from_entries(vec![
        offer("m", Side::OutcomeOne, 3.2, 800.0),
        offer("m", Side::OutcomeTwo, 1.49, 800.0),
    ]);
    let found = analyze_prematches(&markets, &books, NOW, &PrematchConfig::default());
    assert_eq!(found.len(), 1);
    // required = 3.2 * 1.03 / 2.17 ~ 1.519, 95% of that ~ 1.443
    assert!(found[0].viable);
    assert!(found[0].recommendation.is_strong());
}
