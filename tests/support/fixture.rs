use std::path::Path;

use surebet::domain::{Market, RawValue, Side};
use surebet::testkit::domain::{fill, market_starting_at, offer};
use surebet::testkit::snapshot::write_snapshot;

/// Market ids used by [`write_scenario`].
pub const HEDGEABLE: &str = "0xhedgeable";
pub const CLOSED: &str = "0xclosed";
pub const UPCOMING: &str = "0xupcoming";

/// Game start used for the upcoming market; pass `UPCOMING_START - 7200`
/// as `--now` to land two hours before it.
pub const UPCOMING_START: i64 = 1_900_000_000;

fn labelled(home: &str, away: &str, sport: &str) -> Market {
    Market {
        team_one_name: Some(home.into()),
        team_two_name: Some(away.into()),
        outcome_one_name: Some(home.into()),
        outcome_two_name: Some(away.into()),
        sport_label: Some(sport.into()),
        league_label: Some("Test League".into()),
        market_type: Some(RawValue::from("52")),
        ..Market::default()
    }
}

/// A snapshot with one hedgeable position, one closed surebet, one settled
/// win and one upcoming market with liquidity on both sides.
pub fn write_scenario(dir: &Path) {
    let fills = vec![
        fill(HEDGEABLE, Side::OutcomeOne, 4.0, 100.0).placed_at(1_000),
        fill(CLOSED, Side::OutcomeOne, 2.2, 100.0).placed_at(1_100),
        fill(CLOSED, Side::OutcomeTwo, 2.1, 100.0).placed_at(1_200),
        fill("0xsettled", Side::OutcomeTwo, 2.0, 50.0)
            .placed_at(900)
            .settled_with(2, 5_000),
    ];
    let markets = vec![
        (HEDGEABLE, labelled("Alpha", "Beta", "Tennis")),
        (CLOSED, labelled("Gamma", "Delta", "Soccer")),
        ("0xsettled", labelled("Eps", "Zeta", "Basketball")),
        (UPCOMING, market_starting_at(UPCOMING_START, "Tennis")),
    ];
    let orders = vec![
        offer(HEDGEABLE, Side::OutcomeTwo, 1.5, 500.0),
        offer(UPCOMING, Side::OutcomeOne, 4.0, 600.0),
        offer(UPCOMING, Side::OutcomeTwo, 1.35, 600.0),
    ];
    write_snapshot(dir, &fills, &markets, &orders).unwrap();
}
