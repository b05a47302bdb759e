mod support;

use support::assertions::{assert_near, TOLERANCE};
use surebet::domain::{detect_closed_surebets, Markets, Side};
use surebet::testkit::domain::{market_starting_at, pending_position};

#[test]
fn exactly_one_entry_for_a_market_staked_on_both_sides() {
    let positions = vec![
        pending_position("both", Side::OutcomeOne, 100.0, 2.2),
        pending_position("one-sided", Side::OutcomeOne, 50.0, 3.0),
        pending_position("both", Side::OutcomeTwo, 100.0, 2.1),
    ];
    let closed = detect_closed_surebets(&positions, &Markets::default());

    assert_eq!(closed.len(), 1);
    let surebet = &closed[0];
    assert_eq!(surebet.market_id.as_str(), "both");
    assert_near(surebet.combined_stake, 200.0, TOLERANCE);
    assert_near(surebet.guaranteed_profit, 10.0, 1e-9);
    assert_near(surebet.roi, 5.0, 1e-9);
    assert_eq!(surebet.leg_one.side, Side::OutcomeOne);
    assert_eq!(surebet.leg_two.side, Side::OutcomeTwo);
}

#[test]
fn losing_cover_reports_negative_guarantee() {
    let positions = vec![
        pending_position("m", Side::OutcomeOne, 100.0, 1.8),
        pending_position("m", Side::OutcomeTwo, 100.0, 1.9),
    ];
    let closed = detect_closed_surebets(&positions, &Markets::default());
    assert_near(closed[0].guaranteed_profit, -20.0, 1e-9);
    assert!(closed[0].roi < 0.0);
}

#[test]
fn sorted_by_roi_with_labels() {
    let positions = vec![
        pending_position("lo", Side::OutcomeOne, 100.0, 2.0),
        pending_position("lo", Side::OutcomeTwo, 100.0, 2.05),
        pending_position("hi", Side::OutcomeOne, 100.0, 2.5),
        pending_position("hi", Side::OutcomeTwo, 100.0, 2.5),
    ];
    let markets = Markets::from_pairs(vec![(
        surebet::domain::MarketId::new("hi"),
        market_starting_at(0, "Tennis"),
    )]);
    let closed = detect_closed_surebets(&positions, &markets);
    assert_eq!(closed[0].market_id.as_str(), "hi");
    assert_eq!(closed[0].labels.as_ref().unwrap().event, "Home vs Away");
    assert!(closed[1].labels.is_none());
}
