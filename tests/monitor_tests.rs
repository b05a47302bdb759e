use std::time::{Duration, Instant};

use chrono::Utc;
use surebet::application::monitor::MonitorState;
use surebet::domain::{ArbitrageConfig, Markets, OrderBooks, Side};
use surebet::testkit::domain::{fill, offer};

#[test]
fn cache_goes_stale_after_its_window() {
    let start = Instant::now();
    let mut state = MonitorState::new(Duration::from_secs(60), ArbitrageConfig::default());
    assert!(state.needs_refresh(start));

    state.cache_mut().refresh(&[], Markets::default(), start);
    assert!(!state.needs_refresh(start + Duration::from_secs(59)));
    assert!(state.needs_refresh(start + Duration::from_secs(60)));
}

#[test]
fn each_opportunity_alerts_once_per_appearance() {
    let now = Instant::now();
    let mut state = MonitorState::new(Duration::from_secs(60), ArbitrageConfig::default());
    state.cache_mut().refresh(
        &[
            fill("a", Side::OutcomeOne, 4.0, 100.0),
            fill("b", Side::OutcomeTwo, 3.0, 50.0),
        ],
        Markets::default(),
        now,
    );

    let only_a = OrderBooks::from_entries(vec![offer("a", Side::OutcomeTwo, 1.5, 500.0)]);
    let both = OrderBooks::from_entries(vec![
        offer("a", Side::OutcomeTwo, 1.5, 500.0),
        offer("b", Side::OutcomeOne, 1.8, 500.0),
    ]);

    let first = state.pass(&only_a, Utc::now());
    assert_eq!(first.new_alerts.len(), 1);
    assert_eq!(first.new_alerts[0].key().to_string(), "a__1");

    let second = state.pass(&both, Utc::now());
    assert_eq!(second.report.opportunities.len(), 2);
    assert_eq!(second.new_alerts.len(), 1);
    assert_eq!(second.new_alerts[0].key().to_string(), "b__0");

    assert!(state.pass(&both, Utc::now()).new_alerts.is_empty());
    assert_eq!(state.stats().total_scans, 3);
    assert_eq!(state.stats().last_found, 2);
    assert!(state.stats().last_scan.is_some());
}
