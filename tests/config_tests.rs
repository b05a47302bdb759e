use std::fs;
use std::path::PathBuf;

use surebet::domain::ScoreWeights;
use surebet::error::{ConfigError, Error};
use surebet::infrastructure::config::logging::LogFormat;
use surebet::infrastructure::config::settings::Config;

fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("surebet.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn full_file_loads_every_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[logging]
level = "debug"
format = "json"

[arbitrage]
min_roi = 1.5
min_live_odds = 1.05

[prematch]
min_roi = 4.0
min_hours = 1.0
max_hours = 5.0
min_liquidity = 100.0

[prematch.weights]
odds = 0.4
liquidity = 0.2
spread = 0.2
timing = 0.15
sport = 0.05

[hedge]
min_stake = 10.0
balance_reserve = 5.0

[monitor]
snapshot_dir = "/var/lib/surebet"
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);

    let arbitrage = config.arbitrage_config();
    assert_eq!(arbitrage.min_roi, 1.5);
    assert_eq!(arbitrage.min_live_odds, 1.05);

    let prematch = config.prematch_config();
    assert_eq!(prematch.min_roi, 4.0);
    assert_eq!(prematch.max_hours, 5.0);
    assert_eq!(prematch.min_odds, 1.5);
    assert_eq!(prematch.weights.odds, 0.4);
    assert!((prematch.weights.sum() - 1.0).abs() < 1e-9);

    let hedge = config.hedge_config();
    assert_eq!(hedge.min_stake, 10.0);
    assert_eq!(hedge.balance_reserve, 5.0);
}

#[test]
fn missing_sections_take_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[hedge]\nmin_stake = 6.0\n");
    let config = Config::load(&path).unwrap();

    assert_eq!(config.hedge.min_stake, 6.0);
    assert_eq!(config.hedge.balance_reserve, 2.0);
    assert_eq!(config.prematch_config().weights, ScoreWeights::default());
    assert_eq!(config.arbitrage.min_live_odds, 1.01);
}

#[test]
fn invalid_values_are_rejected_with_field_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[arbitrage]\nmin_roi = -1.0\n");
    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
            assert_eq!(field, "arbitrage.min_roi");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[arbitrage\nmin_roi = 1\n");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Config::load(dir.path().join("absent.toml")),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn load_or_default_tolerates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.prematch.max_hours, 6.0);
}
