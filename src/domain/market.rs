//! Market metadata and the labels derived from it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::fill::RawTimestamp;
use super::id::{MarketId, Side};
use super::scale::{lenient_raw, RawValue};

/// Fallback label for sports and leagues missing from the metadata.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Descriptive metadata for one market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Market identifier.
    #[serde(rename = "marketHash", default)]
    pub market_id: Option<MarketId>,
    #[serde(default)]
    pub team_one_name: Option<String>,
    #[serde(default)]
    pub team_two_name: Option<String>,
    #[serde(default)]
    pub outcome_one_name: Option<String>,
    #[serde(default)]
    pub outcome_two_name: Option<String>,
    #[serde(default)]
    pub sport_label: Option<String>,
    #[serde(default)]
    pub league_label: Option<String>,
    /// Scheduled start.
    #[serde(default)]
    pub game_time: Option<RawTimestamp>,
    /// Exchange market-type code.
    #[serde(rename = "type", default, deserialize_with = "lenient_raw")]
    pub market_type: Option<RawValue>,
    /// Handicap or total line, when the market type has one.
    #[serde(default, deserialize_with = "lenient_raw")]
    pub line: Option<RawValue>,
    /// Live score for team one, present once the game is in play.
    #[serde(default, deserialize_with = "lenient_raw")]
    pub team_one_score: Option<RawValue>,
    /// Live score for team two.
    #[serde(default, deserialize_with = "lenient_raw")]
    pub team_two_score: Option<RawValue>,
}

impl Market {
    /// "TeamOne vs TeamTwo", with `?` for missing names.
    #[must_use]
    pub fn event_name(&self) -> String {
        format!(
            "{} vs {}",
            self.team_one_name.as_deref().unwrap_or("?"),
            self.team_two_name.as_deref().unwrap_or("?")
        )
    }

    /// Display name of the outcome a side backs.
    #[must_use]
    pub fn side_name(&self, side: Side) -> &str {
        match side {
            Side::OutcomeOne => self.outcome_one_name.as_deref().unwrap_or("O1"),
            Side::OutcomeTwo => self.outcome_two_name.as_deref().unwrap_or("O2"),
        }
    }

    /// Team name for a side, used by the pre-match scan.
    #[must_use]
    pub fn team_name(&self, side: Side) -> &str {
        match side {
            Side::OutcomeOne => self.team_one_name.as_deref().unwrap_or("Team1"),
            Side::OutcomeTwo => self.team_two_name.as_deref().unwrap_or("Team2"),
        }
    }

    #[must_use]
    pub fn sport(&self) -> &str {
        self.sport_label.as_deref().unwrap_or(UNKNOWN_LABEL)
    }

    #[must_use]
    pub fn league(&self) -> &str {
        self.league_label.as_deref().unwrap_or(UNKNOWN_LABEL)
    }

    /// Scheduled start in epoch seconds, if known.
    #[must_use]
    pub fn game_time_secs(&self) -> Option<i64> {
        self.game_time.as_ref().and_then(RawTimestamp::epoch_secs)
    }

    /// Market type label with the line appended.
    #[must_use]
    pub fn type_label(&self) -> String {
        market_type_label(
            self.market_type.as_ref().and_then(RawValue::to_integer),
            self.line.as_ref().and_then(RawValue::to_amount),
        )
    }

    /// Live score as "a-b", when both halves are present.
    #[must_use]
    pub fn live_score(&self) -> Option<String> {
        let one = self.team_one_score.as_ref()?.to_amount()?;
        let two = self.team_two_score.as_ref()?.to_amount()?;
        Some(format!("{one}-{two}"))
    }
}

/// Presentation labels for one side of a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketLabels {
    pub event: String,
    pub sport: String,
    pub league: String,
    pub market_type: String,
    pub side: String,
}

impl MarketLabels {
    /// Labels for `side` of `market`.
    #[must_use]
    pub fn new(market: &Market, side: Side) -> Self {
        Self {
            event: market.event_name(),
            sport: market.sport().to_string(),
            league: market.league().to_string(),
            market_type: market.type_label(),
            side: market.side_name(side).to_string(),
        }
    }
}

/// Human name for an exchange market-type code.
#[must_use]
pub fn market_type_name(code: i64) -> Option<&'static str> {
    let name = match code {
        1 => "1X2",
        2 => "Over/Under",
        3 => "Asian HC",
        28 => "O/U+OT",
        29 => "O/U Rounds",
        52 => "Money Line",
        63 => "12 HT",
        77 => "O/U HT",
        88 => "To Qualify",
        165 => "Set Total",
        166 => "O/U Games",
        201 => "Asian HC Games",
        226 => "ML+OT",
        274 => "Outright",
        342 => "Asian HC+OT",
        835 => "Asian O/U",
        866 => "Set Spread",
        1536 => "O/U Maps",
        _ => return None,
    };
    Some(name)
}

/// Label for a market type and optional line, e.g. `"Asian HC (-1.5)"`.
#[must_use]
pub fn market_type_label(code: Option<i64>, line: Option<f64>) -> String {
    let name = match code {
        Some(code) => market_type_name(code).map_or_else(|| format!("Type {code}"), str::to_string),
        None => "Type ?".to_string(),
    };
    match line {
        Some(line) => format!("{name} ({line})"),
        None => name,
    }
}

/// Market metadata keyed by market id.
#[derive(Debug, Clone, Default)]
pub struct Markets {
    by_id: HashMap<MarketId, Market>,
}

impl Markets {
    /// Build from `(id, market)` pairs; the id wins over any embedded hash.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (MarketId, Market)>) -> Self {
        let by_id = pairs
            .into_iter()
            .map(|(id, mut market)| {
                market.market_id = Some(id.clone());
                (id, market)
            })
            .collect();
        Self { by_id }
    }

    #[must_use]
    pub fn get(&self, market_id: &MarketId) -> Option<&Market> {
        self.by_id.get(market_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MarketId, &Market)> {
        self.by_id.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_type_labels() {
        assert_eq!(market_type_label(Some(52), None), "Money Line");
        assert_eq!(market_type_label(Some(3), Some(-1.5)), "Asian HC (-1.5)");
        assert_eq!(market_type_label(Some(9999), None), "Type 9999");
        assert_eq!(market_type_label(None, Some(2.5)), "Type ? (2.5)");
    }

    #[test]
    fn names_fall_back_when_missing() {
        let market = Market::default();
        assert_eq!(market.event_name(), "? vs ?");
        assert_eq!(market.side_name(Side::OutcomeOne), "O1");
        assert_eq!(market.side_name(Side::OutcomeTwo), "O2");
        assert_eq!(market.sport(), UNKNOWN_LABEL);
        assert_eq!(market.live_score(), None);
    }

    #[test]
    fn deserializes_exchange_fields() {
        let json = r#"{
            "marketHash": "0x1",
            "teamOneName": "Nadal",
            "teamTwoName": "Federer",
            "outcomeOneName": "Nadal",
            "outcomeTwoName": "Federer",
            "sportLabel": "Tennis",
            "leagueLabel": "ATP",
            "gameTime": 1700000000,
            "type": 226,
            "line": null
        }"#;
        let market: Market = serde_json::from_str(json).unwrap();
        assert_eq!(market.event_name(), "Nadal vs Federer");
        assert_eq!(market.side_name(Side::OutcomeTwo), "Federer");
        assert_eq!(market.type_label(), "ML+OT");
        assert_eq!(market.game_time_secs(), Some(1_700_000_000));
    }

    #[test]
    fn textual_type_and_line_still_label() {
        let json = r#"{"marketHash": "a", "type": "3", "line": "-1.5", "teamOneScore": true}"#;
        let market: Market = serde_json::from_str(json).unwrap();
        assert_eq!(market.type_label(), "Asian HC (-1.5)");
        assert_eq!(market.team_one_score, None);
    }

    #[test]
    fn from_pairs_sets_market_id() {
        let markets = Markets::from_pairs(vec![(MarketId::new("k"), Market::default())]);
        let market = markets.get(&MarketId::new("k")).unwrap();
        assert_eq!(market.market_id, Some(MarketId::new("k")));
        assert_eq!(markets.len(), 1);
    }
}
