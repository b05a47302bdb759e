//! Pre-match opportunity scorer.
//!
//! Ranks entries on markets that have not started yet, independent of any
//! held position. Each market side gets five sub-scores from fixed
//! breakpoint tables, a weighted total in `[0, 100]`, and a
//! [`Recommendation`] tier.

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use super::id::{MarketId, Side};
use super::market::{Market, Markets};
use super::order_book::{OrderBook, OrderBooks};

/// Sentinel for "no opposing odds can reach the target ROI".
pub const INFEASIBLE_ODDS: f64 = 999.0;

const HIGH_VOLATILITY_SPORTS: [&str; 3] = ["Tennis", "Basketball", "Baseball"];
const LOW_VOLATILITY_SPORTS: [&str; 1] = ["Soccer"];

/// Odds quality. Peaks on `[3, 5]`, rebounds partially above 10.
#[must_use]
pub fn score_odds(odds: f64) -> f64 {
    if (3.0..=5.0).contains(&odds) {
        1.0
    } else if (2.5..3.0).contains(&odds) {
        0.9
    } else if odds > 5.0 && odds <= 7.0 {
        0.85
    } else if (2.0..2.5).contains(&odds) {
        0.7
    } else if odds > 7.0 && odds <= 10.0 {
        0.75
    } else if (1.5..2.0).contains(&odds) {
        0.4
    } else if odds > 10.0 {
        0.6
    } else {
        0.2
    }
}

/// Available liquidity in currency units.
#[must_use]
pub fn score_liquidity(liquidity: f64) -> f64 {
    match liquidity {
        l if l >= 500.0 => 1.0,
        l if l >= 300.0 => 0.9,
        l if l >= 150.0 => 0.75,
        l if l >= 75.0 => 0.6,
        l if l >= 50.0 => 0.4,
        _ => 0.2,
    }
}

/// Combined overround `1/a + 1/b - 1`; non-positive odds count as zero probability.
#[must_use]
pub fn overround(odds_a: f64, odds_b: f64) -> f64 {
    let implied = |odds: f64| if odds > 0.0 { 1.0 / odds } else { 0.0 };
    implied(odds_a) + implied(odds_b) - 1.0
}

/// Tight books score high.
#[must_use]
pub fn score_spread(odds_a: f64, odds_b: f64) -> f64 {
    match overround(odds_a, odds_b) {
        o if o < 0.02 => 1.0,
        o if o < 0.05 => 0.9,
        o if o < 0.08 => 0.75,
        o if o < 0.12 => 0.6,
        _ => 0.3,
    }
}

/// Hours until kickoff. Best one to three hours out.
#[must_use]
pub fn score_timing(hours_until: f64) -> f64 {
    if (1.0..=3.0).contains(&hours_until) {
        1.0
    } else if (0.5..1.0).contains(&hours_until) {
        0.85
    } else if hours_until > 3.0 && hours_until <= 4.5 {
        0.9
    } else if hours_until > 4.5 && hours_until <= 6.0 {
        0.7
    } else {
        0.5
    }
}

/// Volatile sports swing more and reopen hedges more often.
#[must_use]
pub fn score_sport(sport: &str) -> f64 {
    if HIGH_VOLATILITY_SPORTS.contains(&sport) {
        1.0
    } else if LOW_VOLATILITY_SPORTS.contains(&sport) {
        0.5
    } else {
        0.7
    }
}

/// The five sub-scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub odds: f64,
    pub liquidity: f64,
    pub spread: f64,
    pub timing: f64,
    pub sport: f64,
}

impl ScoreBreakdown {
    /// Score every factor for one market side.
    #[must_use]
    pub fn compute(odds: f64, opp_odds: f64, liquidity: f64, hours_until: f64, sport: &str) -> Self {
        Self {
            odds: score_odds(odds),
            liquidity: score_liquidity(liquidity),
            spread: score_spread(odds, opp_odds),
            timing: score_timing(hours_until),
            sport: score_sport(sport),
        }
    }
}

/// Factor weights. They must sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    pub odds: f64,
    pub liquidity: f64,
    pub spread: f64,
    pub timing: f64,
    pub sport: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            odds: 0.35,
            liquidity: 0.25,
            spread: 0.20,
            timing: 0.15,
            sport: 0.05,
        }
    }
}

impl ScoreWeights {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.odds + self.liquidity + self.spread + self.timing + self.sport
    }

    /// Weighted total scaled to `[0, 100]`.
    #[must_use]
    pub fn total(&self, breakdown: &ScoreBreakdown) -> f64 {
        100.0
            * (self.odds * breakdown.odds
                + self.liquidity * breakdown.liquidity
                + self.spread * breakdown.spread
                + self.timing * breakdown.timing
                + self.sport * breakdown.sport)
    }
}

/// Why an entry should be avoided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvoidReason {
    /// The other side does not pay enough to ever close the hedge.
    OppositeOddsTooLow,
    /// Under 100 units on the book.
    ThinLiquidity,
    LowScore,
}

/// Recommendation tier, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "tier", content = "reason")]
pub enum Recommendation {
    Excellent,
    VeryGood,
    Good,
    Acceptable,
    Avoid(AvoidReason),
}

impl Recommendation {
    /// Tier for a total score, viability flag and liquidity.
    #[must_use]
    pub fn classify(score: f64, viable: bool, liquidity: f64) -> Self {
        if score >= 85.0 && viable {
            Recommendation::Excellent
        } else if score >= 75.0 && viable {
            Recommendation::VeryGood
        } else if score >= 65.0 {
            Recommendation::Good
        } else if score >= 50.0 {
            Recommendation::Acceptable
        } else if !viable {
            Recommendation::Avoid(AvoidReason::OppositeOddsTooLow)
        } else if liquidity < 100.0 {
            Recommendation::Avoid(AvoidReason::ThinLiquidity)
        } else {
            Recommendation::Avoid(AvoidReason::LowScore)
        }
    }

    /// True for the two tiers that require viability.
    #[must_use]
    pub const fn is_strong(self) -> bool {
        matches!(self, Recommendation::Excellent | Recommendation::VeryGood)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Excellent => write!(f, "EXCELLENT"),
            Recommendation::VeryGood => write!(f, "VERY GOOD"),
            Recommendation::Good => write!(f, "GOOD"),
            Recommendation::Acceptable => write!(f, "ACCEPTABLE"),
            Recommendation::Avoid(AvoidReason::OppositeOddsTooLow) => {
                write!(f, "AVOID: opposite odds too low")
            }
            Recommendation::Avoid(AvoidReason::ThinLiquidity) => write!(f, "AVOID: thin liquidity"),
            Recommendation::Avoid(AvoidReason::LowScore) => write!(f, "AVOID"),
        }
    }
}

/// Minimum opposing odds that lock in `min_roi` percent after backing at `odds_a`.
///
/// Returns [`INFEASIBLE_ODDS`] when `odds_a <= 1.01` or the denominator
/// `odds_a - 1 - r` is not positive.
#[must_use]
pub fn required_odds_for_roi(odds_a: f64, min_roi: f64) -> f64 {
    if odds_a <= 1.01 {
        return INFEASIBLE_ODDS;
    }
    let r = min_roi / 100.0;
    let denominator = odds_a - 1.0 - r;
    if denominator <= 0.0 {
        return INFEASIBLE_ODDS;
    }
    odds_a * (1.0 + r) / denominator
}

/// Filters and targets for the pre-match scan.
#[derive(Debug, Clone, PartialEq)]
pub struct PrematchConfig {
    /// Target ROI in percent used for the viability check.
    pub min_roi: f64,
    pub min_hours: f64,
    pub max_hours: f64,
    /// Minimum taker odds on the scored side.
    pub min_odds: f64,
    /// Minimum liquidity on the scored side.
    pub min_liquidity: f64,
    /// Minimum taker odds on the opposite side.
    pub min_opposing_odds: f64,
    /// Viable when opposing odds reach this fraction of the requirement.
    pub viability_tolerance: f64,
    pub weights: ScoreWeights,
}

impl Default for PrematchConfig {
    fn default() -> Self {
        Self {
            min_roi: 3.0,
            min_hours: 0.5,
            max_hours: 6.0,
            min_odds: 1.5,
            min_liquidity: 50.0,
            min_opposing_odds: 1.01,
            viability_tolerance: 0.95,
            weights: ScoreWeights::default(),
        }
    }
}

/// A scored entry on one side of an upcoming market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrematchOpportunity {
    pub market_id: MarketId,
    pub side: Side,
    pub sport: String,
    pub league: String,
    pub event: String,
    /// Team on the scored side.
    pub side_name: String,
    /// Team on the other side.
    pub opp_name: String,
    pub odds: f64,
    pub opp_odds: f64,
    /// Opposing odds needed for the target ROI, or [`INFEASIBLE_ODDS`].
    pub required_odds: f64,
    pub liquidity: f64,
    pub hours_until: f64,
    /// Scheduled start, epoch seconds.
    pub game_time: i64,
    pub breakdown: ScoreBreakdown,
    /// Weighted total in `[0, 100]`.
    pub score: f64,
    pub viable: bool,
    pub recommendation: Recommendation,
}

fn score_side(
    market_id: &MarketId,
    market: &Market,
    book: &OrderBook,
    side: Side,
    hours_until: f64,
    game_time: i64,
    config: &PrematchConfig,
) -> Option<PrematchOpportunity> {
    let odds = book.best_taker_odds(side);
    if odds < config.min_odds {
        return None;
    }
    let liquidity = book.liquidity(side);
    if liquidity < config.min_liquidity {
        return None;
    }
    let opp_odds = book.best_taker_odds(side.opposite());
    if opp_odds < config.min_opposing_odds {
        return None;
    }

    let required_odds = required_odds_for_roi(odds, config.min_roi);
    let breakdown = ScoreBreakdown::compute(odds, opp_odds, liquidity, hours_until, market.sport());
    let score = config.weights.total(&breakdown);
    let viable = opp_odds >= required_odds * config.viability_tolerance;

    Some(PrematchOpportunity {
        market_id: market_id.clone(),
        side,
        sport: market.sport().to_string(),
        league: market.league().to_string(),
        event: market.event_name(),
        side_name: market.team_name(side).to_string(),
        opp_name: market.team_name(side.opposite()).to_string(),
        odds,
        opp_odds,
        required_odds,
        liquidity,
        hours_until,
        game_time,
        breakdown,
        score,
        viable,
        recommendation: Recommendation::classify(score, viable, liquidity),
    })
}

/// Score both sides of every market starting within the configured window.
///
/// `now` is epoch seconds. Results are sorted by score descending, ties
/// broken by market id and side so the order is reproducible.
#[must_use]
pub fn analyze_prematches(
    markets: &Markets,
    books: &OrderBooks,
    now: i64,
    config: &PrematchConfig,
) -> Vec<PrematchOpportunity> {
    let empty = OrderBook::default();
    let mut opportunities = Vec::new();

    for (market_id, market) in markets.iter() {
        let Some(game_time) = market.game_time_secs().filter(|t| *t > 0 && *t > now) else {
            continue;
        };
        let hours_until = (game_time - now) as f64 / 3600.0;
        if hours_until < config.min_hours || hours_until > config.max_hours {
            trace!(market_id = %market_id, hours_until, "outside pre-match window");
            continue;
        }

        let book = books.get(market_id).unwrap_or(&empty);
        for side in [Side::OutcomeOne, Side::OutcomeTwo] {
            if let Some(opp) = score_side(market_id, market, book, side, hours_until, game_time, config) {
                opportunities.push(opp);
            }
        }
    }

    opportunities.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.market_id.cmp(&b.market_id))
            .then_with(|| a.side.cmp(&b.side))
    });

    debug!(
        markets = markets.len(),
        found = opportunities.len(),
        "pre-match scan complete"
    );
    opportunities
}
