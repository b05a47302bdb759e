//! Engine thresholds: arbitrage, pre-match scoring and hedge execution.

use serde::{Deserialize, Serialize};

use crate::domain::{ArbitrageConfig, HedgeConfig, PrematchConfig, ScoreWeights};

/// `[arbitrage]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbitrageSection {
    /// Minimum ROI in percent for an opportunity to be reported.
    #[serde(default)]
    pub min_roi: f64,
    /// Opposing odds at or below this mean no usable liquidity.
    #[serde(default = "default_min_live_odds")]
    pub min_live_odds: f64,
}

const fn default_min_live_odds() -> f64 {
    1.01
}

impl Default for ArbitrageSection {
    fn default() -> Self {
        Self {
            min_roi: 0.0,
            min_live_odds: default_min_live_odds(),
        }
    }
}

impl From<&ArbitrageSection> for ArbitrageConfig {
    fn from(section: &ArbitrageSection) -> Self {
        Self {
            min_roi: section.min_roi,
            min_live_odds: section.min_live_odds,
        }
    }
}

/// `[prematch.weights]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsSection {
    #[serde(default = "default_weight_odds")]
    pub odds: f64,
    #[serde(default = "default_weight_liquidity")]
    pub liquidity: f64,
    #[serde(default = "default_weight_spread")]
    pub spread: f64,
    #[serde(default = "default_weight_timing")]
    pub timing: f64,
    #[serde(default = "default_weight_sport")]
    pub sport: f64,
}

const fn default_weight_odds() -> f64 {
    0.35
}

const fn default_weight_liquidity() -> f64 {
    0.25
}

const fn default_weight_spread() -> f64 {
    0.20
}

const fn default_weight_timing() -> f64 {
    0.15
}

const fn default_weight_sport() -> f64 {
    0.05
}

impl Default for WeightsSection {
    fn default() -> Self {
        Self {
            odds: default_weight_odds(),
            liquidity: default_weight_liquidity(),
            spread: default_weight_spread(),
            timing: default_weight_timing(),
            sport: default_weight_sport(),
        }
    }
}

impl From<&WeightsSection> for ScoreWeights {
    fn from(section: &WeightsSection) -> Self {
        Self {
            odds: section.odds,
            liquidity: section.liquidity,
            spread: section.spread,
            timing: section.timing,
            sport: section.sport,
        }
    }
}

/// `[prematch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrematchSection {
    /// Target ROI in percent for the viability check.
    #[serde(default = "default_prematch_min_roi")]
    pub min_roi: f64,
    /// Earliest start, in hours from now.
    #[serde(default = "default_min_hours")]
    pub min_hours: f64,
    /// Latest start, in hours from now.
    #[serde(default = "default_max_hours")]
    pub max_hours: f64,
    #[serde(default = "default_min_odds")]
    pub min_odds: f64,
    /// Minimum liquidity in currency units.
    #[serde(default = "default_min_liquidity")]
    pub min_liquidity: f64,
    #[serde(default = "default_min_opposing_odds")]
    pub min_opposing_odds: f64,
    /// Fraction of the required opposing odds that still counts as viable.
    #[serde(default = "default_viability_tolerance")]
    pub viability_tolerance: f64,
    #[serde(default)]
    pub weights: WeightsSection,
}

const fn default_prematch_min_roi() -> f64 {
    3.0
}

const fn default_min_hours() -> f64 {
    0.5
}

const fn default_max_hours() -> f64 {
    6.0
}

const fn default_min_odds() -> f64 {
    1.5
}

const fn default_min_liquidity() -> f64 {
    50.0
}

const fn default_min_opposing_odds() -> f64 {
    1.01
}

const fn default_viability_tolerance() -> f64 {
    0.95
}

impl Default for PrematchSection {
    fn default() -> Self {
        Self {
            min_roi: default_prematch_min_roi(),
            min_hours: default_min_hours(),
            max_hours: default_max_hours(),
            min_odds: default_min_odds(),
            min_liquidity: default_min_liquidity(),
            min_opposing_odds: default_min_opposing_odds(),
            viability_tolerance: default_viability_tolerance(),
            weights: WeightsSection::default(),
        }
    }
}

impl From<&PrematchSection> for PrematchConfig {
    fn from(section: &PrematchSection) -> Self {
        Self {
            min_roi: section.min_roi,
            min_hours: section.min_hours,
            max_hours: section.max_hours,
            min_odds: section.min_odds,
            min_liquidity: section.min_liquidity,
            min_opposing_odds: section.min_opposing_odds,
            viability_tolerance: section.viability_tolerance,
            weights: ScoreWeights::from(&section.weights),
        }
    }
}

/// `[hedge]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedgeSection {
    /// Smallest stake the exchange accepts.
    #[serde(default = "default_min_stake")]
    pub min_stake: f64,
    /// Amount always left in the wallet.
    #[serde(default = "default_balance_reserve")]
    pub balance_reserve: f64,
}

const fn default_min_stake() -> f64 {
    5.0
}

const fn default_balance_reserve() -> f64 {
    2.0
}

impl Default for HedgeSection {
    fn default() -> Self {
        Self {
            min_stake: default_min_stake(),
            balance_reserve: default_balance_reserve(),
        }
    }
}

impl From<&HedgeSection> for HedgeConfig {
    fn from(section: &HedgeSection) -> Self {
        Self {
            min_stake: section.min_stake,
            balance_reserve: section.balance_reserve,
        }
    }
}
