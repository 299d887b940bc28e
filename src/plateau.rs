//! Weight-loss plateau detection
//!
//! Compares the oldest and newest weights inside a fixed trailing window
//! (the most recent `window_weeks + 1` observations). No trend fitting is
//! done; a change at or below the threshold counts as a plateau.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::models::{round_dp, WeightObservation};

/// Change below which a plateau is considered clear rather than possible (kg)
pub const CLEAR_PLATEAU_MAX_CHANGE_KG: f64 = 0.1;

/// Plateau detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateauConfig {
    /// Window length in weeks; the window holds `window_weeks + 1` observations
    pub window_weeks: u32,

    /// Maximum absolute change (kg) still counted as stagnation
    pub threshold_kg: f64,
}

impl Default for PlateauConfig {
    fn default() -> Self {
        PlateauConfig {
            window_weeks: 2,
            threshold_kg: 0.5,
        }
    }
}

/// Plateau verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateauStatus {
    /// Fewer than two observations available
    InsufficientData,
    /// Change below 0.1 kg
    ClearPlateau,
    /// Change between 0.1 kg and the threshold
    PossiblePlateau,
    /// Change above the threshold
    NotInPlateau,
}

impl PlateauStatus {
    pub fn description(&self) -> &'static str {
        match self {
            PlateauStatus::InsufficientData => "Insufficient data",
            PlateauStatus::ClearPlateau => "Clear plateau",
            PlateauStatus::PossiblePlateau => "Possible plateau",
            PlateauStatus::NotInPlateau => "Not in plateau",
        }
    }
}

/// Result of a plateau analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateauResult {
    pub in_plateau: bool,
    pub status: PlateauStatus,
    /// Window analyzed, 0 when data was insufficient
    pub window_weeks: u32,
    /// Oldest weight in the window
    pub start_weight: Option<f64>,
    /// Newest weight in the window
    pub end_weight: Option<f64>,
    /// Absolute change between start and end (kg, 2 decimals)
    pub weight_change: Option<f64>,
    /// Mean weight over the window (kg, 1 decimal)
    pub avg_weight: Option<f64>,
    pub observations_used: usize,
    pub narrative: String,
}

impl PlateauResult {
    fn insufficient(observations_used: usize) -> Self {
        PlateauResult {
            in_plateau: false,
            status: PlateauStatus::InsufficientData,
            window_weeks: 0,
            start_weight: None,
            end_weight: None,
            weight_change: None,
            avg_weight: None,
            observations_used,
            narrative: "Insufficient data to assess a plateau (at least 2 weight records needed)"
                .to_string(),
        }
    }
}

/// Cumulative breakthrough advice: (minimum plateau weeks, suggestions)
const BREAKTHROUGH_TIERS: [(u32, &[&str]); 4] = [
    (
        0,
        &[
            "Recalculate daily calorie needs from your current weight and adjust intake",
            "Raise exercise intensity or change modality (try HIIT or strength training)",
            "Check food logging accuracy for hidden calories",
            "Increase everyday activity (walk more, take the stairs)",
        ],
    ),
    (
        2,
        &[
            "Try carb cycling (alternate high- and low-carb days)",
            "Try intermittent fasting (e.g. the 16:8 method)",
        ],
    ),
    (
        4,
        &[
            "Schedule a 1-2 week diet break at maintenance calories",
            "Adjust macro ratios (more protein, somewhat fewer carbohydrates)",
            "Review sleep quality and stress; elevated cortisol slows weight loss",
        ],
    ),
    (
        8,
        &[
            "Get a medical check-up to rule out thyroid or other health issues",
            "Consider consulting a registered dietitian or weight-loss specialist",
            "Reassess whether the target weight is realistic",
        ],
    ),
];

/// Plateau detector over a weight history
#[derive(Debug, Clone, Default)]
pub struct PlateauDetector {
    config: PlateauConfig,
}

impl PlateauDetector {
    /// Create a detector with the default 2-week / 0.5 kg settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PlateauConfig) -> Self {
        PlateauDetector { config }
    }

    pub fn config(&self) -> &PlateauConfig {
        &self.config
    }

    /// Analyze an unordered weight history
    pub fn detect(&self, history: &[WeightObservation]) -> PlateauResult {
        if history.len() < 2 {
            return PlateauResult::insufficient(history.len());
        }

        // Newest first, then keep the trailing window
        let mut recent = history.to_vec();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(self.config.window_weeks as usize + 1);

        if recent.len() < 2 {
            return PlateauResult::insufficient(recent.len());
        }

        let weeks = self.config.window_weeks;
        let end_weight = recent[0].weight_kg;
        let start_weight = recent[recent.len() - 1].weight_kg;
        let change = (start_weight - end_weight).abs();
        let in_plateau = change <= self.config.threshold_kg;
        let avg_weight = recent.iter().map(|o| o.weight_kg).collect::<Vec<_>>().mean();

        let status = if !in_plateau {
            PlateauStatus::NotInPlateau
        } else if change < CLEAR_PLATEAU_MAX_CHANGE_KG {
            PlateauStatus::ClearPlateau
        } else {
            PlateauStatus::PossiblePlateau
        };

        let narrative = match status {
            PlateauStatus::ClearPlateau => format!(
                "Weight essentially unchanged ({:.1} kg over {} weeks): clear plateau",
                change, weeks
            ),
            PlateauStatus::PossiblePlateau => format!(
                "Small weight change ({:.1} kg over {} weeks): possible plateau",
                change, weeks
            ),
            _ => format!(
                "Significant weight change ({:.1} kg over {} weeks): not in plateau",
                change, weeks
            ),
        };

        tracing::debug!(
            start_weight,
            end_weight,
            change,
            status = status.description(),
            "Plateau analysis complete"
        );

        PlateauResult {
            in_plateau,
            status,
            window_weeks: weeks,
            start_weight: Some(start_weight),
            end_weight: Some(end_weight),
            weight_change: Some(round_dp(change, 2)),
            avg_weight: Some(round_dp(avg_weight, 1)),
            observations_used: recent.len(),
            narrative,
        }
    }

    /// Numbered breakthrough suggestions for a plateau lasting `duration_weeks`
    ///
    /// Tiers are cumulative: 4 base suggestions, +2 from 2 weeks, +3 from
    /// 4 weeks, +3 from 8 weeks.
    pub fn suggest_breakthrough(duration_weeks: u32) -> Vec<String> {
        BREAKTHROUGH_TIERS
            .iter()
            .filter(|(min_weeks, _)| duration_weeks >= *min_weeks)
            .flat_map(|(_, suggestions)| suggestions.iter())
            .enumerate()
            .map(|(i, suggestion)| format!("{}. {}", i + 1, suggestion))
            .collect()
    }
}
