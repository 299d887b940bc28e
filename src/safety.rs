//! Safety gating of calorie targets and weight-loss rates
//!
//! Calorie targets must stay at or above 1.2 × BMR (the sedentary
//! maintenance floor). Weekly loss rates are tiered: up to 0.5 kg safe,
//! up to 1.0 kg moderate, up to 1.5 kg aggressive, beyond that unsafe.

use serde::{Deserialize, Serialize};

use crate::constants::{
    AGGRESSIVE_RATE_MAX, CALORIE_CAUTION_MARGIN, MINIMUM_SAFE_BMR_MULTIPLIER, MODERATE_RATE_MAX,
    SAFE_RATE_MAX,
};
use crate::models::round_dp;

/// Calorie target tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieSafety {
    /// Below the safe floor
    Unsafe,
    /// Safe but within 200 kcal of the floor
    NearMinimum,
    Safe,
}

impl CalorieSafety {
    pub fn label(&self) -> &'static str {
        match self {
            CalorieSafety::Unsafe => "unsafe",
            CalorieSafety::NearMinimum => "near_minimum",
            CalorieSafety::Safe => "safe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieTargetVerdict {
    pub is_safe: bool,
    pub category: CalorieSafety,
    pub target: i32,
    pub minimum_safe: i32,
    pub bmr: i32,
    /// target − minimum_safe
    pub difference: i32,
    pub warning: Option<String>,
    pub recommendation: String,
}

/// Weekly loss-rate tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateCategory {
    /// <= 0.5 kg/week
    Safe,
    /// <= 1.0 kg/week
    Moderate,
    /// <= 1.5 kg/week
    Aggressive,
    /// > 1.5 kg/week
    Unsafe,
    /// Non-positive number of weeks
    Invalid,
}

impl RateCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RateCategory::Safe => "safe",
            RateCategory::Moderate => "moderate",
            RateCategory::Aggressive => "aggressive",
            RateCategory::Unsafe => "unsafe",
            RateCategory::Invalid => "invalid",
        }
    }

    fn from_rate(rate_kg_per_week: f64) -> Self {
        if rate_kg_per_week <= SAFE_RATE_MAX {
            RateCategory::Safe
        } else if rate_kg_per_week <= MODERATE_RATE_MAX {
            RateCategory::Moderate
        } else if rate_kg_per_week <= AGGRESSIVE_RATE_MAX {
            RateCategory::Aggressive
        } else {
            RateCategory::Unsafe
        }
    }

    fn recommendation(&self) -> &'static str {
        match self {
            RateCategory::Safe => "Weight-loss rate is within the safe range, keep going",
            RateCategory::Moderate => {
                "Rate is fairly fast but acceptable; make sure nutrition stays adequate"
            }
            RateCategory::Aggressive => {
                "Rate is fast; monitor how you feel closely and keep protein intake high"
            }
            RateCategory::Unsafe => {
                "Rate is too fast and carries health risks; slow down to 0.5-1 kg per week"
            }
            RateCategory::Invalid => "Enter a valid number of weeks",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLossRateVerdict {
    pub is_safe: bool,
    pub category: RateCategory,
    /// kg per week, 2 decimals (0.0 when invalid)
    pub rate_kg_per_week: f64,
    pub total_kg: f64,
    pub weeks: i32,
    pub warning: Option<String>,
    pub recommendation: String,
}

/// Safety validator
pub struct SafetyValidator;

impl SafetyValidator {
    /// Check a daily calorie target against the 1.2 × BMR floor
    pub fn validate_calorie_target(target_calories: i32, bmr: i32) -> CalorieTargetVerdict {
        let minimum_safe = (f64::from(bmr) * MINIMUM_SAFE_BMR_MULTIPLIER) as i32;
        let difference = target_calories - minimum_safe;

        let (category, warning, recommendation) = if target_calories < minimum_safe {
            (
                CalorieSafety::Unsafe,
                Some(format!(
                    "Target of {} kcal is below the minimum safe intake of {} kcal",
                    target_calories, minimum_safe
                )),
                format!(
                    "Raise daily intake to at least {} kcal to cover basal metabolism and nutrition",
                    minimum_safe
                ),
            )
        } else if difference < CALORIE_CAUTION_MARGIN {
            (
                CalorieSafety::NearMinimum,
                Some("Target is close to the minimum safe intake, proceed with caution".to_string()),
                "Monitor closely; increase calories if fatigue, hair loss or similar symptoms appear"
                    .to_string(),
            )
        } else {
            (
                CalorieSafety::Safe,
                None,
                "Calorie target is within the safe range".to_string(),
            )
        };

        if category == CalorieSafety::Unsafe {
            tracing::warn!(target_calories, minimum_safe, "Calorie target below safe floor");
        }

        CalorieTargetVerdict {
            is_safe: category != CalorieSafety::Unsafe,
            category,
            target: target_calories,
            minimum_safe,
            bmr,
            difference,
            warning,
            recommendation,
        }
    }

    /// Check the weekly rate implied by losing `total_kg` over `weeks`
    pub fn validate_weight_loss_rate(total_kg: f64, weeks: i32) -> WeightLossRateVerdict {
        if weeks <= 0 {
            return WeightLossRateVerdict {
                is_safe: false,
                category: RateCategory::Invalid,
                rate_kg_per_week: 0.0,
                total_kg,
                weeks,
                warning: Some("Number of weeks must be greater than 0".to_string()),
                recommendation: RateCategory::Invalid.recommendation().to_string(),
            };
        }

        let rate = total_kg / f64::from(weeks);
        let category = RateCategory::from_rate(rate);

        let warning = match category {
            RateCategory::Aggressive => Some(format!(
                "Weight-loss rate ({:.2} kg/week) is close to the safe limit",
                rate
            )),
            RateCategory::Unsafe => Some(format!(
                "Weight-loss rate ({:.2} kg/week) exceeds the safe limit ({} kg/week)",
                rate, AGGRESSIVE_RATE_MAX
            )),
            _ => None,
        };

        WeightLossRateVerdict {
            is_safe: category != RateCategory::Unsafe,
            category,
            rate_kg_per_week: round_dp(rate, 2),
            total_kg,
            weeks,
            warning,
            recommendation: category.recommendation().to_string(),
        }
    }
}
