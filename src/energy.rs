//! Energy expenditure and energy balance
//!
//! TDEE = BMR × activity factor. The daily balance adds exercise, NEAT and
//! the thermic effect of food (a fixed fraction of intake) on top of BMR and
//! compares the total against intake. Weight-loss projections assume
//! 7700 kcal per kg of adipose tissue.

use serde::{Deserialize, Serialize};

use crate::constants::{
    AGGRESSIVE_DEFICIT_FRACTION, CALORIES_PER_KG_FAT, MILD_DEFICIT_FRACTION,
    MODERATE_DEFICIT_FRACTION,
};
use crate::models::{round_dp, ActivityLevel, Normalized};

/// Default thermic effect of food as a fraction of intake
pub const DEFAULT_TEF_FACTOR: f64 = 0.10;

/// Total daily energy expenditure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdeeEstimate {
    /// kcal/day, truncated
    pub value: i32,
    pub activity_level: ActivityLevel,
    pub activity_factor: f64,
    /// False when the activity input was unknown and defaulted
    pub level_recognized: bool,
}

/// One day's energy balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyBalanceRecord {
    pub intake_calories: i32,
    pub bmr: i32,
    pub exercise_burn: i32,
    pub neat_burn: i32,
    pub thermic_effect: f64,
    pub total_burn: f64,
    /// Positive for a deficit, negative for a surplus
    pub deficit: f64,
    pub is_deficit: bool,
    pub percentage_of_bmr: f64,
}

/// Daily calorie targets at each deficit tier (kcal/day)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieTargets {
    pub maintenance: i32,
    /// 15% below TDEE
    pub mild: i32,
    /// 25% below TDEE
    pub moderate: i32,
    /// 35% below TDEE
    pub aggressive: i32,
}

/// Expected weekly loss (kg) at each deficit tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyLossProjection {
    pub mild: f64,
    pub moderate: f64,
    pub aggressive: f64,
}

/// Deficit tiers derived from a TDEE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeficitTiers {
    pub targets: CalorieTargets,
    pub weekly_loss_kg: WeeklyLossProjection,
}

/// Energy balance engine
#[derive(Debug, Clone)]
pub struct EnergyBalanceCalculator {
    tef_factor: f64,
}

impl Default for EnergyBalanceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergyBalanceCalculator {
    /// Create a calculator with the default 10% thermic effect
    pub fn new() -> Self {
        Self {
            tef_factor: DEFAULT_TEF_FACTOR,
        }
    }

    pub fn with_tef_factor(tef_factor: f64) -> Self {
        Self { tef_factor }
    }

    pub fn tef_factor(&self) -> f64 {
        self.tef_factor
    }

    /// TDEE from BMR and an already-normalized activity level
    pub fn calculate_tdee(bmr: i32, activity: Normalized<ActivityLevel>) -> TdeeEstimate {
        let activity_factor = activity.value.factor();
        let value = (f64::from(bmr) * activity_factor) as i32;

        tracing::debug!(bmr, level = %activity.value, activity_factor, tdee = value, "TDEE calculated");

        TdeeEstimate {
            value,
            activity_level: activity.value,
            activity_factor,
            level_recognized: activity.recognized,
        }
    }

    /// TDEE from BMR and free-form activity input (aliases resolved,
    /// unknown input treated as moderate)
    pub fn calculate_tdee_from_input(bmr: i32, activity_level: &str) -> TdeeEstimate {
        Self::calculate_tdee(bmr, ActivityLevel::normalize(activity_level))
    }

    /// Daily deficit including the thermic effect of food
    ///
    /// total_burn = BMR + exercise + NEAT + intake × TEF; deficit = total_burn − intake
    pub fn calculate_deficit(
        &self,
        intake_calories: i32,
        bmr: i32,
        exercise_burn: i32,
        neat_burn: i32,
    ) -> EnergyBalanceRecord {
        let thermic_effect = f64::from(intake_calories) * self.tef_factor;
        let total_burn =
            f64::from(bmr) + f64::from(exercise_burn) + f64::from(neat_burn) + thermic_effect;
        let deficit = total_burn - f64::from(intake_calories);

        // Guard against a zero or negative BMR
        let percentage_of_bmr = if bmr > 0 {
            round_dp(deficit / f64::from(bmr) * 100.0, 1)
        } else {
            0.0
        };

        tracing::debug!(intake_calories, total_burn, deficit, "Energy balance calculated");

        EnergyBalanceRecord {
            intake_calories,
            bmr,
            exercise_burn,
            neat_burn,
            thermic_effect: round_dp(thermic_effect, 1),
            total_burn: round_dp(total_burn, 1),
            deficit: round_dp(deficit, 1),
            is_deficit: deficit > 0.0,
            percentage_of_bmr,
        }
    }

    /// Projected loss (kg, 2 decimals) from an average daily deficit held for `days`
    pub fn estimate_weight_loss(daily_deficit: f64, days: u32) -> f64 {
        round_dp(daily_deficit * f64::from(days) / CALORIES_PER_KG_FAT, 2)
    }

    /// Mild, moderate and aggressive calorie targets with weekly projections
    pub fn deficit_tiers(tdee: i32) -> DeficitTiers {
        let tier = |fraction: f64| (f64::from(tdee) * fraction) as i32;
        let targets = CalorieTargets {
            maintenance: tdee,
            mild: tier(MILD_DEFICIT_FRACTION),
            moderate: tier(MODERATE_DEFICIT_FRACTION),
            aggressive: tier(AGGRESSIVE_DEFICIT_FRACTION),
        };

        let weekly = |target: i32| Self::estimate_weight_loss(f64::from(tdee - target), 7);
        let weekly_loss_kg = WeeklyLossProjection {
            mild: weekly(targets.mild),
            moderate: weekly(targets.moderate),
            aggressive: weekly(targets.aggressive),
        };

        DeficitTiers {
            targets,
            weekly_loss_kg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_deficit() {
        let calculator = EnergyBalanceCalculator::new();
        let record = calculator.calculate_deficit(1980, 1650, 400, 300);

        assert_eq!(record.thermic_effect, 198.0);
        assert_eq!(record.total_burn, 2548.0);
        assert_eq!(record.deficit, 568.0);
        assert!(record.is_deficit);
        // 568 / 1650 = 34.42%
        assert_eq!(record.percentage_of_bmr, 34.4);
    }

    #[test]
    fn test_surplus() {
        let calculator = EnergyBalanceCalculator::new();
        let record = calculator.calculate_deficit(3000, 1600, 0, 0);

        // 1600 + 300 − 3000 = −1100
        assert_eq!(record.deficit, -1100.0);
        assert!(!record.is_deficit);
        assert!(record.percentage_of_bmr < 0.0);
    }

    #[test]
    fn test_zero_bmr_percentage() {
        let calculator = EnergyBalanceCalculator::new();
        let record = calculator.calculate_deficit(1500, 0, 200, 100);
        assert_eq!(record.percentage_of_bmr, 0.0);
    }

    #[test]
    fn test_custom_tef_factor() {
        let calculator = EnergyBalanceCalculator::with_tef_factor(0.15);
        let record = calculator.calculate_deficit(2000, 1600, 0, 0);
        assert_eq!(record.thermic_effect, 300.0);
        assert_eq!(record.total_burn, 1900.0);
    }

    #[test]
    fn test_estimate_weight_loss() {
        // 568 × 7 / 7700 = 0.516
        assert_eq!(EnergyBalanceCalculator::estimate_weight_loss(568.0, 7), 0.52);
        assert_eq!(EnergyBalanceCalculator::estimate_weight_loss(1100.0, 7), 1.0);
        assert_eq!(EnergyBalanceCalculator::estimate_weight_loss(500.0, 0), 0.0);
        // 137.5 × 7 / 7700 = 0.125 exactly, halves go to even
        assert_eq!(EnergyBalanceCalculator::estimate_weight_loss(137.5, 7), 0.12);
    }

    #[test]
    fn test_tdee() {
        let tdee = EnergyBalanceCalculator::calculate_tdee_from_input(1647, "moderate");
        // 1647 × 1.55 = 2552.85
        assert_eq!(tdee.value, 2552);
        assert_eq!(tdee.activity_factor, 1.55);
        assert!(tdee.level_recognized);

        let tdee = EnergyBalanceCalculator::calculate_tdee_from_input(1500, "Extra-Active");
        assert_eq!(tdee.activity_level, ActivityLevel::ExtraActive);
        assert_eq!(tdee.value, 2850);
    }

    #[test]
    fn test_tdee_unknown_level_defaults_to_moderate() {
        let tdee = EnergyBalanceCalculator::calculate_tdee_from_input(1500, "olympian");
        assert_eq!(tdee.activity_level, ActivityLevel::Moderate);
        assert_eq!(tdee.activity_factor, 1.55);
        assert!(!tdee.level_recognized);
    }

    #[test]
    fn test_deficit_tiers() {
        let tiers = EnergyBalanceCalculator::deficit_tiers(2552);

        assert_eq!(tiers.targets.maintenance, 2552);
        // 2552 × 0.85 = 2169.2
        assert_eq!(tiers.targets.mild, 2169);
        assert_eq!(tiers.targets.moderate, 1914);
        // 2552 × 0.65 = 1658.8
        assert_eq!(tiers.targets.aggressive, 1658);

        // (2552 − 2169) × 7 / 7700 = 0.348
        assert_eq!(tiers.weekly_loss_kg.mild, 0.35);
        // 638 × 7 / 7700 = 0.58
        assert_eq!(tiers.weekly_loss_kg.moderate, 0.58);
        // 894 × 7 / 7700 = 0.813
        assert_eq!(tiers.weekly_loss_kg.aggressive, 0.81);
    }
}
