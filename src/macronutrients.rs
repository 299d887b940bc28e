//! Macro-nutrient distribution
//!
//! Splits a calorie target into protein, carbohydrate and fat using the
//! requested ratios. Ratios that do not sum to 1.0 (±0.01) are rescaled by
//! their sum rather than rejected.

use serde::{Deserialize, Serialize};

use crate::constants::{CARBOHYDRATE_KCAL_PER_GRAM, FAT_KCAL_PER_GRAM, PROTEIN_KCAL_PER_GRAM};
use crate::models::round_dp;

/// Tolerance on the ratio sum before normalization kicks in
pub const RATIO_SUM_TOLERANCE: f64 = 0.01;

/// Share of calories assigned to each macro-nutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRatios {
    pub protein: f64,
    pub carbohydrate: f64,
    pub fat: f64,
}

impl Default for MacroRatios {
    fn default() -> Self {
        Self {
            protein: 0.30,
            carbohydrate: 0.40,
            fat: 0.30,
        }
    }
}

impl MacroRatios {
    pub fn new(protein: f64, carbohydrate: f64, fat: f64) -> Self {
        Self {
            protein,
            carbohydrate,
            fat,
        }
    }

    pub fn sum(&self) -> f64 {
        self.protein + self.carbohydrate + self.fat
    }

    /// Ratios rescaled so they sum to 1.0
    ///
    /// Sums within tolerance are returned unchanged. A non-positive sum
    /// cannot be rescaled and yields the default split.
    pub fn normalized(&self) -> MacroRatios {
        let total = self.sum();
        if (total - 1.0).abs() <= RATIO_SUM_TOLERANCE {
            return *self;
        }
        if total <= 0.0 || !total.is_finite() {
            tracing::warn!(total, "Macro ratios cannot be rescaled, using default split");
            return MacroRatios::default();
        }

        tracing::warn!(total, "Macro ratios do not sum to 1.0, rescaling");
        MacroRatios {
            protein: self.protein / total,
            carbohydrate: self.carbohydrate / total,
            fat: self.fat / total,
        }
    }
}

/// Calories, grams and share for one macro-nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientAllocation {
    pub calories: f64,
    pub grams: f64,
    /// Share of total calories in percent
    pub percentage: f64,
}

impl NutrientAllocation {
    fn new(target_calories: i32, ratio: f64, kcal_per_gram: f64) -> Self {
        let calories = f64::from(target_calories) * ratio;
        Self {
            calories: round_dp(calories, 1),
            grams: round_dp(calories / kcal_per_gram, 1),
            percentage: round_dp(ratio * 100.0, 1),
        }
    }
}

/// Macro plan for one calorie target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroPlan {
    pub target_calories: i32,
    pub protein: NutrientAllocation,
    pub carbohydrate: NutrientAllocation,
    pub fat: NutrientAllocation,
}

impl MacroPlan {
    /// Sum of the three calorie buckets
    pub fn allocated_calories(&self) -> f64 {
        self.protein.calories + self.carbohydrate.calories + self.fat.calories
    }
}

/// Macro distribution calculator
pub struct MacroCalculator;

impl MacroCalculator {
    /// Split `target_calories` according to `ratios`
    ///
    /// Protein and carbohydrate carry 4 kcal/g, fat 9 kcal/g. All values are
    /// rounded to one decimal.
    pub fn calculate(target_calories: i32, ratios: MacroRatios) -> MacroPlan {
        let ratios = ratios.normalized();

        MacroPlan {
            target_calories,
            protein: NutrientAllocation::new(target_calories, ratios.protein, PROTEIN_KCAL_PER_GRAM),
            carbohydrate: NutrientAllocation::new(
                target_calories,
                ratios.carbohydrate,
                CARBOHYDRATE_KCAL_PER_GRAM,
            ),
            fat: NutrientAllocation::new(target_calories, ratios.fat, FAT_KCAL_PER_GRAM),
        }
    }

    /// Split using the default 30/40/30 ratios
    pub fn calculate_default(target_calories: i32) -> MacroPlan {
        Self::calculate(target_calories, MacroRatios::default())
    }
}
