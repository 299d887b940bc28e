//! Reference standards used across the weight-management calculations
//!
//! Fixed reference data: activity multipliers, BMI cut-offs
//! (Asian standard), body-fat bands, waist thresholds and the energy density
//! of adipose tissue. Nothing here is user-configurable; tunable call
//! parameters live in [`crate::config::AnalysisConfig`].

use crate::composition::BodyFatCategory;
use crate::models::{ActivityLevel, Gender};

/// Energy stored in 1 kg of adipose tissue (kcal)
pub const CALORIES_PER_KG_FAT: f64 = 7700.0;

/// Activity multipliers applied to BMR, in ascending order of activity
pub const ACTIVITY_FACTORS: [(ActivityLevel, f64); 5] = [
    (ActivityLevel::Sedentary, 1.2),
    (ActivityLevel::Light, 1.375),
    (ActivityLevel::Moderate, 1.55),
    (ActivityLevel::Active, 1.725),
    (ActivityLevel::ExtraActive, 1.9),
];

/// Factor used when a level has no entry in [`ACTIVITY_FACTORS`]
pub const DEFAULT_ACTIVITY_FACTOR: f64 = 1.55;

/// Ideal BMI of the reference population
pub const IDEAL_BMI: f64 = 22.0;

/// Lower bound of the "normal" BMI band
pub const BMI_UNDERWEIGHT_BELOW: f64 = 18.5;
/// Lower bound of the "overweight" BMI band
pub const BMI_OVERWEIGHT_FROM: f64 = 24.0;
/// Lower bound of the "obese" BMI band
pub const BMI_OBESE_FROM: f64 = 28.0;

/// Distance from ideal weight (kg) still considered normal
pub const IDEAL_WEIGHT_TOLERANCE_KG: f64 = 5.0;

/// Waist circumference (cm) at or above which abdominal obesity is flagged
pub fn waist_obesity_threshold_cm(gender: Gender) -> f64 {
    match gender {
        Gender::Male => 90.0,
        Gender::Female => 85.0,
    }
}

/// Waist-hip ratio below which the ratio is considered healthy
pub fn healthy_waist_hip_ratio_below(gender: Gender) -> f64 {
    match gender {
        Gender::Male => 0.90,
        Gender::Female => 0.85,
    }
}

/// One row of a body-fat standards table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFatBand {
    /// Inclusive lower bound (%)
    pub lower: f64,
    /// Inclusive upper bound (%), `f64::INFINITY` for the open-ended band
    pub upper: f64,
    pub category: BodyFatCategory,
}

const fn band(lower: f64, upper: f64, category: BodyFatCategory) -> BodyFatBand {
    BodyFatBand {
        lower,
        upper,
        category,
    }
}

/// Male body-fat bands, ascending
pub const MALE_BODY_FAT_BANDS: [BodyFatBand; 5] = [
    band(2.0, 5.0, BodyFatCategory::Essential),
    band(6.0, 13.0, BodyFatCategory::Athletic),
    band(14.0, 17.0, BodyFatCategory::Fitness),
    band(18.0, 24.0, BodyFatCategory::Average),
    band(25.0, f64::INFINITY, BodyFatCategory::Obese),
];

/// Female body-fat bands, ascending
pub const FEMALE_BODY_FAT_BANDS: [BodyFatBand; 5] = [
    band(10.0, 13.0, BodyFatCategory::Essential),
    band(14.0, 20.0, BodyFatCategory::Athletic),
    band(21.0, 24.0, BodyFatCategory::Fitness),
    band(25.0, 31.0, BodyFatCategory::Average),
    band(32.0, f64::INFINITY, BodyFatCategory::Obese),
];

/// Body-fat bands for a gender, always in ascending order
pub fn body_fat_bands(gender: Gender) -> &'static [BodyFatBand] {
    match gender {
        Gender::Male => &MALE_BODY_FAT_BANDS,
        Gender::Female => &FEMALE_BODY_FAT_BANDS,
    }
}

/// Energy density of protein (kcal/g)
pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
/// Energy density of carbohydrate (kcal/g)
pub const CARBOHYDRATE_KCAL_PER_GRAM: f64 = 4.0;
/// Energy density of fat (kcal/g)
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;

/// Fractions of TDEE kept for the mild, moderate and aggressive deficit tiers
pub const MILD_DEFICIT_FRACTION: f64 = 0.85;
pub const MODERATE_DEFICIT_FRACTION: f64 = 0.75;
pub const AGGRESSIVE_DEFICIT_FRACTION: f64 = 0.65;

/// Multiple of BMR below which a calorie target is unsafe
pub const MINIMUM_SAFE_BMR_MULTIPLIER: f64 = 1.2;
/// Margin (kcal) above the safe floor that still triggers a caution
pub const CALORIE_CAUTION_MARGIN: i32 = 200;

/// Weekly loss-rate tier ceilings (kg/week)
pub const SAFE_RATE_MAX: f64 = 0.5;
pub const MODERATE_RATE_MAX: f64 = 1.0;
pub const AGGRESSIVE_RATE_MAX: f64 = 1.5;

/// Inclusive valid input ranges
pub const VALID_WEIGHT_KG: (f64, f64) = (30.0, 300.0);
pub const VALID_HEIGHT_CM: (f64, f64) = (100.0, 250.0);
pub const VALID_BODY_FAT_PCT: (f64, f64) = (3.0, 50.0);
pub const VALID_WAIST_CM: (f64, f64) = (50.0, 180.0);
