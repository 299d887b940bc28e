use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants::{ACTIVITY_FACTORS, DEFAULT_ACTIVITY_FACTOR};

/// Biological sex used to select formula coefficients and thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Result of normalizing free-form input onto a closed enum
///
/// `recognized` is false when the input matched nothing and `value` is the
/// documented fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalized<T> {
    pub value: T,
    pub recognized: bool,
}

impl<T> Normalized<T> {
    fn recognized(value: T) -> Self {
        Self {
            value,
            recognized: true,
        }
    }

    fn defaulted(value: T) -> Self {
        Self {
            value,
            recognized: false,
        }
    }
}

impl Gender {
    /// Gender assumed for input that names neither sex
    pub const FALLBACK: Gender = Gender::Female;

    /// Single normalization point for gender input (case-insensitive).
    ///
    /// Unrecognized input falls back to [`Gender::FALLBACK`] with
    /// `recognized == false`.
    pub fn normalize(input: &str) -> Normalized<Gender> {
        match input.parse::<Gender>() {
            Ok(gender) => Normalized::recognized(gender),
            Err(_) => {
                tracing::warn!(input, fallback = ?Self::FALLBACK, "Unrecognized gender, using fallback");
                Normalized::defaulted(Self::FALLBACK)
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(format!("Invalid gender: {}", s)),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Habitual activity level, used to scale BMR into TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Desk job, little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Physical job or daily hard training
    ExtraActive,
}

impl ActivityLevel {
    /// Level assumed for unrecognized input
    pub const FALLBACK: ActivityLevel = ActivityLevel::Moderate;

    /// Normalize free-form activity input, resolving aliases.
    ///
    /// `extra-active` maps to `ExtraActive`; `very_active` and `very-active`
    /// map to `Active`. Anything else unknown falls back to `Moderate` with
    /// `recognized == false`.
    pub fn normalize(input: &str) -> Normalized<ActivityLevel> {
        match input.parse::<ActivityLevel>() {
            Ok(level) => Normalized::recognized(level),
            Err(_) => {
                tracing::warn!(input, fallback = ?Self::FALLBACK, "Unrecognized activity level, using fallback");
                Normalized::defaulted(Self::FALLBACK)
            }
        }
    }

    /// Multiplier applied to BMR for this level
    pub fn factor(&self) -> f64 {
        ACTIVITY_FACTORS
            .iter()
            .find(|(level, _)| level == self)
            .map(|(_, factor)| *factor)
            .unwrap_or(DEFAULT_ACTIVITY_FACTOR)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days per week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days per week",
            ActivityLevel::Active => "Hard exercise 6-7 days per week",
            ActivityLevel::ExtraActive => "Physical job or daily hard training",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" | "very_active" | "very-active" => Ok(ActivityLevel::Active),
            "extra_active" | "extra-active" => Ok(ActivityLevel::ExtraActive),
            _ => Err(format!("Invalid activity level: {}", s)),
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Anthropometric profile of the person being analyzed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub gender: Gender,

    /// Age in whole years
    pub age: u16,

    /// Height in centimeters (valid 100-250)
    pub height_cm: u16,

    /// Body weight in kilograms (valid 30-300)
    pub weight_kg: f64,

    /// Body fat percentage (valid 3-50), enables Katch-McArdle
    #[serde(default)]
    pub body_fat_percentage: Option<f64>,
}

impl Profile {
    pub fn new(gender: Gender, age: u16, height_cm: u16, weight_kg: f64) -> Self {
        Self {
            gender,
            age,
            height_cm,
            weight_kg,
            body_fat_percentage: None,
        }
    }

    pub fn with_body_fat(mut self, body_fat_percentage: f64) -> Self {
        self.body_fat_percentage = Some(body_fat_percentage);
        self
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height_cm) / 100.0
    }
}

/// Optional girth measurements
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaistHipMeasurement {
    /// Waist circumference in cm (valid 50-180)
    pub waist_cm: Option<f64>,
    /// Hip circumference in cm
    pub hip_cm: Option<f64>,
}

impl WaistHipMeasurement {
    pub fn waist(waist_cm: f64) -> Self {
        Self {
            waist_cm: Some(waist_cm),
            hip_cm: None,
        }
    }

    pub fn waist_and_hip(waist_cm: f64, hip_cm: f64) -> Self {
        Self {
            waist_cm: Some(waist_cm),
            hip_cm: Some(hip_cm),
        }
    }
}

/// A dated body-weight reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightObservation {
    pub date: NaiveDate,
    pub weight_kg: f64,
}

impl WeightObservation {
    pub fn new(date: NaiveDate, weight_kg: f64) -> Self {
        Self { date, weight_kg }
    }
}

/// Round to `dp` decimal places, halves to even.
///
/// Rounds the exact binary value of the float, so 0.125 becomes 0.12 and
/// 2.675 (stored as 2.67499...) becomes 2.67. Non-finite values are
/// returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_normalization() {
        assert_eq!(Gender::normalize("Male"), Normalized::recognized(Gender::Male));
        assert_eq!(Gender::normalize("FEMALE").value, Gender::Female);
        assert!(Gender::normalize("f").recognized);

        let unknown = Gender::normalize("unknown");
        assert_eq!(unknown.value, Gender::FALLBACK);
        assert!(!unknown.recognized);
    }

    #[test]
    fn test_activity_aliases() {
        assert_eq!(ActivityLevel::normalize("extra-active").value, ActivityLevel::ExtraActive);
        assert_eq!(ActivityLevel::normalize("very_active").value, ActivityLevel::Active);
        assert_eq!(ActivityLevel::normalize("Very-Active").value, ActivityLevel::Active);
        assert!(ActivityLevel::normalize("very-active").recognized);
    }

    #[test]
    fn test_activity_fallback_is_distinguishable() {
        let explicit = ActivityLevel::normalize("moderate");
        let defaulted = ActivityLevel::normalize("couch potato");

        assert_eq!(explicit.value, defaulted.value);
        assert!(explicit.recognized);
        assert!(!defaulted.recognized);
    }

    #[test]
    fn test_activity_factors() {
        assert_eq!(ActivityLevel::Sedentary.factor(), 1.2);
        assert_eq!(ActivityLevel::Moderate.factor(), 1.55);
        assert_eq!(ActivityLevel::ExtraActive.factor(), 1.9);
    }

    #[test]
    fn test_round_dp() {
        assert_eq!(round_dp(26.12456, 1), 26.1);
        assert_eq!(round_dp(0.516363, 2), 0.52);
        assert_eq!(round_dp(63.58, 1), 63.6);
        assert_eq!(round_dp(-1.25, 1), -1.2);
        assert_eq!(round_dp(0.125, 2), 0.12);
        assert_eq!(round_dp(0.375, 2), 0.38);
        assert_eq!(round_dp(2.675, 2), 2.67);
        assert!(round_dp(f64::NAN, 1).is_nan());
    }

    #[test]
    fn test_profile_serialization() {
        let profile = Profile::new(Gender::Male, 35, 170, 75.5).with_body_fat(28.5);
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"gender\":\"male\""));

        let parsed: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
        assert_eq!(
            serde_json::to_string(&ActivityLevel::ExtraActive).unwrap(),
            "\"extra_active\""
        );
    }
}
