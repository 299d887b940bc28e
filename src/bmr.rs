//! Basal metabolic rate estimation
//!
//! Three published equations, each returning kcal/day truncated toward zero:
//!
//! - Harris-Benedict (1984 revision by Roza & Shizgal)
//! - Mifflin-St Jeor (1990), the most accurate general-population formula
//! - Katch-McArdle, driven by lean body mass and therefore requiring body fat

use serde::{Deserialize, Serialize};

use crate::models::{Gender, Profile};

/// BMR formula identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    HarrisBenedict,
    MifflinStJeor,
    KatchMcArdle,
}

impl BmrFormula {
    pub fn name(&self) -> &'static str {
        match self {
            BmrFormula::HarrisBenedict => "Harris-Benedict",
            BmrFormula::MifflinStJeor => "Mifflin-St Jeor",
            BmrFormula::KatchMcArdle => "Katch-McArdle",
        }
    }
}

/// All BMR variants for one profile plus the recommended value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BmrEstimates {
    pub harris_benedict: i32,
    pub mifflin_st_jeor: i32,
    /// Present only when body fat percentage was supplied
    pub katch_mcardle: Option<i32>,
    pub recommended: i32,
    /// Formula behind `recommended`
    pub formula: BmrFormula,
    pub note: String,
}

/// BMR calculator
pub struct BmrCalculator;

impl BmrCalculator {
    /// Harris-Benedict (revised)
    ///
    /// - Male: 88.362 + 13.397×W + 4.799×H − 5.677×A
    /// - Female: 447.593 + 9.247×W + 3.098×H − 4.330×A
    pub fn harris_benedict(gender: Gender, weight_kg: f64, height_cm: u16, age: u16) -> i32 {
        let (h, a) = (f64::from(height_cm), f64::from(age));
        let bmr = match gender {
            Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * h - 5.677 * a,
            Gender::Female => 447.593 + 9.247 * weight_kg + 3.098 * h - 4.330 * a,
        };
        bmr as i32
    }

    /// Mifflin-St Jeor
    ///
    /// BMR = 10×W + 6.25×H − 5×A + s, with s = +5 (male) or −161 (female)
    pub fn mifflin_st_jeor(gender: Gender, weight_kg: f64, height_cm: u16, age: u16) -> i32 {
        let offset = match gender {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        };
        let bmr = 10.0 * weight_kg + 6.25 * f64::from(height_cm) - 5.0 * f64::from(age) + offset;
        bmr as i32
    }

    /// Katch-McArdle: 370 + 21.6 × lean mass (kg)
    ///
    /// Returns `None` when no body fat percentage is available.
    pub fn katch_mcardle(weight_kg: f64, body_fat_percentage: Option<f64>) -> Option<i32> {
        body_fat_percentage.map(|pct| {
            let lean_mass_kg = weight_kg * (1.0 - pct / 100.0);
            (370.0 + 21.6 * lean_mass_kg) as i32
        })
    }

    /// Compute every formula for the profile and pick the recommended one
    ///
    /// Katch-McArdle is preferred whenever body fat is known, otherwise
    /// Mifflin-St Jeor.
    pub fn calculate_all(profile: &Profile) -> BmrEstimates {
        let harris_benedict = Self::harris_benedict(
            profile.gender,
            profile.weight_kg,
            profile.height_cm,
            profile.age,
        );
        let mifflin_st_jeor = Self::mifflin_st_jeor(
            profile.gender,
            profile.weight_kg,
            profile.height_cm,
            profile.age,
        );
        let katch_mcardle = Self::katch_mcardle(profile.weight_kg, profile.body_fat_percentage);

        let (recommended, formula, note) = match katch_mcardle {
            Some(value) => (
                value,
                BmrFormula::KatchMcArdle,
                "Body fat percentage supplied: Katch-McArdle (lean-mass based) is recommended",
            ),
            None => (
                mifflin_st_jeor,
                BmrFormula::MifflinStJeor,
                "Mifflin-St Jeor is recommended as the most accurate general formula",
            ),
        };

        tracing::debug!(
            harris_benedict,
            mifflin_st_jeor,
            ?katch_mcardle,
            recommended,
            formula = formula.name(),
            "BMR estimated"
        );

        BmrEstimates {
            harris_benedict,
            mifflin_st_jeor,
            katch_mcardle,
            recommended,
            formula,
            note: note.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harris_benedict() {
        // 88.362 + 13.397×75.5 + 4.799×170 − 5.677×35 = 1716.97
        assert_eq!(BmrCalculator::harris_benedict(Gender::Male, 75.5, 170, 35), 1716);
        // 447.593 + 9.247×60 + 3.098×160 − 4.330×30 = 1368.19
        assert_eq!(BmrCalculator::harris_benedict(Gender::Female, 60.0, 160, 30), 1368);
    }

    #[test]
    fn test_mifflin_st_jeor() {
        // 755 + 1062.5 − 175 + 5 = 1647.5, truncated
        assert_eq!(BmrCalculator::mifflin_st_jeor(Gender::Male, 75.5, 170, 35), 1647);
        // 600 + 1000 − 150 − 161 = 1289
        assert_eq!(BmrCalculator::mifflin_st_jeor(Gender::Female, 60.0, 160, 30), 1289);
    }

    #[test]
    fn test_katch_mcardle() {
        // lean = 75.5 × 0.715 = 53.9825; 370 + 21.6 × 53.9825 = 1536.0
        assert_eq!(BmrCalculator::katch_mcardle(75.5, Some(28.5)), Some(1536));
        assert_eq!(BmrCalculator::katch_mcardle(75.5, None), None);
    }

    #[test]
    fn test_truncates_toward_zero() {
        // 10×50 + 6.25×101 − 5×40 − 161 = 770.25
        assert_eq!(BmrCalculator::mifflin_st_jeor(Gender::Female, 50.0, 101, 40), 770);
    }

    #[test]
    fn test_recommendation_without_body_fat() {
        let profile = Profile::new(Gender::Male, 35, 170, 75.5);
        let estimates = BmrCalculator::calculate_all(&profile);

        assert_eq!(estimates.katch_mcardle, None);
        assert_eq!(estimates.formula, BmrFormula::MifflinStJeor);
        assert_eq!(estimates.recommended, estimates.mifflin_st_jeor);
        assert!(estimates.note.contains("Mifflin-St Jeor"));
    }

    #[test]
    fn test_recommendation_with_body_fat() {
        let profile = Profile::new(Gender::Male, 35, 170, 75.5).with_body_fat(28.5);
        let estimates = BmrCalculator::calculate_all(&profile);

        assert_eq!(estimates.katch_mcardle, Some(1536));
        assert_eq!(estimates.formula, BmrFormula::KatchMcArdle);
        assert_eq!(estimates.recommended, 1536);
        assert!(estimates.note.contains("Katch-McArdle"));
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_mifflin_monotonicity(
            male in any::<bool>(),
            weight in 30.0f64..300.0,
            height in 100u16..250u16,
            age in 18u16..90u16,
        ) {
            let gender = if male { Gender::Male } else { Gender::Female };
            let base = BmrCalculator::mifflin_st_jeor(gender, weight, height, age);

            prop_assert!(BmrCalculator::mifflin_st_jeor(gender, weight + 1.0, height, age) > base);
            prop_assert!(BmrCalculator::mifflin_st_jeor(gender, weight, height + 1, age) > base);
            prop_assert!(BmrCalculator::mifflin_st_jeor(gender, weight, height, age + 1) < base);
        }
    }
}
