//! Body composition classification
//!
//! BMI (Asian cut-offs), ideal weight at BMI 22, body-fat bands, waist-hip
//! ratio and abdominal obesity, combined into one assessment with concerns
//! and recommendations.

use serde::{Deserialize, Serialize};

use crate::constants::{
    body_fat_bands, healthy_waist_hip_ratio_below, waist_obesity_threshold_cm,
    BMI_OBESE_FROM, BMI_OVERWEIGHT_FROM, BMI_UNDERWEIGHT_BELOW, IDEAL_BMI,
    IDEAL_WEIGHT_TOLERANCE_KG,
};
use crate::models::{round_dp, Gender, Profile, WaistHipMeasurement};

/// BMI category, half-open intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    /// < 18.5
    Underweight,
    /// 18.5 to < 24.0
    Normal,
    /// 24.0 to < 28.0
    Overweight,
    /// >= 28.0
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < BMI_UNDERWEIGHT_BELOW {
            BmiCategory::Underweight
        } else if bmi < BMI_OVERWEIGHT_FROM {
            BmiCategory::Normal
        } else if bmi < BMI_OBESE_FROM {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    fn is_elevated(&self) -> bool {
        matches!(self, BmiCategory::Overweight | BmiCategory::Obese)
    }
}

/// Body-fat category, ordered from leanest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFatCategory {
    Essential,
    Athletic,
    Fitness,
    Average,
    Obese,
}

impl BodyFatCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BodyFatCategory::Essential => "essential",
            BodyFatCategory::Athletic => "athletic",
            BodyFatCategory::Fitness => "fitness",
            BodyFatCategory::Average => "average",
            BodyFatCategory::Obese => "obese",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BodyFatCategory::Essential => "Essential fat",
            BodyFatCategory::Athletic => "Athletic",
            BodyFatCategory::Fitness => "Fitness",
            BodyFatCategory::Average => "Average",
            BodyFatCategory::Obese => "Obese",
        }
    }
}

/// Distance of current weight from ideal weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightStatus {
    Normal,
    Overweight,
    Underweight,
}

impl WeightStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WeightStatus::Normal => "normal",
            WeightStatus::Overweight => "overweight",
            WeightStatus::Underweight => "underweight",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiAssessment {
    pub value: f64,
    pub category: BmiCategory,
    pub ideal_weight_kg: f64,
    /// Current minus ideal weight
    pub difference_from_ideal_kg: f64,
    pub weight_status: WeightStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyFatAssessment {
    pub percentage: f64,
    pub category: BodyFatCategory,
    pub lean_mass_kg: f64,
    pub fat_mass_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaistAssessment {
    pub waist_cm: f64,
    pub has_abdominal_obesity: bool,
    pub threshold_cm: f64,
    /// Set only when a positive hip circumference was supplied
    pub hip_cm: Option<f64>,
    pub ratio: Option<f64>,
    pub ratio_healthy: Option<bool>,
}

/// Full body composition analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionReport {
    pub bmi: BmiAssessment,
    pub body_fat: Option<BodyFatAssessment>,
    pub waist_hip: Option<WaistAssessment>,
    pub concerns: Vec<String>,
    pub overall_assessment: String,
    pub recommendations: Vec<String>,
}

/// Body composition classifier
pub struct CompositionAnalyzer;

impl CompositionAnalyzer {
    /// BMI = weight / height², one decimal
    pub fn calculate_bmi(weight_kg: f64, height_cm: u16) -> f64 {
        let height_m = f64::from(height_cm) / 100.0;
        round_dp(weight_kg / (height_m * height_m), 1)
    }

    /// Weight at the ideal BMI of 22, one decimal
    pub fn ideal_weight(height_cm: u16) -> f64 {
        let height_m = f64::from(height_cm) / 100.0;
        round_dp(IDEAL_BMI * height_m * height_m, 1)
    }

    /// Normal within 5 kg of ideal, otherwise over/under by sign
    pub fn weight_status(weight_kg: f64, ideal_weight_kg: f64) -> WeightStatus {
        let difference = weight_kg - ideal_weight_kg;
        if difference.abs() < IDEAL_WEIGHT_TOLERANCE_KG {
            WeightStatus::Normal
        } else if difference > 0.0 {
            WeightStatus::Overweight
        } else {
            WeightStatus::Underweight
        }
    }

    /// Classify a body fat percentage against the ascending band table.
    ///
    /// The first band whose inclusive bounds contain the value wins. Values
    /// matching no band (between integer bands or below the first) are obese.
    pub fn body_fat_category(gender: Gender, body_fat_pct: f64) -> BodyFatCategory {
        body_fat_bands(gender)
            .iter()
            .find(|band| band.lower <= body_fat_pct && body_fat_pct <= band.upper)
            .map(|band| band.category)
            .unwrap_or(BodyFatCategory::Obese)
    }

    /// Waist / hip, two decimals; 0.0 when hip is not positive
    pub fn waist_hip_ratio(waist_cm: f64, hip_cm: f64) -> f64 {
        if hip_cm <= 0.0 {
            return 0.0;
        }
        round_dp(waist_cm / hip_cm, 2)
    }

    pub fn has_abdominal_obesity(gender: Gender, waist_cm: f64) -> bool {
        waist_cm >= waist_obesity_threshold_cm(gender)
    }

    pub fn is_waist_hip_ratio_healthy(gender: Gender, ratio: f64) -> bool {
        ratio < healthy_waist_hip_ratio_below(gender)
    }

    pub fn assess_bmi(weight_kg: f64, height_cm: u16) -> BmiAssessment {
        let value = Self::calculate_bmi(weight_kg, height_cm);
        let ideal_weight_kg = Self::ideal_weight(height_cm);

        BmiAssessment {
            value,
            category: BmiCategory::from_bmi(value),
            ideal_weight_kg,
            difference_from_ideal_kg: round_dp(weight_kg - ideal_weight_kg, 1),
            weight_status: Self::weight_status(weight_kg, ideal_weight_kg),
        }
    }

    pub fn assess_body_fat(gender: Gender, weight_kg: f64, body_fat_pct: f64) -> BodyFatAssessment {
        let lean_mass_kg = weight_kg * (1.0 - body_fat_pct / 100.0);

        BodyFatAssessment {
            percentage: body_fat_pct,
            category: Self::body_fat_category(gender, body_fat_pct),
            lean_mass_kg: round_dp(lean_mass_kg, 1),
            fat_mass_kg: round_dp(weight_kg - lean_mass_kg, 1),
        }
    }

    pub fn assess_waist(gender: Gender, measurement: &WaistHipMeasurement) -> Option<WaistAssessment> {
        let waist_cm = measurement.waist_cm?;
        let hip_cm = measurement.hip_cm.filter(|hip| *hip > 0.0);
        let ratio = hip_cm.map(|hip| Self::waist_hip_ratio(waist_cm, hip));

        Some(WaistAssessment {
            waist_cm,
            has_abdominal_obesity: Self::has_abdominal_obesity(gender, waist_cm),
            threshold_cm: waist_obesity_threshold_cm(gender),
            hip_cm,
            ratio,
            ratio_healthy: ratio.map(|r| Self::is_waist_hip_ratio_healthy(gender, r)),
        })
    }

    /// Combine every available measurement into one report
    ///
    /// Missing body fat or waist data leaves the matching block empty.
    pub fn analyze(profile: &Profile, measurement: &WaistHipMeasurement) -> CompositionReport {
        let bmi = Self::assess_bmi(profile.weight_kg, profile.height_cm);
        let body_fat = profile
            .body_fat_percentage
            .map(|pct| Self::assess_body_fat(profile.gender, profile.weight_kg, pct));
        let waist_hip = Self::assess_waist(profile.gender, measurement);

        let mut concerns = Vec::new();
        if bmi.category.is_elevated() {
            concerns.push(format!("Elevated BMI ({})", bmi.value));
        }
        if let Some(bf) = &body_fat {
            if matches!(bf.category, BodyFatCategory::Average | BodyFatCategory::Obese) {
                concerns.push(format!("Elevated body fat ({}%)", bf.percentage));
            }
        }
        if let Some(waist) = waist_hip.as_ref().filter(|w| w.has_abdominal_obesity) {
            concerns.push(format!("Abdominal obesity (waist {} cm)", waist.waist_cm));
        }

        let overall_assessment = if concerns.is_empty() {
            "Body composition indicators look good".to_string()
        } else {
            format!("Needs attention: {}", concerns.join(", "))
        };

        let mut recommendations = Vec::new();
        match bmi.category {
            BmiCategory::Underweight => recommendations.push(
                "Increase calorie intake moderately and add strength training to build muscle"
                    .to_string(),
            ),
            BmiCategory::Overweight | BmiCategory::Obese => {
                recommendations.push("Lose weight through a balanced diet and regular exercise".to_string());
                recommendations.push(format!(
                    "Use the ideal weight of {} kg as a reference target",
                    bmi.ideal_weight_kg
                ));
            }
            BmiCategory::Normal => {}
        }

        if let Some(bf) = &body_fat {
            match bf.category {
                BodyFatCategory::Obese => recommendations.push(
                    "Body fat is high: add aerobic exercise and control calorie intake".to_string(),
                ),
                BodyFatCategory::Athletic | BodyFatCategory::Fitness => {
                    recommendations.push("Body fat is in good shape, keep it up".to_string())
                }
                _ => {}
            }
        }

        if waist_hip.as_ref().is_some_and(|w| w.has_abdominal_obesity) {
            recommendations.push(
                "Abdominal obesity is a cardiovascular risk factor: focus on reducing waist circumference"
                    .to_string(),
            );
            recommendations.push("Add core training and aerobic exercise".to_string());
        }

        tracing::debug!(
            bmi = bmi.value,
            category = bmi.category.label(),
            concerns = concerns.len(),
            "Body composition analyzed"
        );

        CompositionReport {
            bmi,
            body_fat,
            waist_hip,
            concerns,
            overall_assessment,
            recommendations,
        }
    }
}
