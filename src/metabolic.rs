//! Metabolic profile report
//!
//! Chains the BMR, energy balance and macro calculators into one report:
//! recommended BMR → TDEE → deficit tiers and weekly projections → macro plan
//! at the moderate tier, plus an age-banded note.

use serde::{Deserialize, Serialize};

use crate::bmr::{BmrCalculator, BmrEstimates};
use crate::composition::CompositionAnalyzer;
use crate::energy::{CalorieTargets, EnergyBalanceCalculator, TdeeEstimate, WeeklyLossProjection};
use crate::macronutrients::{MacroCalculator, MacroPlan, MacroRatios};
use crate::models::{ActivityLevel, Normalized, Profile};

/// Age bands with distinct metabolic guidance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    /// Under 30
    Young,
    /// 30 to 49
    Middle,
    /// 50 and over
    Senior,
}

impl AgeBand {
    pub fn from_age(age: u16) -> Self {
        if age < 30 {
            AgeBand::Young
        } else if age < 50 {
            AgeBand::Middle
        } else {
            AgeBand::Senior
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            AgeBand::Young => {
                "Metabolism is most active when young; the best time to build good metabolic habits"
            }
            AgeBand::Middle => {
                "After 30, metabolism drops about 2-5% per decade; exercise helps maintain it"
            }
            AgeBand::Senior => {
                "After 50, metabolic decline is marked; strength training helps preserve muscle mass"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicAssessment {
    pub bmi: f64,
    pub age_band: AgeBand,
    pub age_note: String,
    pub activity_impact: String,
}

/// Composite metabolic report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicProfile {
    pub bmr: BmrEstimates,
    pub tdee: TdeeEstimate,
    pub calorie_targets: CalorieTargets,
    pub projected_weekly_loss_kg: WeeklyLossProjection,
    /// Macro split at the moderate-deficit target
    pub macro_plan: MacroPlan,
    pub assessment: MetabolicAssessment,
    pub recommendations: Vec<String>,
}

/// Metabolic profile orchestrator
#[derive(Debug, Clone, Default)]
pub struct MetabolicProfiler {
    macro_ratios: MacroRatios,
}

impl MetabolicProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_macro_ratios(macro_ratios: MacroRatios) -> Self {
        MetabolicProfiler { macro_ratios }
    }

    /// Build the report for a profile and free-form activity input
    pub fn analyze_input(&self, profile: &Profile, activity_level: &str) -> MetabolicProfile {
        self.analyze(profile, ActivityLevel::normalize(activity_level))
    }

    /// Build the report for a profile and a normalized activity level
    pub fn analyze(&self, profile: &Profile, activity: Normalized<ActivityLevel>) -> MetabolicProfile {
        let span = tracing::debug_span!("metabolic_profile", age = profile.age, gender = %profile.gender);
        let _guard = span.enter();

        let bmr = BmrCalculator::calculate_all(profile);
        let tdee = EnergyBalanceCalculator::calculate_tdee(bmr.recommended, activity);
        let tiers = EnergyBalanceCalculator::deficit_tiers(tdee.value);
        let macro_plan = MacroCalculator::calculate(tiers.targets.moderate, self.macro_ratios);

        let age_band = AgeBand::from_age(profile.age);
        let assessment = MetabolicAssessment {
            bmi: CompositionAnalyzer::calculate_bmi(profile.weight_kg, profile.height_cm),
            age_band,
            age_note: age_band.note().to_string(),
            activity_impact: format!(
                "At the current activity level ({}), daily expenditure is about {} kcal",
                tdee.activity_level, tdee.value
            ),
        };

        let targets = &tiers.targets;
        let weekly = &tiers.weekly_loss_kg;
        let recommendations = vec![
            format!("Maintain weight: about {} kcal per day", targets.maintenance),
            format!(
                "Mild weight loss: about {} kcal per day (expected {} kg per week)",
                targets.mild, weekly.mild
            ),
            format!(
                "Moderate weight loss: about {} kcal per day (expected {} kg per week)",
                targets.moderate, weekly.moderate
            ),
            "Avoid deficits above 35% to protect metabolism and health".to_string(),
        ];

        tracing::info!(
            bmr = bmr.recommended,
            tdee = tdee.value,
            moderate_target = targets.moderate,
            "Metabolic profile built"
        );

        MetabolicProfile {
            bmr,
            tdee,
            calorie_targets: tiers.targets,
            projected_weekly_loss_kg: tiers.weekly_loss_kg,
            macro_plan,
            assessment,
            recommendations,
        }
    }
}
