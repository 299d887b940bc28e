use chrono::NaiveDate;
use weightrs::bmr::{BmrCalculator, BmrFormula};
use weightrs::composition::{BmiCategory, BodyFatCategory, CompositionAnalyzer, WeightStatus};
use weightrs::energy::EnergyBalanceCalculator;
use weightrs::macronutrients::{MacroCalculator, MacroRatios};
use weightrs::metabolic::MetabolicProfiler;
use weightrs::models::{ActivityLevel, Gender, Profile, WaistHipMeasurement, WeightObservation};
use weightrs::plateau::{PlateauDetector, PlateauStatus};
use weightrs::safety::{RateCategory, SafetyValidator};

/// Integration tests that exercise the complete analysis workflows

fn observation(date: &str, weight_kg: f64) -> WeightObservation {
    WeightObservation::new(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(), weight_kg)
}

fn reference_profile() -> Profile {
    Profile::new(Gender::Male, 35, 170, 75.5)
}

#[test]
fn test_profile_to_safety_workflow() {
    let profile = reference_profile();
    let report = MetabolicProfiler::new().analyze_input(&profile, "moderate");

    assert_eq!(report.bmr.formula, BmrFormula::MifflinStJeor);
    assert_eq!(report.tdee.value, 2552);

    // 1.2 × 1647 = 1976: only the mild tier clears the floor
    let mild = SafetyValidator::validate_calorie_target(report.calorie_targets.mild, report.bmr.recommended);
    assert!(mild.is_safe);
    assert_eq!(mild.minimum_safe, 1976);
    let moderate = SafetyValidator::validate_calorie_target(report.calorie_targets.moderate, report.bmr.recommended);
    assert!(!moderate.is_safe);
    assert!(moderate.recommendation.contains("1976"));

    // The moderate plan's projected weekly rate is within the moderate tier
    let rate = SafetyValidator::validate_weight_loss_rate(report.projected_weekly_loss_kg.moderate * 8.0, 8);
    assert_eq!(rate.category, RateCategory::Moderate);
    assert!(rate.is_safe);
}

#[test]
fn test_energy_balance_reference_values() {
    let calculator = EnergyBalanceCalculator::new();
    let record = calculator.calculate_deficit(1980, 1650, 400, 300);

    assert_eq!(record.thermic_effect, 198.0);
    assert_eq!(record.total_burn, 2548.0);
    assert_eq!(record.deficit, 568.0);
    assert!(record.is_deficit);
    assert_eq!(EnergyBalanceCalculator::estimate_weight_loss(record.deficit, 7), 0.52);
}

#[test]
fn test_surplus_is_not_a_deficit() {
    let record = EnergyBalanceCalculator::new().calculate_deficit(3000, 1650, 0, 0);

    assert!(!record.is_deficit);
    assert!(record.deficit < 0.0);
    assert!(EnergyBalanceCalculator::estimate_weight_loss(record.deficit, 7) < 0.0);
}

#[test]
fn test_bmi_and_ideal_weight() {
    assert_eq!(CompositionAnalyzer::calculate_bmi(75.5, 170), 26.1);
    assert_eq!(CompositionAnalyzer::ideal_weight(170), 63.6);

    assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
    assert_eq!(BmiCategory::from_bmi(24.0), BmiCategory::Overweight);
    assert_eq!(BmiCategory::from_bmi(28.0), BmiCategory::Obese);
}

#[test]
fn test_composition_with_all_measurements() {
    let profile = Profile::new(Gender::Female, 40, 165, 68.0).with_body_fat(33.0);
    let measurement = WaistHipMeasurement::waist_and_hip(85.0, 97.0);

    let report = CompositionAnalyzer::analyze(&profile, &measurement);

    assert_eq!(report.bmi.value, 25.0);
    assert_eq!(report.bmi.category, BmiCategory::Overweight);
    assert_eq!(report.bmi.weight_status, WeightStatus::Overweight);

    let body_fat = report.body_fat.as_ref().unwrap();
    assert_eq!(body_fat.category, BodyFatCategory::Obese);

    let waist = report.waist_hip.as_ref().unwrap();
    assert!(waist.has_abdominal_obesity);
    assert_eq!(waist.ratio, Some(0.88));
    assert_eq!(waist.ratio_healthy, Some(false));

    assert_eq!(report.concerns.len(), 3);
    assert!(report.overall_assessment.starts_with("Needs attention"));
    // BMI (2) + body fat (1) + waist (2)
    assert_eq!(report.recommendations.len(), 5);
}

#[test]
fn test_composition_without_optional_measurements() {
    let profile = Profile::new(Gender::Male, 30, 180, 72.0);
    let report = CompositionAnalyzer::analyze(&profile, &WaistHipMeasurement::default());

    assert!(report.body_fat.is_none());
    assert!(report.waist_hip.is_none());
    assert!(report.concerns.is_empty());
    assert_eq!(report.overall_assessment, "Body composition indicators look good");
}

#[test]
fn test_plateau_reference_history() {
    let history = vec![
        observation("2025-01-15", 77.7),
        observation("2025-01-01", 78.0),
        observation("2025-01-08", 77.8),
    ];

    let result = PlateauDetector::new().detect(&history);

    assert!(result.in_plateau);
    assert_eq!(result.status, PlateauStatus::PossiblePlateau);
    assert_eq!(result.weight_change, Some(0.3));
    assert_eq!(result.start_weight, Some(78.0));
    assert_eq!(result.end_weight, Some(77.7));
    assert_eq!(result.avg_weight, Some(77.8));
    assert!(result.narrative.contains("possible plateau"));
}

#[test]
fn test_plateau_uses_most_recent_window_only() {
    // A big drop long ago must not hide a recent stall
    let history = vec![
        observation("2025-01-01", 85.0),
        observation("2025-01-08", 82.0),
        observation("2025-01-15", 80.0),
        observation("2025-01-22", 80.05),
        observation("2025-01-29", 80.0),
    ];

    let result = PlateauDetector::new().detect(&history);

    assert_eq!(result.observations_used, 3);
    assert_eq!(result.status, PlateauStatus::ClearPlateau);
    assert!(result.narrative.contains("clear plateau"));
}

#[test]
fn test_breakthrough_suggestions_are_cumulative() {
    let counts: Vec<usize> = [0, 1, 2, 4, 8, 20]
        .iter()
        .map(|weeks| PlateauDetector::suggest_breakthrough(*weeks).len())
        .collect();

    assert_eq!(counts, vec![4, 4, 6, 9, 12, 12]);

    let suggestions = PlateauDetector::suggest_breakthrough(8);
    assert!(suggestions[0].starts_with("1. "));
    assert!(suggestions[11].starts_with("12. "));
    // Shorter lists are prefixes of longer ones
    assert_eq!(PlateauDetector::suggest_breakthrough(4), suggestions[..9].to_vec());
}

#[test]
fn test_macro_plan_round_trip() {
    let plan = MacroCalculator::calculate_default(2000);
    assert_eq!(plan.protein.calories, 600.0);
    assert_eq!(plan.protein.grams, 150.0);
    assert_eq!(plan.carbohydrate.grams, 200.0);
    assert_eq!(plan.fat.grams, 66.7);

    // Non-normalized input is rescaled before allocation
    let skewed = MacroCalculator::calculate(2000, MacroRatios::new(3.0, 4.0, 3.0));
    assert_eq!(skewed, plan);
}

#[test]
fn test_unknown_inputs_are_flagged_not_rejected() {
    let gender = Gender::normalize("other");
    assert_eq!(gender.value, Gender::FALLBACK);
    assert!(!gender.recognized);

    let activity = ActivityLevel::normalize("very-active");
    assert_eq!(activity.value, ActivityLevel::Active);
    assert!(activity.recognized);

    let tdee = EnergyBalanceCalculator::calculate_tdee_from_input(1647, "whenever");
    assert_eq!(tdee.activity_level, ActivityLevel::Moderate);
    assert_eq!(tdee.activity_factor, 1.55);
    assert!(!tdee.level_recognized);
}

#[test]
fn test_calculations_are_idempotent() {
    let profile = reference_profile().with_body_fat(22.0);
    let measurement = WaistHipMeasurement::waist(92.0);

    assert_eq!(BmrCalculator::calculate_all(&profile), BmrCalculator::calculate_all(&profile));
    assert_eq!(
        CompositionAnalyzer::analyze(&profile, &measurement),
        CompositionAnalyzer::analyze(&profile, &measurement)
    );

    let profiler = MetabolicProfiler::new();
    assert_eq!(
        profiler.analyze_input(&profile, "active"),
        profiler.analyze_input(&profile, "active")
    );
}
