use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};
use weightrs::config::AppConfig;
use weightrs::error::{ConfigError, ErrorSeverity, HistoryError, WeightRsError};
use weightrs::history::WeightHistoryReader;
use weightrs::models::{Gender, Profile, WaistHipMeasurement};
use weightrs::plateau::PlateauStatus;
use weightrs::validation::InputValidator;

/// Tests for the file and input boundaries around the calculation core

fn write_history(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,weight_kg,note").unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file
}

#[test]
fn test_history_file_to_plateau_verdict() {
    let file = write_history(&[
        "2025-03-01,82.4,",
        "2025-03-08,81.6,after holiday",
        "2025-03-15,81.5,",
        "2025-03-22,81.45,",
    ]);

    let history = WeightHistoryReader::from_path(file.path()).unwrap();
    assert_eq!(history.len(), 4);

    let detector = AppConfig::default().analysis.plateau_detector();
    let result = detector.detect(&history);

    assert_eq!(result.window_weeks, 2);
    assert_eq!(result.observations_used, 3);
    // 81.6 → 81.45 over the last two weeks
    assert_eq!(result.weight_change, Some(0.15));
    assert_eq!(result.status, PlateauStatus::PossiblePlateau);
    assert!(result.in_plateau);
}

#[test]
fn test_config_controls_plateau_window() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[analysis.plateau]\nwindow_weeks = 3\nthreshold_kg = 0.5\n",
    )
    .unwrap();

    let config = AppConfig::load_from_file(&config_path).unwrap();
    let file = write_history(&[
        "2025-03-01,82.4,",
        "2025-03-08,81.6,",
        "2025-03-15,81.5,",
        "2025-03-22,81.45,",
    ]);
    let history = WeightHistoryReader::from_path(file.path()).unwrap();

    let result = config.analysis.plateau_detector().detect(&history);

    // 82.4 → 81.45 over three weeks
    assert_eq!(result.window_weeks, 3);
    assert_eq!(result.weight_change, Some(0.95));
    assert_eq!(result.status, PlateauStatus::NotInPlateau);
    assert!(!result.in_plateau);
}

#[test]
fn test_invalid_config_maps_to_user_message() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[analysis.plateau]\nwindow_weeks = 0\n").unwrap();

    let err = AppConfig::load_from_file(&config_path).unwrap_err();
    let err = err.downcast_ref::<WeightRsError>().unwrap();

    assert!(matches!(
        err,
        WeightRsError::Config(ConfigError::InvalidValue { field, .. }) if field == "plateau.window_weeks"
    ));
    assert_eq!(err.severity(), ErrorSeverity::Error);
    assert!(err.user_message().starts_with("Config setting plateau.window_weeks must be at least 1."));
}

#[test]
fn test_history_errors_map_to_user_messages() {
    let file = write_history(&["2025-03-01,82.4,", "2025-03-08,heavy,"]);

    let err = WeightRsError::from(WeightHistoryReader::from_path(file.path()).unwrap_err());
    assert!(matches!(err, WeightRsError::History(HistoryError::InvalidRow { line: 3, .. })));
    assert_eq!(err.severity(), ErrorSeverity::Error);
    assert!(err.user_message().contains("line 3"));

    let dir = tempdir().unwrap();
    let missing = WeightHistoryReader::from_path(dir.path().join("none.csv")).unwrap_err();
    assert_eq!(WeightRsError::from(missing).severity(), ErrorSeverity::Warning);
}

#[test]
fn test_validation_before_calculation() {
    let profile = Profile::new(Gender::Female, 29, 163, 58.0).with_body_fat(24.0);
    assert!(InputValidator::validate_profile(&profile).is_ok());

    let too_tall = Profile::new(Gender::Male, 29, 251, 90.0);
    let err = WeightRsError::from(InputValidator::validate_profile(&too_tall).unwrap_err());
    assert_eq!(err.user_message(), "Please enter a height_cm between 100 and 250.");

    let waist = WaistHipMeasurement::waist_and_hip(181.0, 120.0);
    assert!(InputValidator::validate_waist_hip(&waist).is_err());
}

#[test]
fn test_default_config_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".weightrs").join("config.toml");

    AppConfig::default().save_to_file(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("tef_factor"));
    assert!(text.contains("[analysis.plateau]"));

    assert_eq!(AppConfig::load_from_file(&path).unwrap(), AppConfig::default());
    assert!(AppConfig::default_config_path().ends_with(".weightrs/config.toml"));
}
