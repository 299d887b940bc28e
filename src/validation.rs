//! Input range checks for callers
//!
//! The calculators accept any numbers. Callers that take raw user input
//! run these checks first, against the inclusive ranges in
//! [`crate::constants`].

use crate::constants::{VALID_BODY_FAT_PCT, VALID_HEIGHT_CM, VALID_WAIST_CM, VALID_WEIGHT_KG};
use crate::error::ValidationError;
use crate::models::{Profile, WaistHipMeasurement};

/// Range validator for profiles and girth measurements
pub struct InputValidator;

impl InputValidator {
    /// Check weight, height and (if present) body fat
    pub fn validate_profile(profile: &Profile) -> Result<(), ValidationError> {
        Self::check_range("weight_kg", profile.weight_kg, VALID_WEIGHT_KG)?;
        Self::check_range("height_cm", f64::from(profile.height_cm), VALID_HEIGHT_CM)?;
        if let Some(body_fat) = profile.body_fat_percentage {
            Self::check_range("body_fat_percentage", body_fat, VALID_BODY_FAT_PCT)?;
        }
        Ok(())
    }

    /// Check waist (if present) and require a positive hip (if present)
    pub fn validate_waist_hip(measurement: &WaistHipMeasurement) -> Result<(), ValidationError> {
        if let Some(waist) = measurement.waist_cm {
            Self::check_range("waist_cm", waist, VALID_WAIST_CM)?;
        }
        if let Some(hip) = measurement.hip_cm {
            if hip <= 0.0 {
                return Err(ValidationError::NonPositive {
                    field: "hip_cm".to_string(),
                    value: hip,
                });
            }
        }
        Ok(())
    }

    fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<(), ValidationError> {
        // Rejects NaN as well
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            tracing::debug!(field, value, min, max, "Input out of range");
            Err(ValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            })
        }
    }
}
