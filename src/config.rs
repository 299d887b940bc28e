use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::energy::{EnergyBalanceCalculator, DEFAULT_TEF_FACTOR};
use crate::error::{ConfigError, WeightRsError};
use crate::logging::LogConfig;
use crate::macronutrients::MacroRatios;
use crate::metabolic::MetabolicProfiler;
use crate::plateau::{PlateauConfig, PlateauDetector};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Tunable analysis parameters
    pub analysis: AnalysisConfig,

    /// Logging settings
    pub logging: LogConfig,
}

/// Analysis parameters with sensible defaults
///
/// Reference tables (activity factors, BMI cut-offs, body-fat bands) are
/// fixed and live in [`crate::constants`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Thermic effect of food as a fraction of intake
    pub tef_factor: f64,

    /// Default macro split
    pub macro_ratios: MacroRatios,

    /// Plateau detection window and threshold
    pub plateau: PlateauConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            tef_factor: DEFAULT_TEF_FACTOR,
            macro_ratios: MacroRatios::default(),
            plateau: PlateauConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(self.tef_factor > 0.0 && self.tef_factor < 1.0) {
            return Err(invalid("tef_factor", format!("must be between 0 and 1, got {}", self.tef_factor)));
        }

        if self.plateau.window_weeks == 0 {
            return Err(invalid("plateau.window_weeks", "must be at least 1".to_string()));
        }

        if !(self.plateau.threshold_kg >= 0.0 && self.plateau.threshold_kg.is_finite()) {
            return Err(invalid(
                "plateau.threshold_kg",
                format!("must be a non-negative number, got {}", self.plateau.threshold_kg),
            ));
        }

        let ratios = [
            ("macro_ratios.protein", self.macro_ratios.protein),
            ("macro_ratios.carbohydrate", self.macro_ratios.carbohydrate),
            ("macro_ratios.fat", self.macro_ratios.fat),
        ];
        for (field, value) in ratios {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(invalid(field, format!("must be a non-negative number, got {}", value)));
            }
        }

        Ok(())
    }

    pub fn energy_calculator(&self) -> EnergyBalanceCalculator {
        EnergyBalanceCalculator::with_tef_factor(self.tef_factor)
    }

    pub fn plateau_detector(&self) -> PlateauDetector {
        PlateauDetector::with_config(self.plateau.clone())
    }

    pub fn metabolic_profiler(&self) -> MetabolicProfiler {
        MetabolicProfiler::with_macro_ratios(self.macro_ratios)
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason,
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load and validate configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;

        config
            .analysis
            .validate()
            .map_err(WeightRsError::from)
            .with_context(|| format!("Invalid configuration in {}", path.as_ref().display()))?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".weightrs")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();
        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %format!("{:#}", e),
                    "Ignoring unusable config file, using defaults"
                );
                Self::default()
            }
        }
    }
}
