// Library interface for WeightRS modules
// This allows integration tests and benches to access the core functionality

pub mod bmr;
pub mod composition;
pub mod config;
pub mod constants;
pub mod energy;
pub mod error;
pub mod history;
pub mod logging;
pub mod macronutrients;
pub mod metabolic;
pub mod models;
pub mod plateau;
pub mod safety;
pub mod validation;

// Re-export commonly used types for convenience
pub use models::*;
pub use bmr::{BmrCalculator, BmrEstimates, BmrFormula};
pub use composition::CompositionAnalyzer;
pub use energy::EnergyBalanceCalculator;
pub use macronutrients::{MacroCalculator, MacroRatios};
pub use metabolic::MetabolicProfiler;
pub use plateau::{PlateauConfig, PlateauDetector};
pub use safety::SafetyValidator;
pub use validation::InputValidator;
pub use history::WeightHistoryReader;
pub use config::{AnalysisConfig, AppConfig};
pub use error::{WeightRsError, Result};
pub use logging::{LogConfig, LogLevel, LogFormat};
