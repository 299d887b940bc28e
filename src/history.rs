//! Weight history CSV reader
//!
//! Reads `date,weight_kg` files (as exported by most smart scales) into
//! [`WeightObservation`]s for the plateau detector. Extra columns are
//! ignored and `weight` is accepted in place of `weight_kg`.

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::HistoryError;
use crate::models::WeightObservation;

#[derive(Debug, Deserialize)]
struct WeightRow {
    date: NaiveDate,
    #[serde(alias = "weight")]
    weight_kg: f64,
}

/// CSV reader for weight histories
pub struct WeightHistoryReader;

impl WeightHistoryReader {
    /// Read a history file from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<WeightObservation>, HistoryError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HistoryError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let reader = std::fs::File::open(path).map_err(csv::Error::from)?;
        let observations = Self::from_reader(reader)?;

        tracing::info!(
            path = %path.display(),
            records = observations.len(),
            "Loaded weight history"
        );
        Ok(observations)
    }

    /// Read a history from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<WeightObservation>, HistoryError> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let mut observations = Vec::new();

        for (index, record) in csv_reader.deserialize::<WeightRow>().enumerate() {
            // Header is line 1
            let fallback_line = index as u64 + 2;
            let row = record.map_err(|e| HistoryError::InvalidRow {
                line: e.position().map(|p| p.line()).unwrap_or(fallback_line),
                reason: e.to_string(),
            })?;

            if !row.weight_kg.is_finite() || row.weight_kg <= 0.0 {
                return Err(HistoryError::InvalidRow {
                    line: fallback_line,
                    reason: format!("weight must be a positive number, got {}", row.weight_kg),
                });
            }

            observations.push(WeightObservation::new(row.date, row.weight_kg));
        }

        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_history() {
        let data = "date,weight_kg\n2025-01-01,78.0\n2025-01-08, 77.8\n2025-01-15,77.7\n";
        let history = WeightHistoryReader::from_reader(data.as_bytes()).unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(history[1].weight_kg, 77.8);
    }

    #[test]
    fn test_weight_alias_and_extra_columns() {
        let data = "date,weight,note\n2025-02-01,70.2,after run\n";
        let history = WeightHistoryReader::from_reader(data.as_bytes()).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].weight_kg, 70.2);
    }

    #[test]
    fn test_invalid_date() {
        let data = "date,weight_kg\n2025-01-01,78.0\n01/08/2025,77.8\n";
        let err = WeightHistoryReader::from_reader(data.as_bytes()).unwrap_err();

        assert!(matches!(err, HistoryError::InvalidRow { line: 3, .. }));
    }

    #[test]
    fn test_non_positive_weight() {
        let data = "date,weight_kg\n2025-01-01,0\n";
        let err = WeightHistoryReader::from_reader(data.as_bytes()).unwrap_err();

        assert!(matches!(err, HistoryError::InvalidRow { line: 2, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = WeightHistoryReader::from_path("/nonexistent/weights.csv").unwrap_err();
        assert!(matches!(err, HistoryError::FileNotFound { .. }));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "date,weight_kg").unwrap();
        writeln!(file, "2025-01-01,78.0").unwrap();
        writeln!(file, "2025-01-08,77.9").unwrap();

        let history = WeightHistoryReader::from_path(file.path()).unwrap();
        assert_eq!(history.len(), 2);
    }
}
