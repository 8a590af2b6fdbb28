//! Configuration structures for the parsing pipeline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::statement::tables::PatternTables;

/// Main configuration for the statext pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatextConfig {
    /// Field-parser tunables.
    pub parsing: ParsingConfig,

    /// Ordered pattern tables; ordering is behaviorally significant and is
    /// preserved exactly as configured.
    pub tables: PatternTables,
}

impl StatextConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config = serde_json::from_str(&data)?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }
}

/// Tunables for candidate-line field extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Minimum remainder length after date extraction; shorter remainders are
    /// rejected as fragments.
    pub min_remainder_len: usize,

    /// A further date token found before this fraction of the remainder marks
    /// the start of the next transaction; past it the token is treated as
    /// trailing footer noise. Empirical cutoff, validate against a corpus.
    pub trailing_noise_ratio: f64,

    /// Width of the window around `trailing_noise_ratio` inside which trim
    /// decisions are logged for manual review.
    pub near_boundary_margin: f64,

    /// Maximum length of the text preview attached to a zero-transaction
    /// failure.
    pub preview_len: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            min_remainder_len: 10,
            trailing_noise_ratio: 0.70,
            near_boundary_margin: 0.10,
            preview_len: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StatextConfig::default();
        assert_eq!(config.parsing.min_remainder_len, 10);
        assert!((config.parsing.trailing_noise_ratio - 0.70).abs() < f64::EPSILON);
        assert!(!config.tables.banks.is_empty());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: StatextConfig =
            serde_json::from_str(r#"{"parsing": {"min_remainder_len": 6}}"#).unwrap();
        assert_eq!(config.parsing.min_remainder_len, 6);
        assert!((config.parsing.trailing_noise_ratio - 0.70).abs() < f64::EPSILON);
    }
}
