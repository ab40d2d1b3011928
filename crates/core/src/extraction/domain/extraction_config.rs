use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::confidence_band::ConfidenceBands;
use crate::shared::constants::{
    DEFAULT_ACCEPTANCE_THRESHOLD, DEFAULT_EVIDENCE_FLOOR, DEFAULT_MIN_CONFIDENCE,
};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("high confidence band ({high}) must not be below the medium band ({medium})")]
    InvertedBands { high: f64, medium: f64 },
}

/// Tunable thresholds for one extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// A START or END anchor must score above this to mark a boundary.
    pub acceptance_threshold: f64,
    /// Anchor matches scoring below this add nothing to confidence.
    pub evidence_floor: f64,
    /// Below this confidence the result carries no boundaries.
    pub min_confidence: f64,
    pub bands: ConfidenceBands,
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("acceptance_threshold", self.acceptance_threshold)?;
        check_unit("evidence_floor", self.evidence_floor)?;
        check_unit("min_confidence", self.min_confidence)?;
        check_unit("bands.high", self.bands.high)?;
        check_unit("bands.medium", self.bands.medium)?;
        if self.bands.high < self.bands.medium {
            return Err(ConfigError::InvertedBands {
                high: self.bands.high,
                medium: self.bands.medium,
            });
        }
        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            evidence_floor: DEFAULT_EVIDENCE_FLOOR,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            bands: ConfidenceBands::default(),
        }
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}
