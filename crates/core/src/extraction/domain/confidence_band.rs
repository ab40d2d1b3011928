use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::constants::{DEFAULT_HIGH_CONFIDENCE, DEFAULT_MEDIUM_CONFIDENCE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceBand::High => write!(f, "high"),
            ConfidenceBand::Medium => write!(f, "medium"),
            ConfidenceBand::Low => write!(f, "low"),
        }
    }
}

/// Caller-side policy for reading a confidence value. The extractor itself
/// never consults these bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBands {
    /// Lower bound (inclusive) of the high band.
    pub high: f64,
    /// Lower bound (inclusive) of the medium band.
    pub medium: f64,
}

impl ConfidenceBands {
    pub fn classify(&self, confidence: f64) -> ConfidenceBand {
        if confidence >= self.high {
            ConfidenceBand::High
        } else if confidence >= self.medium {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

impl Default for ConfidenceBands {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_CONFIDENCE,
            medium: DEFAULT_MEDIUM_CONFIDENCE,
        }
    }
}
