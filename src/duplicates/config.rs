//! Duplicate detection options
//!
//! These are passed through to whichever detector runs the scan; the
//! aggregator only reads `confidence_threshold` itself.

use serde::{Deserialize, Serialize};

use crate::error::{HoaError, HoaResult};

/// Options for a duplicate scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionConfig {
    /// Compare cells exactly as written
    #[serde(default)]
    pub strict_mode: bool,

    /// Ignore case and runs of whitespace when comparing cells
    #[serde(default = "default_fuzzy_matching")]
    pub fuzzy_matching: bool,

    /// Groups scored below this (0.0 - 1.0) are dropped from the summary
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Ask the detector for meaning-level comparison (hosted detectors only)
    #[serde(default)]
    pub semantic_analysis: bool,
}

fn default_fuzzy_matching() -> bool {
    true
}

fn default_confidence_threshold() -> f64 {
    0.8
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            fuzzy_matching: default_fuzzy_matching(),
            confidence_threshold: default_confidence_threshold(),
            semantic_analysis: false,
        }
    }
}

impl DetectionConfig {
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    pub fn with_fuzzy_matching(mut self, fuzzy: bool) -> Self {
        self.fuzzy_matching = fuzzy;
        self
    }

    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_semantic_analysis(mut self, semantic: bool) -> Self {
        self.semantic_analysis = semantic;
        self
    }

    /// Check the threshold is a probability
    pub fn validate(&self) -> HoaResult<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(HoaError::Validation(format!(
                "Confidence threshold must be between 0 and 1, got {}",
                self.confidence_threshold
            )));
        }
        Ok(())
    }
}
