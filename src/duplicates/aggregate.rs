//! Duplicate scan summaries
//!
//! Turns a detector's groups into the counts shown after a scan.

use serde::Serialize;

use super::config::DetectionConfig;
use super::detector::DuplicateGroup;

/// Groups at or above this confidence count as high confidence
pub const HIGH_CONFIDENCE: f64 = 0.9;

/// Groups at or above this confidence (and below high) count as medium
pub const MEDIUM_CONFIDENCE: f64 = 0.7;

/// Aggregate result of a duplicate scan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateSummary {
    pub detector: String,
    pub files_scanned: usize,
    pub records_scanned: usize,
    /// Groups kept after applying the confidence threshold
    pub group_count: usize,
    /// Records beyond the first in each kept group
    pub duplicate_record_count: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
    /// Set when semantic analysis was requested but the detector ignores it
    pub semantic_analysis_skipped: bool,
    pub config: DetectionConfig,
    pub groups: Vec<DuplicateGroup>,
}

impl DuplicateSummary {
    pub fn has_duplicates(&self) -> bool {
        self.group_count > 0
    }
}

/// Inputs describing the scan a set of groups came from
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    pub detector: &'a str,
    pub semantic_supported: bool,
    pub files_scanned: usize,
    pub records_scanned: usize,
}

/// Filter groups by the configured threshold and count them by confidence
pub fn aggregate(
    groups: Vec<DuplicateGroup>,
    config: &DetectionConfig,
    context: ScanContext<'_>,
) -> DuplicateSummary {
    let groups: Vec<DuplicateGroup> = groups
        .into_iter()
        .filter(|g| g.records.len() > 1 && g.confidence >= config.confidence_threshold)
        .collect();

    let mut high_confidence = 0;
    let mut medium_confidence = 0;
    let mut low_confidence = 0;
    for group in &groups {
        if group.confidence >= HIGH_CONFIDENCE {
            high_confidence += 1;
        } else if group.confidence >= MEDIUM_CONFIDENCE {
            medium_confidence += 1;
        } else {
            low_confidence += 1;
        }
    }

    DuplicateSummary {
        detector: context.detector.to_string(),
        files_scanned: context.files_scanned,
        records_scanned: context.records_scanned,
        group_count: groups.len(),
        duplicate_record_count: groups.iter().map(|g| g.records.len() - 1).sum(),
        high_confidence,
        medium_confidence,
        low_confidence,
        semantic_analysis_skipped: config.semantic_analysis && !context.semantic_supported,
        config: *config,
        groups,
    }
}
