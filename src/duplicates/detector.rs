//! Duplicate detectors
//!
//! Scoring is pluggable: a hosted similarity service implements
//! [`DuplicateDetector`] and receives the scan options untouched. The
//! built-in [`ExactMatchDetector`] only groups records whose normalized
//! contents are identical, so every group it reports has confidence 1.0.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::config::DetectionConfig;
use super::table::TabularFile;
use crate::error::HoaResult;

/// Location of one record in the scanned files
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    pub file: String,
    /// Data row number, 1-based, not counting the header
    pub row: usize,
}

/// A set of records a detector believes describe the same thing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub records: Vec<RecordRef>,
    /// 0.0 - 1.0
    pub confidence: f64,
    pub reason: String,
}

/// Something that can find probable duplicates across tabular files
pub trait DuplicateDetector {
    /// Short name shown in scan reports
    fn name(&self) -> &str;

    /// Whether meaning-level comparison is honored
    fn supports_semantic_analysis(&self) -> bool {
        false
    }

    fn detect(
        &self,
        files: &[TabularFile],
        config: &DetectionConfig,
    ) -> HoaResult<Vec<DuplicateGroup>>;
}

/// Groups records with identical contents after normalization
///
/// Cells are matched by column name, so the same record exported with a
/// different column order still matches. Blank rows are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatchDetector;

impl ExactMatchDetector {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a header or cell according to the scan options
    fn normalize(value: &str, config: &DetectionConfig) -> String {
        if config.strict_mode {
            return value.to_string();
        }
        if config.fuzzy_matching {
            value
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase()
        } else {
            value.trim().to_string()
        }
    }

    /// A record's sorted (column, value) pairs, or None for a blank row
    fn record_key(
        file: &TabularFile,
        row: &[String],
        config: &DetectionConfig,
    ) -> Option<Vec<(String, String)>> {
        let mut cells: Vec<(String, String)> = row
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                (
                    Self::normalize(&file.column_name(column), config),
                    Self::normalize(cell, config),
                )
            })
            .filter(|(_, cell)| !cell.trim().is_empty())
            .collect();

        if cells.is_empty() {
            return None;
        }
        cells.sort();
        Some(cells)
    }
}

impl DuplicateDetector for ExactMatchDetector {
    fn name(&self) -> &str {
        "exact-match"
    }

    fn detect(
        &self,
        files: &[TabularFile],
        config: &DetectionConfig,
    ) -> HoaResult<Vec<DuplicateGroup>> {
        // Groups are kept in first-seen order
        let mut groups: Vec<Vec<RecordRef>> = Vec::new();
        let mut by_key: HashMap<Vec<(String, String)>, usize> = HashMap::new();

        for file in files {
            for (i, row) in file.rows.iter().enumerate() {
                let Some(key) = Self::record_key(file, row, config) else {
                    continue;
                };
                let slot = *by_key.entry(key).or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                });
                groups[slot].push(RecordRef {
                    file: file.name.clone(),
                    row: i + 1,
                });
            }
        }

        let reason = if config.strict_mode {
            "identical values"
        } else if config.fuzzy_matching {
            "identical values ignoring case and spacing"
        } else {
            "identical values ignoring surrounding spaces"
        };

        Ok(groups
            .into_iter()
            .filter(|records| records.len() > 1)
            .map(|records| DuplicateGroup {
                records,
                confidence: 1.0,
                reason: reason.to_string(),
            })
            .collect())
    }
}
