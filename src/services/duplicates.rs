//! Duplicate scan service
//!
//! Loads the files to scan, hands them to a detector with the scan options,
//! and records the summary in the audit log.

use std::path::Path;

use uuid::Uuid;

use crate::audit::EntityType;
use crate::duplicates::{
    aggregate, DetectionConfig, DuplicateDetector, DuplicateSummary, ExactMatchDetector,
    ScanContext, TabularFile,
};
use crate::error::{HoaError, HoaResult};
use crate::storage::Storage;

/// Service for scanning tabular files for duplicate records
pub struct DuplicateService<'a> {
    storage: &'a Storage,
    detector: Box<dyn DuplicateDetector + 'a>,
}

impl<'a> DuplicateService<'a> {
    /// Service using the built-in exact-match detector
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_detector(storage, Box::new(ExactMatchDetector::new()))
    }

    pub fn with_detector(storage: &'a Storage, detector: Box<dyn DuplicateDetector + 'a>) -> Self {
        Self { storage, detector }
    }

    /// Load and scan files from disk
    pub fn scan_paths<P: AsRef<Path>>(
        &self,
        paths: &[P],
        config: &DetectionConfig,
    ) -> HoaResult<DuplicateSummary> {
        if paths.is_empty() {
            return Err(HoaError::Validation(
                "At least one file is required for a duplicate scan".into(),
            ));
        }

        let files = paths
            .iter()
            .map(|p| TabularFile::load(p.as_ref()))
            .collect::<HoaResult<Vec<_>>>()?;

        self.scan(&files, config)
    }

    /// Scan already-loaded files
    pub fn scan(
        &self,
        files: &[TabularFile],
        config: &DetectionConfig,
    ) -> HoaResult<DuplicateSummary> {
        config.validate()?;

        let groups = self.detector.detect(files, config)?;
        let summary = aggregate(
            groups,
            config,
            ScanContext {
                detector: self.detector.name(),
                semantic_supported: self.detector.supports_semantic_analysis(),
                files_scanned: files.len(),
                records_scanned: files.iter().map(TabularFile::record_count).sum(),
            },
        );

        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        self.storage.log_create(
            EntityType::DuplicateScan,
            format!("scan-{}", Uuid::new_v4()),
            Some(names.join(", ")),
            &summary,
        )?;

        Ok(summary)
    }
}
