//! Duplicate record detection across uploaded tabular files
//!
//! The pieces:
//!
//! - `DetectionConfig`: scan options, passed through to the detector
//! - `TabularFile`: a CSV file loaded into memory
//! - `DuplicateDetector`: the scoring seam; `ExactMatchDetector` is the
//!   offline implementation
//! - `aggregate`: threshold filtering and confidence counts

mod aggregate;
mod config;
mod detector;
mod table;

pub use aggregate::{
    aggregate, DuplicateSummary, ScanContext, HIGH_CONFIDENCE, MEDIUM_CONFIDENCE,
};
pub use config::DetectionConfig;
pub use detector::{DuplicateDetector, DuplicateGroup, ExactMatchDetector, RecordRef};
pub use table::TabularFile;
