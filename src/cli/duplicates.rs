//! Duplicate scan CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::duplicates::format_scan_summary;
use crate::duplicates::DetectionConfig;
use crate::error::{HoaError, HoaResult};
use crate::services::DuplicateService;
use crate::storage::Storage;

/// Duplicate detection subcommands
#[derive(Subcommand)]
pub enum DuplicateCommands {
    /// Scan CSV files for duplicate records
    Scan {
        /// CSV files to scan (first row is the header)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Compare values exactly, without trimming or case folding
        #[arg(long)]
        strict: bool,
        /// Disable case and whitespace folding
        #[arg(long)]
        no_fuzzy: bool,
        /// Minimum confidence (0.0 - 1.0) for a group to be reported
        #[arg(short, long)]
        threshold: Option<f64>,
        /// Request meaning-level comparison where the detector supports it
        #[arg(long)]
        semantic: bool,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle a duplicates command
pub fn handle_duplicates_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DuplicateCommands,
) -> HoaResult<()> {
    let service = DuplicateService::new(storage);

    match cmd {
        DuplicateCommands::Scan {
            files,
            strict,
            no_fuzzy,
            threshold,
            semantic,
            json,
        } => {
            let config = scan_config(settings.duplicate_detection, strict, no_fuzzy, threshold, semantic);
            let summary = service.scan_paths(&files, &config)?;

            if json {
                let output = serde_json::to_string_pretty(&summary)
                    .map_err(|e| HoaError::Export(e.to_string()))?;
                println!("{}", output);
            } else {
                print!("{}", format_scan_summary(&summary));
            }
        }
    }

    Ok(())
}

/// Command-line flags override the configured scan options
fn scan_config(
    base: DetectionConfig,
    strict: bool,
    no_fuzzy: bool,
    threshold: Option<f64>,
    semantic: bool,
) -> DetectionConfig {
    let mut config = base;
    if strict {
        config = config.with_strict_mode(true);
    }
    if no_fuzzy {
        config = config.with_fuzzy_matching(false);
    }
    if let Some(threshold) = threshold {
        config = config.with_confidence_threshold(threshold);
    }
    if semantic {
        config = config.with_semantic_analysis(true);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let base = DetectionConfig::default().with_confidence_threshold(0.5);

        let unchanged = scan_config(base, false, false, None, false);
        assert_eq!(unchanged, base);

        let config = scan_config(base, true, true, Some(0.95), true);
        assert!(config.strict_mode);
        assert!(!config.fuzzy_matching);
        assert_eq!(config.confidence_threshold, 0.95);
        assert!(config.semantic_analysis);
    }
}
