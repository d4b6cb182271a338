//! Duplicate scan display formatting

use crate::duplicates::DuplicateSummary;

/// Format a scan summary with one block per group
pub fn format_scan_summary(summary: &DuplicateSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Scanned {} records in {} file(s) with {}\n",
        summary.records_scanned, summary.files_scanned, summary.detector
    ));
    output.push_str(&format!(
        "Options: strict={} fuzzy={} threshold={:.2} semantic={}\n",
        summary.config.strict_mode,
        summary.config.fuzzy_matching,
        summary.config.confidence_threshold,
        summary.config.semantic_analysis
    ));
    if summary.semantic_analysis_skipped {
        output.push_str("Note: semantic analysis is not supported by this detector and was skipped\n");
    }
    output.push('\n');

    if !summary.has_duplicates() {
        output.push_str("No duplicates found.\n");
        return output;
    }

    output.push_str(&format!(
        "Found {} duplicate group(s), {} duplicate record(s)\n",
        summary.group_count, summary.duplicate_record_count
    ));
    output.push_str(&format!(
        "  High confidence:   {}\n  Medium confidence: {}\n  Low confidence:    {}\n",
        summary.high_confidence, summary.medium_confidence, summary.low_confidence
    ));

    for (i, group) in summary.groups.iter().enumerate() {
        output.push_str(&format!(
            "\nGroup {} ({:.0}% - {})\n",
            i + 1,
            group.confidence * 100.0,
            group.reason
        ));
        for record in &group.records {
            output.push_str(&format!("  {} row {}\n", record.file, record.row));
        }
    }

    output
}
