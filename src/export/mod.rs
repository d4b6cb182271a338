//! Export module for hoa-ledger
//!
//! Writes a single invoice in one of three formats:
//! - CSV: the line table, one row per line (spreadsheet-compatible)
//! - JSON: the full invoice record plus balance figures
//! - YAML: the same record, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_lines_csv;
pub use json::{export_invoice_json, InvoiceExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_invoice_yaml;
