//! Display formatting for terminal output
//!
//! Formats invoices and scan results as plain-text tables.

pub mod duplicates;
pub mod invoice;

pub use duplicates::format_scan_summary;
pub use invoice::{
    format_balance_summary, format_invoice_details, format_invoice_list, format_line_table,
};
