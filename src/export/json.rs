//! JSON Export functionality
//!
//! Exports an invoice with schema versioning and its balance figures.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::balancer::{LineSetState, LineSetSummary};
use crate::error::{HoaError, HoaResult};
use crate::models::Invoice;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Invoice export structure
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    pub invoice: Invoice,
    pub balance: LineSetSummary,
}

impl InvoiceExport {
    pub fn new(invoice: &Invoice) -> Self {
        let balance = LineSetState {
            lines: invoice.lines.clone(),
            invoice_total: invoice.total,
        }
        .summary();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            invoice: invoice.clone(),
            balance,
        }
    }
}

/// Export an invoice to JSON
pub fn export_invoice_json<W: Write>(invoice: &Invoice, writer: &mut W, pretty: bool) -> HoaResult<()> {
    let export = InvoiceExport::new(invoice);

    let written = if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    };
    written.map_err(|e| HoaError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| HoaError::Export(e.to_string()))?;
    Ok(())
}
