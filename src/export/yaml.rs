//! YAML Export functionality

use std::io::Write;

use crate::error::{HoaError, HoaResult};
use crate::export::json::InvoiceExport;
use crate::models::Invoice;

/// Export an invoice to YAML with a short header comment
pub fn export_invoice_yaml<W: Write>(invoice: &Invoice, writer: &mut W) -> HoaResult<()> {
    let export = InvoiceExport::new(invoice);

    writeln!(writer, "# hoa-ledger invoice export: {}", invoice.label())
        .map_err(|e| HoaError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| HoaError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| HoaError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_export() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut invoice = Invoice::new("Green Lawns", date, 100.0, "Operating", "1000");
        invoice.invoice_number = "GL-204".into();

        let mut output = Vec::new();
        export_invoice_yaml(&invoice, &mut output).unwrap();
        let yaml_string = String::from_utf8(output).unwrap();

        assert!(yaml_string.starts_with("# hoa-ledger invoice export: GL-204"));
        assert!(yaml_string.contains("vendor: Green Lawns"));
        assert!(yaml_string.contains("amount: '100.00'"));
    }
}
