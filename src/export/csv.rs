//! CSV Export functionality
//!
//! Exports an invoice's line set to CSV.

use std::io::Write;

use crate::error::{HoaError, HoaResult};
use crate::models::{format_amount, Invoice};

/// Export the lines of an invoice to CSV
///
/// Amounts are written as stored, except the balancing line which always
/// carries its two-decimal form.
pub fn export_lines_csv<W: Write>(invoice: &Invoice, writer: W) -> HoaResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "Invoice",
        "Vendor",
        "Line",
        "Balancing",
        "GL Account",
        "Fund",
        "Bank Account",
        "Description",
        "Amount",
    ])?;

    let label = invoice.label();
    for (i, line) in invoice.lines.iter().enumerate() {
        let amount = if i == 0 {
            format_amount(line.parsed_amount())
        } else {
            line.amount.clone()
        };
        let index = i.to_string();
        csv_writer.write_record([
            label.as_str(),
            invoice.vendor.as_str(),
            index.as_str(),
            if i == 0 { "true" } else { "false" },
            line.gl_account.as_str(),
            line.fund.as_str(),
            line.bank_account.as_str(),
            line.description.as_str(),
            amount.as_str(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| HoaError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balancer::{LineAction, LineSetState};
    use crate::models::LineField;
    use chrono::NaiveDate;

    #[test]
    fn test_csv_export() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut invoice = Invoice::new("Green Lawns", date, 100.0, "Operating", "1000");
        invoice.invoice_number = "GL-204".into();
        invoice.lines = LineSetState::resume(invoice.lines.clone(), invoice.total)
            .apply_all([
                LineAction::AddLine,
                LineAction::ChangeField {
                    index: 1,
                    field: LineField::Description,
                    value: "Mowing, March".into(),
                },
                LineAction::ChangeField {
                    index: 1,
                    field: LineField::Amount,
                    value: "30".into(),
                },
            ])
            .into_lines();

        let mut output = Vec::new();
        export_lines_csv(&invoice, &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();
        let rows: Vec<&str> = csv_string.lines().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("Invoice,Vendor,Line,Balancing"));
        assert_eq!(rows[1], "GL-204,Green Lawns,0,true,,Operating,1000,,70.00");
        assert_eq!(
            rows[2],
            "GL-204,Green Lawns,1,false,,Operating,1000,\"Mowing, March\",30"
        );
    }
}
