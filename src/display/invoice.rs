//! Invoice display formatting
//!
//! Formats invoices for terminal output: a list view and a detail view
//! with the line table. The balancing line is marked with `*`.

use crate::balancer::LineSetSummary;
use crate::models::{format_amount, Invoice, InvoiceStatus};

/// Format a list of invoices as a table
pub fn format_invoice_list(invoices: &[Invoice]) -> String {
    if invoices.is_empty() {
        return "No invoices found.\n".to_string();
    }

    let vendor_width = invoices
        .iter()
        .map(|inv| inv.vendor.chars().count())
        .max()
        .unwrap_or(6)
        .clamp(6, 30);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<14}  {:<vendor_width$}  {:>12}  {:>5}  {}\n",
        "ID",
        "Date",
        "Number",
        "Vendor",
        "Total",
        "Lines",
        "Status",
        vendor_width = vendor_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<14}  {:-<vendor_width$}  {:->12}  {:->5}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        vendor_width = vendor_width,
    ));

    for invoice in invoices {
        let status = match (invoice.status, invoice.is_balanced()) {
            (InvoiceStatus::Approved, _) => "Approved",
            (InvoiceStatus::Draft, true) => "Draft",
            (InvoiceStatus::Draft, false) => "Draft (!)",
        };
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<14}  {:<vendor_width$}  {:>12}  {:>5}  {}\n",
            invoice.id.to_string(),
            invoice.invoice_date.format("%Y-%m-%d"),
            truncate(&invoice.invoice_number, 14),
            truncate(&invoice.vendor, vendor_width),
            format_amount(invoice.total),
            invoice.lines.len(),
            status,
            vendor_width = vendor_width,
        ));
    }

    output
}

/// Format the line table for an invoice
pub fn format_line_table(invoice: &Invoice) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<12}  {:<12}  {:<16}  {:<24}  {:>12}\n",
        "#", "GL Account", "Fund", "Bank Account", "Description", "Amount"
    ));
    output.push_str(&format!("{}\n", "-".repeat(92)));

    for (i, line) in invoice.lines.iter().enumerate() {
        let marker = if i == 0 { "*" } else { " " };
        output.push_str(&format!(
            "{:>3}{}  {:<12}  {:<12}  {:<16}  {:<24}  {:>12}\n",
            i,
            marker,
            truncate(&line.gl_account, 12),
            truncate(&line.fund, 12),
            truncate(&line.bank_account, 16),
            truncate(&line.description, 24),
            line.amount,
        ));
    }

    output
}

/// Format invoice details, lines and balance figures
pub fn format_invoice_details(invoice: &Invoice, summary: &LineSetSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Invoice:     {}\n", invoice.id));
    if !invoice.invoice_number.is_empty() {
        output.push_str(&format!("Number:      {}\n", invoice.invoice_number));
    }
    output.push_str(&format!("Vendor:      {}\n", invoice.vendor));
    if !invoice.association.is_empty() {
        output.push_str(&format!("Association: {}\n", invoice.association));
    }
    output.push_str(&format!(
        "Date:        {}\n",
        invoice.invoice_date.format("%Y-%m-%d")
    ));
    output.push_str(&format!("Status:      {}\n", invoice.status));
    if !invoice.memo.is_empty() {
        output.push_str(&format!("Memo:        {}\n", invoice.memo));
    }

    output.push('\n');
    output.push_str(&format_line_table(invoice));
    output.push('\n');
    output.push_str(&format_balance_summary(invoice.total, summary));

    output
}

/// Balance figures below the line table
pub fn format_balance_summary(invoice_total: f64, summary: &LineSetSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Invoice total:  {:>12}\n",
        format_amount(invoice_total)
    ));
    output.push_str(&format!(
        "Detail lines:   {:>12}\n",
        format_amount(summary.line_total)
    ));
    output.push_str(&format!(
        "Balancing line: {:>12}\n",
        format_amount(summary.adjusted_first_line_amount)
    ));
    output.push_str(if summary.is_balanced {
        "Balanced\n"
    } else {
        "NOT BALANCED - run 'hoa invoice reconcile'\n"
    });
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balancer::{LineAction, LineSetState};
    use crate::models::LineField;
    use chrono::NaiveDate;

    fn invoice() -> Invoice {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut invoice = Invoice::new("Green Lawns", date, 100.0, "Operating", "1000");
        invoice.invoice_number = "GL-204".into();
        let state = LineSetState::resume(invoice.lines.clone(), invoice.total).apply_all([
            LineAction::AddLine,
            LineAction::ChangeField {
                index: 1,
                field: LineField::Amount,
                value: "30".into(),
            },
        ]);
        invoice.lines = state.into_lines();
        invoice
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_invoice_list(&[]), "No invoices found.\n");
    }

    #[test]
    fn test_list_row() {
        let output = format_invoice_list(&[invoice()]);
        assert!(output.contains("GL-204"));
        assert!(output.contains("Green Lawns"));
        assert!(output.contains("100.00"));
        assert!(output.contains("Draft"));
        assert!(!output.contains("Draft (!)"));
    }

    #[test]
    fn test_line_table_marks_balancing_line() {
        let output = format_line_table(&invoice());
        let rows: Vec<&str> = output.lines().skip(2).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("  0*"));
        assert!(rows[0].ends_with("70.00"));
        assert!(rows[1].starts_with("  1 "));
        assert!(rows[1].ends_with("30"));
    }

    #[test]
    fn test_details_include_summary() {
        let invoice = invoice();
        let summary = LineSetState::resume(invoice.lines.clone(), invoice.total).summary();
        let output = format_invoice_details(&invoice, &summary);
        assert!(output.contains("Vendor:      Green Lawns"));
        assert!(output.contains("Detail lines:          30.00"));
        assert!(output.contains("Balancing line:        70.00"));
        assert!(output.contains("Balanced"));
    }

    #[test]
    fn test_unbalanced_summary() {
        let summary = LineSetSummary {
            line_total: 30.0,
            adjusted_first_line_amount: 90.0,
            is_balanced: false,
        };
        assert!(format_balance_summary(120.0, &summary).contains("NOT BALANCED"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long vendor name", 10), "a very ...");
    }
}
