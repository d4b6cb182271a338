//! Invoice CLI commands
//!
//! Implements CLI commands for invoices and their line sets. Every line edit
//! prints the resulting table so the recomputed balancing line is visible.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::display::invoice::{
    format_balance_summary, format_invoice_details, format_invoice_list, format_line_table,
};
use crate::error::{HoaError, HoaResult};
use crate::export;
use crate::models::amount::format_with_symbol;
use crate::models::{format_amount, parse_total, Invoice, InvoiceStatus, LineField};
use crate::services::{CreateInvoiceInput, InvoiceFilter, InvoiceService};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV of the line table
    Csv,
    /// Full invoice record as JSON
    Json,
    /// Full invoice record as YAML
    Yaml,
}

/// Invoice subcommands
#[derive(Subcommand)]
pub enum InvoiceCommands {
    /// Create a new draft invoice
    Create {
        /// Vendor name
        vendor: String,
        /// Invoice total (e.g., "1250.00")
        #[arg(short, long, allow_hyphen_values = true)]
        total: String,
        /// Invoice date, defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Vendor's invoice number
        #[arg(short, long)]
        number: Option<String>,
        /// Association the invoice is billed to
        #[arg(short, long)]
        association: Option<String>,
        /// Fund for the balancing line (defaults to the configured fund)
        #[arg(long)]
        fund: Option<String>,
        /// Bank account for the balancing line
        #[arg(long)]
        bank: Option<String>,
        /// GL account for the balancing line
        #[arg(long)]
        gl: Option<String>,
        /// Memo
        #[arg(short, long)]
        memo: Option<String>,
    },
    /// List invoices
    List {
        /// Filter by status (draft, approved)
        #[arg(short, long)]
        status: Option<String>,
        /// Filter by vendor (substring match)
        #[arg(short, long)]
        vendor: Option<String>,
        /// Filter by association
        #[arg(short, long)]
        association: Option<String>,
        /// Number of invoices to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show invoice details and lines
    Show {
        /// Invoice number or ID
        invoice: String,
    },
    /// Append a detail line
    AddLine {
        /// Invoice number or ID
        invoice: String,
    },
    /// Set one field of a line
    Set {
        /// Invoice number or ID
        invoice: String,
        /// Line index (0 is the balancing line)
        line: usize,
        /// Field: gl_account, fund, bank_account, description, amount
        field: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Remove a line
    RemoveLine {
        /// Invoice number or ID
        invoice: String,
        /// Line index
        line: usize,
    },
    /// Change the invoice total
    Total {
        /// Invoice number or ID
        invoice: String,
        /// New total
        #[arg(allow_hyphen_values = true)]
        total: String,
    },
    /// Recompute the balancing line against the invoice total
    Reconcile {
        /// Invoice number or ID
        invoice: String,
    },
    /// Approve a balanced invoice (locks its lines)
    Approve {
        /// Invoice number or ID
        invoice: String,
    },
    /// Return an approved invoice to draft
    Reopen {
        /// Invoice number or ID
        invoice: String,
    },
    /// Delete a draft invoice
    Delete {
        /// Invoice number or ID
        invoice: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Export an invoice
    Export {
        /// Invoice number or ID
        invoice: String,
        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an invoice command
pub fn handle_invoice_command(
    storage: &Storage,
    settings: &Settings,
    cmd: InvoiceCommands,
) -> HoaResult<()> {
    let service = InvoiceService::new(storage, settings);

    match cmd {
        InvoiceCommands::Create {
            vendor,
            total,
            date,
            number,
            association,
            fund,
            bank,
            gl,
            memo,
        } => {
            let total = parse_total_arg(&total)?;
            let invoice_date = match date {
                Some(d) => parse_date(&d, settings)?,
                None => Local::now().date_naive(),
            };

            let invoice = service.create(CreateInvoiceInput {
                vendor,
                total,
                invoice_date,
                invoice_number: number,
                association,
                fund,
                bank_account: bank,
                gl_account: gl,
                memo,
            })?;

            println!("Created invoice: {}", invoice.label());
            println!("  Vendor: {}", invoice.vendor);
            println!(
                "  Total:  {}",
                format_with_symbol(invoice.total, &settings.currency_symbol)
            );
            println!("  ID:     {}", invoice.id);
        }

        InvoiceCommands::List {
            status,
            vendor,
            association,
            limit,
        } => {
            let mut filter = InvoiceFilter::new().limit(limit);
            if let Some(status) = status {
                let status = InvoiceStatus::parse(&status).ok_or_else(|| {
                    HoaError::Validation(format!(
                        "Invalid status: '{}'. Valid statuses: draft, approved",
                        status
                    ))
                })?;
                filter = filter.status(status);
            }
            if let Some(vendor) = vendor {
                filter = filter.vendor(vendor);
            }
            if let Some(association) = association {
                filter = filter.association(association);
            }

            let invoices = service.list(filter)?;
            print!("{}", format_invoice_list(&invoices));
        }

        InvoiceCommands::Show { invoice } => {
            let invoice = service.require(&invoice)?;
            let summary = service.summary(&invoice);
            print!("{}", format_invoice_details(&invoice, &summary));
        }

        InvoiceCommands::AddLine { invoice } => {
            let found = service.require(&invoice)?;
            let updated = service.add_line(found.id)?;
            println!(
                "Added line {} to {}",
                updated.lines.len().saturating_sub(1),
                updated.label()
            );
            print_lines(&service, &updated);
        }

        InvoiceCommands::Set {
            invoice,
            line,
            field,
            value,
        } => {
            let field: LineField = field.parse().map_err(HoaError::Validation)?;
            let found = service.require(&invoice)?;
            if line == 0 && field == LineField::Amount {
                println!("Line 0 is the balancing line; its amount is always recomputed.");
            }
            let updated = service.change_field(found.id, line, field, value)?;
            print_lines(&service, &updated);
        }

        InvoiceCommands::RemoveLine { invoice, line } => {
            let found = service.require(&invoice)?;
            if found.lines.len() == 1 {
                println!("{} has only its balancing line; nothing removed.", found.label());
                return Ok(());
            }
            let updated = service.remove_line(found.id, line)?;
            println!("Removed line {} from {}", line, updated.label());
            print_lines(&service, &updated);
        }

        InvoiceCommands::Total { invoice, total } => {
            let total = parse_total_arg(&total)?;
            let found = service.require(&invoice)?;
            let updated = service.set_total(found.id, total)?;
            println!(
                "Total for {} changed from {} to {}",
                updated.label(),
                format_amount(found.total),
                format_amount(updated.total)
            );
            print_lines(&service, &updated);
        }

        InvoiceCommands::Reconcile { invoice } => {
            let found = service.require(&invoice)?;
            let was_balanced = found.is_balanced();
            let updated = service.reconcile(found.id)?;
            if was_balanced {
                println!("{} was already balanced", updated.label());
            } else if let Some(balancing) = updated.lines.first() {
                println!(
                    "Balancing line of {} set to {}",
                    updated.label(),
                    balancing.amount
                );
            }
            print_lines(&service, &updated);
        }

        InvoiceCommands::Approve { invoice } => {
            let found = service.require(&invoice)?;
            let approved = service.approve(found.id)?;
            println!(
                "Approved invoice: {} ({} {})",
                approved.label(),
                approved.vendor,
                format_with_symbol(approved.total, &settings.currency_symbol)
            );
        }

        InvoiceCommands::Reopen { invoice } => {
            let found = service.require(&invoice)?;
            let reopened = service.reopen(found.id)?;
            println!("Reopened invoice: {}", reopened.label());
        }

        InvoiceCommands::Delete { invoice, force } => {
            let found = service.require(&invoice)?;

            if !force {
                println!("About to delete invoice:");
                println!("  Number: {}", found.label());
                println!("  Vendor: {}", found.vendor);
                println!("  Total:  {}", format_amount(found.total));
                println!("  Lines:  {}", found.lines.len());
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(found.id)?;
            println!("Deleted invoice: {} ({})", deleted.label(), deleted.vendor);
        }

        InvoiceCommands::Export {
            invoice,
            format,
            output,
        } => {
            let found = service.require(&invoice)?;
            match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| {
                        HoaError::Export(format!(
                            "Failed to create file {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    let mut writer = BufWriter::new(file);
                    write_export(&found, format, &mut writer)?;
                    writer.flush().map_err(|e| HoaError::Export(e.to_string()))?;
                    println!("Exported {} to: {}", found.label(), path.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut writer = stdout.lock();
                    write_export(&found, format, &mut writer)?;
                }
            }
        }
    }

    Ok(())
}

fn write_export<W: Write>(invoice: &Invoice, format: ExportFormat, writer: &mut W) -> HoaResult<()> {
    match format {
        ExportFormat::Csv => export::export_lines_csv(invoice, writer),
        ExportFormat::Json => export::export_invoice_json(invoice, writer, true),
        ExportFormat::Yaml => export::export_invoice_yaml(invoice, writer),
    }
}

fn print_lines(service: &InvoiceService<'_>, invoice: &Invoice) {
    println!();
    print!("{}", format_line_table(invoice));
    println!();
    print!("{}", format_balance_summary(invoice.total, &service.summary(invoice)));
}

fn parse_total_arg(total: &str) -> HoaResult<f64> {
    parse_total(total).map_err(|e| {
        HoaError::Validation(format!(
            "Invalid total: '{}'. Use format like '1250.00' or '1250'. Error: {}",
            total, e
        ))
    })
}

/// Parse a date in the configured format, falling back to ISO
fn parse_date(date: &str, settings: &Settings) -> HoaResult<NaiveDate> {
    NaiveDate::parse_from_str(date, &settings.date_format)
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .map_err(|_| {
            HoaError::Validation(format!(
                "Invalid date: '{}'. Use {} or YYYY-MM-DD",
                date, settings.date_format
            ))
        })
}
