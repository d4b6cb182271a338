//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod audit;
pub mod duplicates;
pub mod invoice;

pub use audit::handle_audit_command;
pub use duplicates::{handle_duplicates_command, DuplicateCommands};
pub use invoice::{handle_invoice_command, ExportFormat, InvoiceCommands};
