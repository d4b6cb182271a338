//! Core data models for hoa-ledger
//!
//! Invoices, their allocation lines, and the amount helpers shared by the
//! balancer and the display layer.

pub mod amount;
pub mod ids;
pub mod invoice;
pub mod line_item;

pub use amount::{format_amount, parse_amount, parse_total, BALANCE_TOLERANCE};
pub use ids::InvoiceId;
pub use invoice::{Invoice, InvoiceStatus, InvoiceValidationError};
pub use line_item::{LineField, LineItem};
