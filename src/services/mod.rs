//! Service layer for hoa-ledger
//!
//! Business logic on top of the storage layer: validation, the balancer's
//! edit cycle, and audit logging of every persisted change.

pub mod duplicates;
pub mod invoice;

pub use duplicates::DuplicateService;
pub use invoice::{CreateInvoiceInput, InvoiceFilter, InvoiceService};
