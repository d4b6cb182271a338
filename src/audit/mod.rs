//! Audit logging for hoa-ledger
//!
//! Every create, update and delete of a persisted record is appended to
//! `audit.log` as one JSON line carrying before/after snapshots. Duplicate
//! scans are recorded the same way so their options and results are kept.
//!
//! ```rust,ignore
//! use hoa_ledger::audit::{AuditEntry, AuditLogger, EntityType, generate_diff};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let diff = generate_diff(&before_json, &after_json);
//! logger.log(&AuditEntry::update(
//!     EntityType::Invoice,
//!     invoice.id.to_string(),
//!     Some(invoice.label()),
//!     &before,
//!     &invoice,
//!     diff,
//! ))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::{collect_changes, generate_diff};
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
