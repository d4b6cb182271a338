//! hoa-ledger - invoice line balancing and duplicate detection
//!
//! Bookkeeping support for homeowners' associations. The core is the
//! line-item balancer: an invoice's first line absorbs whatever the other
//! lines leave of the invoice total, so the set always sums to the total.
//! Alongside it sits a duplicate-detection aggregator for tabular files.
//!
//! # Architecture
//!
//! - `balancer`: pure line-set computations and the editor state machine
//! - `duplicates`: detector seam, exact-match detector, scan summaries
//! - `models`: invoices, line items, amounts, IDs
//! - `storage`: JSON file storage with atomic writes
//! - `services`: business logic over storage
//! - `audit`: JSONL audit log of every persisted change
//! - `config`: paths and settings
//! - `cli`, `display`, `export`: command-line surface
//!
//! # Example
//!
//! ```rust
//! use hoa_ledger::balancer::{LineAction, LineSetState};
//! use hoa_ledger::models::LineField;
//!
//! let state = LineSetState::open(100.0, "Operating", "1000").apply_all([
//!     LineAction::AddLine,
//!     LineAction::ChangeField {
//!         index: 1,
//!         field: LineField::Amount,
//!         value: "30".into(),
//!     },
//! ]);
//! assert_eq!(state.lines[0].amount, "70.00");
//! ```

pub mod audit;
pub mod balancer;
pub mod cli;
pub mod config;
pub mod display;
pub mod duplicates;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{HoaError, HoaResult};
