//! Invoice model
//!
//! An invoice owns the line set the balancer keeps consistent with its
//! total. Status gates editing: approved invoices are locked.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::{format_amount, BALANCE_TOLERANCE};
use super::ids::InvoiceId;
use super::line_item::LineItem;
use crate::balancer::{self, LineSetState};

/// Approval status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Lines may be edited
    #[default]
    Draft,
    /// Approved for payment; lines are locked until reopened
    Approved,
}

impl InvoiceStatus {
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Approved)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "approved" => Some(Self::Approved),
            _ => None,
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "Draft"),
            Self::Approved => write!(f, "Approved"),
        }
    }
}

/// A vendor invoice and its expense allocation lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,

    /// Association (community) the invoice is billed to
    #[serde(default)]
    pub association: String,

    pub vendor: String,

    #[serde(default)]
    pub invoice_number: String,

    pub invoice_date: NaiveDate,

    /// Target sum for the line set
    pub total: f64,

    /// Allocation lines; index 0 is the balancing line
    #[serde(default)]
    pub lines: Vec<LineItem>,

    #[serde(default)]
    pub status: InvoiceStatus,

    #[serde(default)]
    pub memo: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Create a draft invoice with the default single balancing line
    pub fn new(
        vendor: impl Into<String>,
        invoice_date: NaiveDate,
        total: f64,
        fund: impl Into<String>,
        bank_account: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: InvoiceId::new(),
            association: String::new(),
            vendor: vendor.into(),
            invoice_number: String::new(),
            invoice_date,
            total,
            lines: LineSetState::open(total, fund, bank_account).into_lines(),
            status: InvoiceStatus::Draft,
            memo: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.status.is_locked()
    }

    pub fn is_balanced(&self) -> bool {
        balancer::is_balanced(&self.lines, self.total)
    }

    /// Number of detail lines (everything after the balancing line)
    pub fn detail_count(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    pub fn set_status(&mut self, status: InvoiceStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Human-readable label: invoice number when present, otherwise the ID
    pub fn label(&self) -> String {
        if self.invoice_number.is_empty() {
            self.id.to_string()
        } else {
            self.invoice_number.clone()
        }
    }

    /// Check the invoice is ready for approval
    pub fn validate_for_approval(&self) -> Result<(), InvoiceValidationError> {
        if self.lines.is_empty() {
            return Err(InvoiceValidationError::NoLines);
        }

        if !self.is_balanced() {
            return Err(InvoiceValidationError::Unbalanced {
                total: self.total,
                lines_total: balancer::compute_detail_total(&self.lines)
                    + self.lines[0].parsed_amount(),
            });
        }

        if let Some(index) = self
            .lines
            .iter()
            .position(|line| line.gl_account.trim().is_empty())
        {
            return Err(InvoiceValidationError::MissingGlAccount { index });
        }

        Ok(())
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.invoice_date.format("%Y-%m-%d"),
            self.label(),
            self.vendor,
            format_amount(self.total)
        )
    }
}

/// Reasons an invoice cannot be approved
#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceValidationError {
    NoLines,
    Unbalanced { total: f64, lines_total: f64 },
    MissingGlAccount { index: usize },
}

impl fmt::Display for InvoiceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLines => write!(f, "Invoice has no lines"),
            Self::Unbalanced { total, lines_total } => write!(
                f,
                "Lines total {} does not match invoice total {} (tolerance {})",
                format_amount(*lines_total),
                format_amount(*total),
                BALANCE_TOLERANCE
            ),
            Self::MissingGlAccount { index } => {
                write!(f, "Line {} has no GL account", index)
            }
        }
    }
}

impl std::error::Error for InvoiceValidationError {}
