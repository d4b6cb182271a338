//! Line set editor state machine
//!
//! [`LineSetState`] pairs a line set with the invoice total it must match.
//! [`LineSetState::apply`] is the single transition function: it runs one
//! [`LineAction`] through the balancer and then reconciles, so the set is
//! balanced after every action regardless of which one ran.

use serde::{Deserialize, Serialize};

use super::{
    add_line, change_field, compute_balancing_amount, compute_detail_total, is_balanced,
    reconcile, remove_line,
};
use crate::models::amount::format_amount;
use crate::models::{LineField, LineItem};

/// A user edit to a line set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LineAction {
    /// Append a detail line
    AddLine,
    /// Edit one field of one line
    ChangeField {
        index: usize,
        field: LineField,
        value: String,
    },
    /// Remove a line (never below one line)
    RemoveLine { index: usize },
    /// The invoice total changed outside the editor
    SetTotal { total: f64 },
    /// Re-check the balancing line against the current total
    Reconcile,
}

/// An invoice's line set together with its target total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSetState {
    pub lines: Vec<LineItem>,
    pub invoice_total: f64,
}

/// Derived values shown next to a line set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineSetSummary {
    /// Sum of the detail lines
    pub line_total: f64,
    /// What the balancing line should hold
    pub adjusted_first_line_amount: f64,
    pub is_balanced: bool,
}

impl LineSetState {
    /// Open a line set for editing with the default single balancing line
    pub fn open(
        invoice_total: f64,
        fund: impl Into<String>,
        bank_account: impl Into<String>,
    ) -> Self {
        Self {
            lines: vec![LineItem {
                fund: fund.into(),
                bank_account: bank_account.into(),
                amount: format_amount(invoice_total),
                ..LineItem::default()
            }],
            invoice_total,
        }
    }

    /// Resume editing existing lines; an empty set gets a balancing line
    pub fn resume(lines: Vec<LineItem>, invoice_total: f64) -> Self {
        if lines.is_empty() {
            return Self::open(invoice_total, "", "");
        }
        Self {
            lines,
            invoice_total,
        }
        .apply(LineAction::Reconcile)
    }

    /// Apply one action and return the next state
    pub fn apply(self, action: LineAction) -> Self {
        let Self {
            lines,
            mut invoice_total,
        } = self;

        let lines = match action {
            LineAction::AddLine => add_line(&lines),
            LineAction::ChangeField {
                index,
                field,
                value,
            } => change_field(&lines, index, field, &value, invoice_total),
            LineAction::RemoveLine { index } => remove_line(&lines, index),
            LineAction::SetTotal { total } => {
                invoice_total = total;
                lines
            }
            LineAction::Reconcile => lines,
        };

        Self {
            lines: reconcile(&lines, invoice_total),
            invoice_total,
        }
    }

    /// Apply a sequence of actions in order
    pub fn apply_all(self, actions: impl IntoIterator<Item = LineAction>) -> Self {
        actions.into_iter().fold(self, Self::apply)
    }

    pub fn line_total(&self) -> f64 {
        compute_detail_total(&self.lines)
    }

    pub fn adjusted_first_line_amount(&self) -> f64 {
        compute_balancing_amount(&self.lines, self.invoice_total)
    }

    pub fn is_balanced(&self) -> bool {
        is_balanced(&self.lines, self.invoice_total)
    }

    pub fn summary(&self) -> LineSetSummary {
        LineSetSummary {
            line_total: self.line_total(),
            adjusted_first_line_amount: self.adjusted_first_line_amount(),
            is_balanced: self.is_balanced(),
        }
    }

    pub fn into_lines(self) -> Vec<LineItem> {
        self.lines
    }
}
