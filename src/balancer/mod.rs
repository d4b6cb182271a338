//! Self-balancing invoice line sets
//!
//! A line set is an ordered list of [`LineItem`]s where index 0 is the
//! balancing line and every later index is a detail line. The balancing
//! line's amount is never entered directly: it is always
//! `invoice_total - sum(detail amounts)`, so the whole set adds up to the
//! invoice total to within [`BALANCE_TOLERANCE`].
//!
//! Every function here is pure. Each mutation takes the current lines and
//! returns a replacement list; nothing fails, malformed amounts count as 0,
//! and out-of-range indexes leave the list unchanged.
//!
//! [`editor`] wraps these functions in a `(state, action) -> state`
//! transition for callers that hold a single mutable line set.

pub mod editor;

pub use editor::{LineAction, LineSetState, LineSetSummary};

use crate::models::amount::{format_amount, BALANCE_TOLERANCE};
use crate::models::{LineField, LineItem};

/// Sum of the detail line amounts (every line except index 0)
pub fn compute_detail_total(lines: &[LineItem]) -> f64 {
    lines.iter().skip(1).map(LineItem::parsed_amount).sum()
}

/// The amount the balancing line must hold for the set to match `invoice_total`
pub fn compute_balancing_amount(lines: &[LineItem], invoice_total: f64) -> f64 {
    invoice_total - compute_detail_total(lines)
}

/// Append a detail line
///
/// The new line inherits fund and bank account from the balancing line and
/// starts at "0", so the balance is unaffected.
pub fn add_line(lines: &[LineItem]) -> Vec<LineItem> {
    let (fund, bank_account) = lines
        .first()
        .map(|first| (first.fund.clone(), first.bank_account.clone()))
        .unwrap_or_default();

    let mut next = lines.to_vec();
    next.push(LineItem {
        gl_account: String::new(),
        fund,
        bank_account,
        description: String::new(),
        amount: "0".to_string(),
    });
    next
}

/// Edit one field of one line
///
/// Amount edits on a detail line store the raw input and then recompute the
/// balancing line. Amount edits aimed at the balancing line itself are
/// ignored in favor of the recomputed value.
pub fn change_field(
    lines: &[LineItem],
    index: usize,
    field: LineField,
    value: &str,
    invoice_total: f64,
) -> Vec<LineItem> {
    let mut next = lines.to_vec();
    if index >= next.len() {
        return next;
    }

    if field != LineField::Amount {
        next[index].set_field(field, value);
        return next;
    }

    if index != 0 {
        next[index].amount = value.to_string();
    }
    next[0].amount = format_amount(compute_balancing_amount(&next, invoice_total));
    next
}

/// Remove a line, keeping at least one line in the set
pub fn remove_line(lines: &[LineItem], index: usize) -> Vec<LineItem> {
    let mut next = lines.to_vec();
    if next.len() > 1 && index < next.len() {
        next.remove(index);
    }
    next
}

/// Restore the balancing line after the invoice total changed
///
/// Returns the lines unchanged when they already balance, so calling it
/// twice in a row is the same as calling it once.
pub fn reconcile(lines: &[LineItem], invoice_total: f64) -> Vec<LineItem> {
    let mut next = lines.to_vec();
    let Some(first) = next.first() else {
        return next;
    };

    let expected = compute_balancing_amount(lines, invoice_total);
    if (first.parsed_amount() - expected).abs() > BALANCE_TOLERANCE {
        next[0].amount = format_amount(expected);
    }
    next
}

/// Whether the lines add up to `invoice_total` within one cent
pub fn is_balanced(lines: &[LineItem], invoice_total: f64) -> bool {
    let first = lines.first().map(LineItem::parsed_amount).unwrap_or(0.0);
    (compute_detail_total(lines) + first - invoice_total).abs() <= BALANCE_TOLERANCE
}
