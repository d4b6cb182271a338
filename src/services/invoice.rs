//! Invoice service
//!
//! Opens invoices for editing, runs line edits through the balancer, and
//! persists and audits the result. The balancer itself stays pure; this is
//! the layer that holds the single mutable copy of each line set.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::balancer::{LineAction, LineSetState, LineSetSummary};
use crate::config::Settings;
use crate::error::{HoaError, HoaResult};
use crate::models::{Invoice, InvoiceId, InvoiceStatus, LineField, LineItem};
use crate::storage::Storage;

/// Service for invoice management
pub struct InvoiceService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

/// Options for filtering invoices
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    /// Case-insensitive substring of the vendor name
    pub vendor: Option<String>,
    /// Exact association name (case-insensitive)
    pub association: Option<String>,
    pub limit: Option<usize>,
}

impl InvoiceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn association(mut self, association: impl Into<String>) -> Self {
        self.association = Some(association.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, invoice: &Invoice) -> bool {
        if let Some(status) = self.status {
            if invoice.status != status {
                return false;
            }
        }
        if let Some(vendor) = &self.vendor {
            if !invoice
                .vendor
                .to_lowercase()
                .contains(&vendor.to_lowercase())
            {
                return false;
            }
        }
        if let Some(association) = &self.association {
            if !invoice.association.eq_ignore_ascii_case(association) {
                return false;
            }
        }
        true
    }
}

/// Input for creating a new invoice
#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    pub vendor: String,
    pub total: f64,
    pub invoice_date: NaiveDate,
    pub invoice_number: Option<String>,
    pub association: Option<String>,
    /// Defaults to the configured fund
    pub fund: Option<String>,
    /// Defaults to the configured bank account
    pub bank_account: Option<String>,
    /// GL account for the balancing line
    pub gl_account: Option<String>,
    pub memo: Option<String>,
}

impl<'a> InvoiceService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Create a draft invoice with its default single balancing line
    pub fn create(&self, input: CreateInvoiceInput) -> HoaResult<Invoice> {
        let vendor = input.vendor.trim();
        if vendor.is_empty() {
            return Err(HoaError::Validation("Vendor cannot be empty".into()));
        }
        validate_total(input.total)?;

        let invoice_number = input
            .invoice_number
            .map(|n| n.trim().to_string())
            .unwrap_or_default();
        if self.storage.invoices.find_by_number(&invoice_number)?.is_some() {
            return Err(HoaError::duplicate_invoice(invoice_number));
        }

        let fund = input
            .fund
            .unwrap_or_else(|| self.settings.default_fund.clone());
        let bank_account = input
            .bank_account
            .unwrap_or_else(|| self.settings.default_bank_account.clone());

        let mut invoice = Invoice::new(vendor, input.invoice_date, input.total, fund, bank_account);
        invoice.invoice_number = invoice_number;
        if let Some(association) = input.association {
            invoice.association = association.trim().to_string();
        }
        if let (Some(gl_account), Some(first)) = (input.gl_account, invoice.lines.first_mut()) {
            first.gl_account = gl_account.trim().to_string();
        }
        if let Some(memo) = input.memo {
            invoice.memo = memo;
        }

        self.storage.invoices.upsert(invoice.clone())?;
        self.storage.invoices.save()?;

        self.storage.log_create(
            EntityType::Invoice,
            invoice.id.to_string(),
            Some(invoice.label()),
            &invoice,
        )?;

        Ok(invoice)
    }

    pub fn get(&self, id: InvoiceId) -> HoaResult<Option<Invoice>> {
        self.storage.invoices.get(id)
    }

    /// Find an invoice by full ID, invoice number, or short ID (`inv-1a2b3c4d`)
    pub fn find(&self, identifier: &str) -> HoaResult<Option<Invoice>> {
        let identifier = identifier.trim();

        if let Ok(id) = identifier.parse::<InvoiceId>() {
            if let Some(invoice) = self.storage.invoices.get(id)? {
                return Ok(Some(invoice));
            }
        }

        if let Some(invoice) = self.storage.invoices.find_by_number(identifier)? {
            return Ok(Some(invoice));
        }

        let mut matches = self.storage.invoices.find_by_short_id(identifier)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(HoaError::Validation(format!(
                "'{}' matches {} invoices; use more of the ID",
                identifier, n
            ))),
        }
    }

    /// Find an invoice or fail with a not-found error
    pub fn require(&self, identifier: &str) -> HoaResult<Invoice> {
        self.find(identifier)?
            .ok_or_else(|| HoaError::invoice_not_found(identifier))
    }

    pub fn list(&self, filter: InvoiceFilter) -> HoaResult<Vec<Invoice>> {
        let mut invoices: Vec<_> = self
            .storage
            .invoices
            .get_all()?
            .into_iter()
            .filter(|inv| filter.matches(inv))
            .collect();

        if let Some(limit) = filter.limit {
            invoices.truncate(limit);
        }
        Ok(invoices)
    }

    /// Apply one line edit to a draft invoice and persist the result
    pub fn apply(&self, id: InvoiceId, action: LineAction) -> HoaResult<Invoice> {
        let mut invoice = self
            .storage
            .invoices
            .get(id)?
            .ok_or_else(|| HoaError::invoice_not_found(id.to_string()))?;

        if invoice.is_locked() {
            return Err(HoaError::Locked(format!(
                "{} is approved; reopen it before editing lines",
                invoice.label()
            )));
        }

        let before = invoice.clone();
        let state = self
            .edit_state(std::mem::take(&mut invoice.lines), invoice.total)
            .apply(action);

        invoice.total = state.invoice_total;
        invoice.lines = state.into_lines();
        invoice.updated_at = chrono::Utc::now();

        self.persist_update(&before, &invoice)?;
        Ok(invoice)
    }

    pub fn add_line(&self, id: InvoiceId) -> HoaResult<Invoice> {
        self.apply(id, LineAction::AddLine)
    }

    /// Edit a field of a line; the index is checked so typos are reported
    pub fn change_field(
        &self,
        id: InvoiceId,
        index: usize,
        field: LineField,
        value: impl Into<String>,
    ) -> HoaResult<Invoice> {
        self.check_index(id, index)?;
        self.apply(
            id,
            LineAction::ChangeField {
                index,
                field,
                value: value.into(),
            },
        )
    }

    pub fn remove_line(&self, id: InvoiceId, index: usize) -> HoaResult<Invoice> {
        self.check_index(id, index)?;
        self.apply(id, LineAction::RemoveLine { index })
    }

    /// Change the invoice total; the balancing line absorbs the difference
    pub fn set_total(&self, id: InvoiceId, total: f64) -> HoaResult<Invoice> {
        validate_total(total)?;
        self.apply(id, LineAction::SetTotal { total })
    }

    /// Re-check the balancing line against the stored total
    pub fn reconcile(&self, id: InvoiceId) -> HoaResult<Invoice> {
        self.apply(id, LineAction::Reconcile)
    }

    /// Balance figures for display
    pub fn summary(&self, invoice: &Invoice) -> LineSetSummary {
        LineSetState {
            lines: invoice.lines.clone(),
            invoice_total: invoice.total,
        }
        .summary()
    }

    /// Approve a balanced invoice, locking its lines
    pub fn approve(&self, id: InvoiceId) -> HoaResult<Invoice> {
        let mut invoice = self
            .storage
            .invoices
            .get(id)?
            .ok_or_else(|| HoaError::invoice_not_found(id.to_string()))?;

        if invoice.is_locked() {
            return Err(HoaError::Validation(format!(
                "{} is already approved",
                invoice.label()
            )));
        }

        invoice
            .validate_for_approval()
            .map_err(|e| HoaError::Validation(e.to_string()))?;

        let before = invoice.clone();
        invoice.set_status(InvoiceStatus::Approved);
        self.persist_update(&before, &invoice)?;
        Ok(invoice)
    }

    /// Return an approved invoice to draft so its lines can be edited
    pub fn reopen(&self, id: InvoiceId) -> HoaResult<Invoice> {
        let mut invoice = self
            .storage
            .invoices
            .get(id)?
            .ok_or_else(|| HoaError::invoice_not_found(id.to_string()))?;

        if !invoice.is_locked() {
            return Err(HoaError::Validation(format!(
                "{} is not approved",
                invoice.label()
            )));
        }

        let before = invoice.clone();
        invoice.set_status(InvoiceStatus::Draft);
        self.persist_update(&before, &invoice)?;
        Ok(invoice)
    }

    /// Delete a draft invoice
    pub fn delete(&self, id: InvoiceId) -> HoaResult<Invoice> {
        let invoice = self
            .storage
            .invoices
            .get(id)?
            .ok_or_else(|| HoaError::invoice_not_found(id.to_string()))?;

        if invoice.is_locked() {
            return Err(HoaError::Locked(format!(
                "{} is approved and cannot be deleted",
                invoice.label()
            )));
        }

        self.storage.invoices.delete(id)?;
        self.storage.invoices.save()?;

        self.storage.log_delete(
            EntityType::Invoice,
            invoice.id.to_string(),
            Some(invoice.label()),
            &invoice,
        )?;

        Ok(invoice)
    }

    /// Open stored lines for editing; a set stored without lines gets a
    /// fresh balancing line on the configured fund and bank account
    fn edit_state(&self, lines: Vec<LineItem>, invoice_total: f64) -> LineSetState {
        if lines.is_empty() {
            LineSetState::open(
                invoice_total,
                self.settings.default_fund.clone(),
                self.settings.default_bank_account.clone(),
            )
        } else {
            LineSetState::resume(lines, invoice_total)
        }
    }

    fn check_index(&self, id: InvoiceId, index: usize) -> HoaResult<()> {
        let invoice = self
            .storage
            .invoices
            .get(id)?
            .ok_or_else(|| HoaError::invoice_not_found(id.to_string()))?;

        // An empty stored set is edited as a single balancing line
        let line_count = invoice.lines.len().max(1);
        if index >= line_count {
            return Err(HoaError::Validation(format!(
                "Line {} does not exist; {} has lines 0-{}",
                index,
                invoice.label(),
                line_count - 1
            )));
        }
        Ok(())
    }

    fn persist_update(&self, before: &Invoice, after: &Invoice) -> HoaResult<()> {
        self.storage.invoices.upsert(after.clone())?;
        self.storage.invoices.save()?;

        self.storage.log_update(
            EntityType::Invoice,
            after.id.to_string(),
            Some(after.label()),
            before,
            after,
        )
    }
}

fn validate_total(total: f64) -> HoaResult<()> {
    if !total.is_finite() {
        return Err(HoaError::Validation(format!(
            "Invoice total must be a finite number, got {}",
            total
        )));
    }
    Ok(())
}
