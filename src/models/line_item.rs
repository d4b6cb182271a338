//! Invoice line item model
//!
//! A line allocates part of an invoice to a GL account within a fund and
//! bank account. The amount stays a string so it can hold exactly what was
//! typed; arithmetic goes through `amount::parse_amount`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::amount::parse_amount;

/// A single expense/allocation line on an invoice
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// General ledger account the line is posted to
    #[serde(default)]
    pub gl_account: String,

    /// Fund (operating, reserve, ...) the line belongs to
    #[serde(default)]
    pub fund: String,

    /// Bank account the invoice is paid from
    #[serde(default)]
    pub bank_account: String,

    #[serde(default)]
    pub description: String,

    /// Decimal amount as entered; missing or malformed amounts count as 0
    #[serde(default)]
    pub amount: String,
}

impl LineItem {
    /// Create a line with only an amount set
    pub fn with_amount(amount: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            ..Self::default()
        }
    }

    /// The amount as a number (0 when empty or not numeric)
    pub fn parsed_amount(&self) -> f64 {
        parse_amount(&self.amount)
    }

    /// Read a field by name
    pub fn field(&self, field: LineField) -> &str {
        match field {
            LineField::GlAccount => &self.gl_account,
            LineField::Fund => &self.fund,
            LineField::BankAccount => &self.bank_account,
            LineField::Description => &self.description,
            LineField::Amount => &self.amount,
        }
    }

    /// Overwrite a field by name
    pub fn set_field(&mut self, field: LineField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LineField::GlAccount => self.gl_account = value,
            LineField::Fund => self.fund = value,
            LineField::BankAccount => self.bank_account = value,
            LineField::Description => self.description = value,
            LineField::Amount => self.amount = value,
        }
    }
}

/// The editable fields of a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineField {
    GlAccount,
    Fund,
    BankAccount,
    Description,
    Amount,
}

impl LineField {
    pub const ALL: [LineField; 5] = [
        LineField::GlAccount,
        LineField::Fund,
        LineField::BankAccount,
        LineField::Description,
        LineField::Amount,
    ];

    /// The key used for this field in persisted records
    pub fn key(&self) -> &'static str {
        match self {
            Self::GlAccount => "glAccount",
            Self::Fund => "fund",
            Self::BankAccount => "bankAccount",
            Self::Description => "description",
            Self::Amount => "amount",
        }
    }
}

impl fmt::Display for LineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LineField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "gl_account" | "glaccount" | "gl" | "account" => Ok(Self::GlAccount),
            "fund" => Ok(Self::Fund),
            "bank_account" | "bankaccount" | "bank" => Ok(Self::BankAccount),
            "description" | "desc" => Ok(Self::Description),
            "amount" => Ok(Self::Amount),
            _ => Err(format!(
                "Unknown line field '{}'. Valid fields: gl_account, fund, bank_account, description, amount",
                s
            )),
        }
    }
}
