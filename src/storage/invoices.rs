//! Invoice repository for JSON storage
//!
//! Manages loading and saving invoices (with their line sets) to
//! invoices.json.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::HoaError;
use crate::models::{Invoice, InvoiceId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable invoice data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct InvoiceData {
    invoices: Vec<Invoice>,
}

/// Repository for invoice persistence
pub struct InvoiceRepository {
    path: PathBuf,
    data: RwLock<HashMap<InvoiceId, Invoice>>,
}

impl InvoiceRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<InvoiceId, Invoice>>, HoaError> {
        self.data
            .read()
            .map_err(|e| HoaError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<InvoiceId, Invoice>>, HoaError> {
        self.data
            .write()
            .map_err(|e| HoaError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load invoices from disk, replacing anything in memory
    pub fn load(&self) -> Result<(), HoaError> {
        let file_data: InvoiceData = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for invoice in file_data.invoices {
            data.insert(invoice.id, invoice);
        }

        Ok(())
    }

    /// Save invoices to disk, newest invoice date first
    pub fn save(&self) -> Result<(), HoaError> {
        let invoices = self.get_all()?;
        write_json_atomic(&self.path, &InvoiceData { invoices })
    }

    pub fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, HoaError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All invoices, newest invoice date first
    pub fn get_all(&self) -> Result<Vec<Invoice>, HoaError> {
        let mut invoices: Vec<_> = self.read()?.values().cloned().collect();
        invoices.sort_by(|a, b| {
            b.invoice_date
                .cmp(&a.invoice_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(invoices)
    }

    /// Find an invoice by its invoice number (case-insensitive)
    pub fn find_by_number(&self, number: &str) -> Result<Option<Invoice>, HoaError> {
        let number = number.trim().to_lowercase();
        if number.is_empty() {
            return Ok(None);
        }
        Ok(self
            .read()?
            .values()
            .find(|inv| inv.invoice_number.to_lowercase() == number)
            .cloned())
    }

    /// Find invoices whose ID starts with a short form like `inv-1a2b`
    pub fn find_by_short_id(&self, short: &str) -> Result<Vec<Invoice>, HoaError> {
        Ok(self
            .read()?
            .values()
            .filter(|inv| inv.id.matches_short(short))
            .cloned()
            .collect())
    }

    pub fn upsert(&self, invoice: Invoice) -> Result<(), HoaError> {
        self.write()?.insert(invoice.id, invoice);
        Ok(())
    }

    /// Remove an invoice, returning it if it existed
    pub fn delete(&self, id: InvoiceId) -> Result<Option<Invoice>, HoaError> {
        Ok(self.write()?.remove(&id))
    }

    pub fn count(&self) -> Result<usize, HoaError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, InvoiceRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = InvoiceRepository::new(temp_dir.path().join("invoices.json"));
        (temp_dir, repo)
    }

    fn invoice(number: &str, day: u32) -> Invoice {
        let date = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        let mut inv = Invoice::new("Green Lawns", date, 100.0, "Operating", "1000");
        inv.invoice_number = number.to_string();
        inv
    }

    #[test]
    fn test_empty_load() {
        let (_temp, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_save_reload() {
        let (_temp, repo) = create_test_repo();
        let inv = invoice("GL-1", 1);
        let id = inv.id;
        repo.upsert(inv).unwrap();
        repo.save().unwrap();

        repo.load().unwrap();
        let loaded = repo.get(id).unwrap().unwrap();
        assert_eq!(loaded.invoice_number, "GL-1");
        assert_eq!(loaded.lines[0].amount, "100.00");
    }

    #[test]
    fn test_get_all_newest_first() {
        let (_temp, repo) = create_test_repo();
        repo.upsert(invoice("A", 1)).unwrap();
        repo.upsert(invoice("B", 15)).unwrap();
        repo.upsert(invoice("C", 7)).unwrap();

        let numbers: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|i| i.invoice_number)
            .collect();
        assert_eq!(numbers, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_find_by_number_and_short_id() {
        let (_temp, repo) = create_test_repo();
        let inv = invoice("GL-204", 1);
        let short = inv.id.to_string();
        repo.upsert(inv).unwrap();

        assert!(repo.find_by_number("gl-204").unwrap().is_some());
        assert!(repo.find_by_number("GL-999").unwrap().is_none());
        assert!(repo.find_by_number("  ").unwrap().is_none());
        assert_eq!(repo.find_by_short_id(&short).unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let (_temp, repo) = create_test_repo();
        let inv = invoice("GL-1", 1);
        let id = inv.id;
        repo.upsert(inv).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
