//! Storage layer for hoa-ledger
//!
//! JSON file storage with atomic writes, plus the audit log every persisted
//! change is recorded in. This is the persistence collaborator for line
//! sets: the balancer computes, storage keeps.

pub mod file_io;
pub mod init;
pub mod invoices;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use invoices::InvoiceRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::HoaPaths;
use crate::error::HoaError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: HoaPaths,
    audit: AuditLogger,
    pub invoices: InvoiceRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: HoaPaths) -> Result<Self, HoaError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            invoices: InvoiceRepository::new(paths.invoices_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &HoaPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), HoaError> {
        self.invoices.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), HoaError> {
        self.invoices.save()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a newly created entity
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), HoaError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record a change, with a diff of the two snapshots
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), HoaError> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record a deleted entity
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), HoaError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
