//! Audit log CLI command

use crate::error::HoaResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, limit: usize) -> HoaResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    let total = storage.audit().entry_count()?;
    if total > entries.len() {
        println!();
        println!(
            "Showing {} of {} entries (log: {})",
            entries.len(),
            total,
            storage.audit().path().display()
        );
    }

    Ok(())
}
