//! Audit history command

use crate::error::EnrollmentResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_history_command(storage: &Storage, limit: usize) -> EnrollmentResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        if storage.audit_enabled() {
            println!("No audit entries.");
        } else {
            println!("No audit entries. Audit logging is disabled in config.json.");
        }
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry);
    }

    Ok(())
}
