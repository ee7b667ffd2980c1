//! Audit log command

use crate::error::FlowResult;
use crate::storage::Storage;

/// Print the newest `count` audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, count: usize) -> FlowResult<()> {
    let Some(logger) = storage.audit_logger() else {
        println!("Audit logging is not enabled for this storage.");
        return Ok(());
    };

    let entries = logger.read_recent(count)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    println!();
    println!("Log file: {}", logger.path().display());

    Ok(())
}
