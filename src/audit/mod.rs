//! Audit logging for FinanceFlow
//!
//! Every create, update and delete of persisted state is appended to
//! `audit.log` as one JSON line, with before/after snapshots and a short
//! field diff for updates.
//!
//! ```rust,ignore
//! use financeflow::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::Goal,
//!     goal.id.to_string(),
//!     Some(goal.name.clone()),
//!     &goal,
//! ))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
