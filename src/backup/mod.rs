//! Backups for FinanceFlow
//!
//! A backup is one JSON file holding every persisted blob:
//!
//! - `schema_version`: version for migration support
//! - `created_at`: when the backup was taken
//! - `blobs`: the `budget`, `want_wallet`, `goals`, `achievements`, `bank`
//!   and `income` stores, keyed by name
//!
//! The retention policy keeps a number of daily backups plus a number of
//! monthly ones (taken on the first of the month), 30 and 12 by default.

mod manager;

pub use manager::{BackupArchive, BackupInfo, BackupManager, BACKUP_SCHEMA_VERSION};
