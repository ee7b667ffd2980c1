//! Backup manager for FinanceFlow
//!
//! Backups are dated JSON archives holding every persisted blob, written to
//! the backup directory and pruned by the retention policy.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::settings::BackupRetention;
use crate::error::{FlowError, FlowResult};
use crate::storage::Storage;

pub const BACKUP_SCHEMA_VERSION: u32 = 1;

/// Metadata about a backup file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// Taken on the first day of a month; kept under the monthly quota
    pub is_monthly: bool,
}

/// On-disk backup format
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupArchive {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    /// Persisted blobs by storage key
    pub blobs: BTreeMap<String, serde_json::Value>,
}

/// Manages backup creation, retention and restore
pub struct BackupManager {
    backup_dir: PathBuf,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(backup_dir: PathBuf, retention: BackupRetention) -> Self {
        Self {
            backup_dir,
            retention,
        }
    }

    /// Persist the current state and write it to a new backup file
    pub fn create_backup(&self, storage: &Storage) -> FlowResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| FlowError::Io(format!("Failed to create backup directory: {}", e)))?;

        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        let archive = BackupArchive {
            schema_version: BACKUP_SCHEMA_VERSION,
            created_at: now,
            blobs: storage.persisted_blobs()?,
        };

        let json = serde_json::to_string_pretty(&archive)
            .map_err(|e| FlowError::Json(format!("Failed to serialize backup: {}", e)))?;

        fs::write(&backup_path, json)
            .map_err(|e| FlowError::Io(format!("Failed to write backup file: {}", e)))?;

        info!(path = %backup_path.display(), "Backup created");
        Ok(backup_path)
    }

    /// Create a backup and then enforce the retention policy
    pub fn create_backup_with_retention(
        &self,
        storage: &Storage,
    ) -> FlowResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup(storage)?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    /// All backups, newest first
    pub fn list_backups(&self) -> FlowResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| FlowError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| FlowError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(backups)
    }

    /// Delete backups beyond the daily and monthly quotas
    pub fn enforce_retention(&self) -> FlowResult<Vec<PathBuf>> {
        let (monthly, daily): (Vec<_>, Vec<_>) = self
            .list_backups()?
            .into_iter()
            .partition(|b| b.is_monthly);

        let expired = daily
            .into_iter()
            .skip(self.retention.daily_count as usize)
            .chain(monthly.into_iter().skip(self.retention.monthly_count as usize));

        let mut deleted = Vec::new();
        for backup in expired {
            fs::remove_file(&backup.path)
                .map_err(|e| FlowError::Io(format!("Failed to delete old backup: {}", e)))?;
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    pub fn get_latest_backup(&self) -> FlowResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    /// Resolve a backup by filename within the backup directory, or by path
    pub fn resolve(&self, reference: &str) -> FlowResult<PathBuf> {
        let in_dir = self.backup_dir.join(reference);
        if in_dir.is_file() {
            return Ok(in_dir);
        }
        let as_path = PathBuf::from(reference);
        if as_path.is_file() {
            return Ok(as_path);
        }
        Err(FlowError::NotFound {
            entity_type: "Backup",
            identifier: reference.to_string(),
        })
    }

    /// Overwrite the current state with a backup's contents. Returns the
    /// number of stores restored.
    pub fn restore(&self, storage: &Storage, backup_path: &Path) -> FlowResult<usize> {
        let contents = fs::read_to_string(backup_path)
            .map_err(|e| FlowError::Io(format!("Failed to read backup file: {}", e)))?;

        let archive: BackupArchive = serde_json::from_str(&contents)
            .map_err(|e| FlowError::Json(format!("Failed to parse backup file: {}", e)))?;

        if archive.schema_version > BACKUP_SCHEMA_VERSION {
            return Err(FlowError::Storage(format!(
                "Backup schema version {} is newer than supported version {}",
                archive.schema_version, BACKUP_SCHEMA_VERSION
            )));
        }

        storage.restore_blobs(&archive.blobs)?;
        info!(path = %backup_path.display(), stores = archive.blobs.len(), "Backup restored");
        Ok(archive.blobs.len())
    }

    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let date_part = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(date_part)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_monthly: created_at.day() == 1,
    })
}

/// Parse `YYYYMMDD-HHMMSS-mmm` (milliseconds optional)
fn parse_backup_timestamp(date_str: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = date_str.split('-').collect();
    let (date_part, time_part, millis) = match parts.as_slice() {
        [date, time] => (*date, *time, 0),
        [date, time, millis] => (*date, *time, millis.parse().ok()?),
        _ => return None,
    };

    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(
        date_part[0..4].parse().ok()?,
        date_part[4..6].parse().ok()?,
        date_part[6..8].parse().ok()?,
    )?;
    let time = chrono::NaiveTime::from_hms_milli_opt(
        time_part[0..2].parse().ok()?,
        time_part[2..4].parse().ok()?,
        time_part[4..6].parse().ok()?,
        millis,
    )?;

    Some(DateTime::from_naive_utc_and_offset(
        chrono::NaiveDateTime::new(date, time),
        Utc,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FlowPaths;
    use crate::models::Money;
    use tempfile::TempDir;

    fn setup() -> (BackupManager, Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();

        let retention = BackupRetention {
            daily_count: 3,
            monthly_count: 3,
        };
        (
            BackupManager::new(paths.backup_dir(), retention),
            storage,
            temp_dir,
        )
    }

    fn pause() {
        std::thread::sleep(std::time::Duration::from_millis(15));
    }

    #[test]
    fn test_create_backup_contains_every_store() {
        let (manager, storage, _temp) = setup();
        storage.bank.set(Money::from_dollars(880)).unwrap();

        let backup_path = manager.create_backup(&storage).unwrap();
        assert!(backup_path.exists());

        let contents = fs::read_to_string(&backup_path).unwrap();
        let archive: BackupArchive = serde_json::from_str(&contents).unwrap();
        assert_eq!(archive.schema_version, BACKUP_SCHEMA_VERSION);
        assert_eq!(archive.blobs.len(), 6);
        assert_eq!(archive.blobs["bank"]["bank_balance"], 88000);
    }

    #[test]
    fn test_list_backups_newest_first() {
        let (manager, storage, _temp) = setup();
        assert!(manager.list_backups().unwrap().is_empty());

        manager.create_backup(&storage).unwrap();
        pause();
        let latest = manager.create_backup(&storage).unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert!(backups[0].created_at >= backups[1].created_at);
        assert_eq!(manager.get_latest_backup().unwrap().unwrap().path, latest);
    }

    #[test]
    fn test_retention_policy() {
        let (manager, storage, _temp) = setup();
        for _ in 0..5 {
            manager.create_backup(&storage).unwrap();
            pause();
        }

        let deleted = manager.enforce_retention().unwrap();
        assert_eq!(deleted.len(), 2);
        assert_eq!(manager.list_backups().unwrap().len(), 3);

        let (new_backup, _) = manager.create_backup_with_retention(&storage).unwrap();
        assert!(new_backup.exists());
        assert_eq!(manager.list_backups().unwrap().len(), 3);
    }

    #[test]
    fn test_restore_round_trip() {
        let (manager, storage, _temp) = setup();
        storage.bank.set(Money::from_dollars(100)).unwrap();
        let backup_path = manager.create_backup(&storage).unwrap();

        storage.bank.set(Money::from_dollars(5)).unwrap();
        storage.bank.save().unwrap();

        let reference = backup_path.file_name().unwrap().to_string_lossy().to_string();
        let resolved = manager.resolve(&reference).unwrap();
        assert_eq!(manager.restore(&storage, &resolved).unwrap(), 6);
        assert_eq!(storage.bank.balance().unwrap(), Money::from_dollars(100));

        assert!(manager.resolve("backup-missing.json").unwrap_err().is_not_found());
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let timestamp = parse_backup_timestamp("20251127-143022").unwrap();
        assert_eq!(timestamp.year(), 2025);
        assert_eq!(timestamp.month(), 11);
        assert_eq!(timestamp.day(), 27);

        let timestamp = parse_backup_timestamp("20251127-143022-456").unwrap();
        assert_eq!(timestamp.timestamp_subsec_millis(), 456);

        assert!(parse_backup_timestamp("2025-11").is_none());
        assert!(parse_backup_timestamp("20251327-143022").is_none());
    }
}
