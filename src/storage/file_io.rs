//! File I/O utilities with atomic writes
//!
//! Blobs are written to a temp file in the same directory and renamed into
//! place, so a crash never leaves a half-written file behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FlowError;

/// Read JSON from a file, returning `None` if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<Option<T>, FlowError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| FlowError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| FlowError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FlowError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = stage_json(path, data)?;
    commit_staged(&temp_path, path)
}

/// Write several JSON files as one unit
///
/// Every file is staged to a temp file first. If any staging step fails,
/// the staged files are removed and no target is touched. Targets are only
/// renamed into place once all of them have been staged.
pub fn write_json_batch<T>(files: &[(PathBuf, &T)]) -> Result<(), FlowError>
where
    T: Serialize + ?Sized,
{
    let mut staged = Vec::with_capacity(files.len());
    for (path, data) in files {
        match stage_json(path, *data) {
            Ok(temp_path) => staged.push((temp_path, path)),
            Err(e) => {
                for (temp_path, _) in &staged {
                    let _ = fs::remove_file(temp_path);
                }
                return Err(e);
            }
        }
    }

    let mut staged = staged.into_iter();
    while let Some((temp_path, path)) = staged.next() {
        if let Err(e) = commit_staged(&temp_path, path) {
            for (temp_path, _) in staged {
                let _ = fs::remove_file(temp_path);
            }
            return Err(e);
        }
    }
    Ok(())
}

/// Serialize to a synced temp file next to `path`, returning the temp path
fn stage_json<T>(path: &Path, data: &T) -> Result<PathBuf, FlowError>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FlowError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FlowError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| FlowError::Storage(format!("Failed to serialize data: {}", e)))
        .and_then(|_| {
            writer
                .flush()
                .map_err(|e| FlowError::Storage(format!("Failed to flush data: {}", e)))
        })
        .and_then(|_| {
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| FlowError::Storage(format!("Failed to sync data: {}", e)))
        });

    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(temp_path)
}

fn commit_staged(temp_path: &Path, path: &Path) -> Result<(), FlowError> {
    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        FlowError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

/// Check if a JSON file exists and parses
pub fn json_file_valid<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if !path.exists() {
        return false;
    }

    if let Ok(file) = File::open(path) {
        let reader = BufReader::new(file);
        serde_json::from_reader::<_, serde_json::Value>(reader).is_ok()
    } else {
        false
    }
}
