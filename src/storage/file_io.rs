//! Line-delimited JSON file I/O with atomic rewrites
//!
//! Each record file holds one compact JSON object per line. Reads tolerate a
//! missing file and blank lines; writes replace the whole file through a
//! temporary sibling and a rename.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::EnrollmentError;

/// Read every record from a line-delimited JSON file
///
/// Returns an empty list if the file doesn't exist. A line that fails to parse
/// is a storage error naming the file and line number.
pub fn read_json_lines<T, P>(path: P) -> Result<Vec<T>, EnrollmentError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|e| {
        EnrollmentError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            EnrollmentError::Storage(format!(
                "Failed to read {} line {}: {}",
                path.display(),
                line_num + 1,
                e
            ))
        })?;

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record = serde_json::from_str(line).map_err(|e| {
            EnrollmentError::Storage(format!(
                "Failed to parse {} line {}: {}",
                path.display(),
                line_num + 1,
                e
            ))
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Rewrite a line-delimited JSON file atomically (write to temp, then rename)
///
/// The file ends up holding exactly `records`, one per line, in order.
pub fn write_json_lines_atomic<'a, T, I, P>(path: P, records: I) -> Result<(), EnrollmentError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            EnrollmentError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| EnrollmentError::Storage(format!("Failed to create temp file: {}", e)))?;

    let result = write_records(file, records).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| EnrollmentError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

/// Write one JSON line per record, then flush and sync
fn write_records<'a, T, I>(file: File, records: I) -> Result<(), EnrollmentError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)
            .map_err(|e| EnrollmentError::Storage(format!("Failed to serialize record: {}", e)))?;
        writer
            .write_all(b"\n")
            .map_err(|e| EnrollmentError::Storage(format!("Failed to write record: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| EnrollmentError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| EnrollmentError::Storage(format!("Failed to sync data: {}", e)))
}

/// `students.txt` -> `students.txt.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
