//! Storage layer
//!
//! Provides line-delimited JSON record stores for students, courses and
//! enrollments, plus the audit hook services call after a mutation.
//!
//! Stores are handles, not caches: every operation loads the file it needs,
//! mutates the owned copy, and rewrites the whole file.

pub mod file_io;
pub mod record_store;

pub use file_io::{read_json_lines, write_json_lines_atomic};
pub use record_store::{GroupedRecordStore, GroupedRecords, Record, RecordMap, RecordStore};

use std::cell::RefCell;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::EnrollmentPaths;
use crate::config::settings::Settings;
use crate::error::EnrollmentError;
use crate::models::{Course, Enrollment, Student};

/// Main storage coordinator that provides access to all stores
pub struct Storage {
    paths: EnrollmentPaths,
    pub students: RecordStore<Student>,
    pub courses: RecordStore<Course>,
    pub enrollments: GroupedRecordStore<Enrollment>,
    audit: AuditLogger,
    audit_enabled: bool,
    audit_warnings: RefCell<Vec<String>>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: EnrollmentPaths) -> Result<Self, EnrollmentError> {
        paths.ensure_directories()?;

        Ok(Self {
            students: RecordStore::new(paths.students_file()),
            courses: RecordStore::new(paths.courses_file()),
            enrollments: GroupedRecordStore::new(paths.enrollments_file()),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            audit_warnings: RefCell::new(Vec::new()),
            paths,
        })
    }

    /// Create a Storage instance honoring the user's settings
    pub fn with_settings(
        paths: EnrollmentPaths,
        settings: &Settings,
    ) -> Result<Self, EnrollmentError> {
        let mut storage = Self::new(paths)?;
        storage.audit_enabled = settings.audit_enabled;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &EnrollmentPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Whether mutations are being audited
    pub fn audit_enabled(&self) -> bool {
        self.audit_enabled
    }

    /// Append an entry for a change that has already been saved
    ///
    /// A failed append does not undo or fail the change. It is queued as a
    /// warning for `take_audit_warnings`.
    pub fn record(&self, entry: AuditEntry) {
        if !self.audit_enabled {
            return;
        }
        if let Err(e) = self.audit.log(&entry) {
            self.audit_warnings.borrow_mut().push(format!(
                "{} {} was saved but not written to the audit log: {}",
                entry.operation, entry.subject, e
            ));
        }
    }

    /// Drain the warnings queued by failed audit appends
    pub fn take_audit_warnings(&self) -> Vec<String> {
        self.audit_warnings.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnrollmentPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(
            storage.courses.path(),
            temp_dir.path().join("data").join("courses.txt")
        );
        assert!(storage.courses.load().unwrap().is_empty());
        assert_eq!(storage.enrollments.load().unwrap().record_count(), 0);
    }

    #[test]
    fn test_record_update_keeps_changes() {
        let (_temp_dir, storage) = create_test_storage();

        let before = Course::new("CS101", "Intro", "CS", 3);
        let mut after = before.clone();
        after.units = 4;

        storage.record(AuditEntry::course_updated(&before, &after));

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(entries[0].changes.as_deref(), Some("units: 3 -> 4"));
        assert!(storage.take_audit_warnings().is_empty());
    }

    #[test]
    fn test_audit_disabled_by_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnrollmentPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };
        let storage = Storage::with_settings(paths, &settings).unwrap();

        storage.record(AuditEntry::course_added(&Course::new("CS101", "Intro", "CS", 3)));

        assert!(!storage.audit_enabled());
        assert!(!storage.audit().path().exists());
    }

    #[test]
    fn test_unwritable_audit_log_becomes_warning() {
        let (_temp_dir, storage) = create_test_storage();
        fs::create_dir_all(storage.audit().path()).unwrap();

        storage.record(AuditEntry::course_added(&Course::new("CS101", "Intro", "CS", 3)));

        let warnings = storage.take_audit_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("CREATE Course CS101 was saved"));
        assert!(storage.take_audit_warnings().is_empty());
    }
}
