//! Path management for the enrollment manager
//!
//! ## Path Resolution Order
//!
//! 1. `ENROLLMENT_DATA_DIR` environment variable (if set)
//! 2. The current working directory
//!
//! Record files live in `<base>/data/`, next to `config.json` and `audit.log`
//! in `<base>/`.

use std::path::PathBuf;

use crate::error::EnrollmentError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "ENROLLMENT_DATA_DIR";

/// Manages all paths used by the enrollment manager
#[derive(Debug, Clone)]
pub struct EnrollmentPaths {
    /// Base directory for config, audit log and the data directory
    base_dir: PathBuf,
}

impl EnrollmentPaths {
    /// Create a new EnrollmentPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self, EnrollmentError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => std::env::current_dir().map_err(|e| {
                EnrollmentError::Config(format!("Could not determine working directory: {}", e))
            })?,
        };

        Ok(Self { base_dir })
    }

    /// Create EnrollmentPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to students.txt
    pub fn students_file(&self) -> PathBuf {
        self.data_dir().join("students.txt")
    }

    /// Get the path to courses.txt
    pub fn courses_file(&self) -> PathBuf {
        self.data_dir().join("courses.txt")
    }

    /// Get the path to enrollments.txt
    pub fn enrollments_file(&self) -> PathBuf {
        self.data_dir().join("enrollments.txt")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), EnrollmentError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| EnrollmentError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| EnrollmentError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}
