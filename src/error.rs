//! Custom error types for the enrollment manager
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for enrollment operations
#[derive(Error, Debug)]
pub enum EnrollmentError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credentials did not match a stored student
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Student already holds an enrollment for the course
    #[error("Student {student_number} is already enrolled in {course_code}")]
    AlreadyEnrolled {
        student_number: String,
        course_code: String,
    },

    /// Storage errors (unreadable or malformed data files)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl EnrollmentError {
    /// Create a "not found" error for courses
    pub fn course_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Course",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for courses
    pub fn course_exists(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Course",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a conflict (duplicate course or enrollment)
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Duplicate { .. } | Self::AlreadyEnrolled { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for EnrollmentError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EnrollmentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for enrollment operations
pub type EnrollmentResult<T> = Result<T, EnrollmentError>;
