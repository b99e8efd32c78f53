//! Course model
//!
//! A course in the catalog. Course codes are stored upper-cased and are the
//! primary key of the course store.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::storage::Record;

/// A catalog course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code, upper-cased (primary key)
    pub course_code: String,

    /// Descriptive course name
    pub course_name: String,

    /// Owning department
    pub department: String,

    /// Credit units
    pub units: i32,
}

impl Course {
    /// Create a new course, normalizing the code
    pub fn new(
        course_code: &str,
        course_name: impl Into<String>,
        department: impl Into<String>,
        units: i32,
    ) -> Self {
        Self {
            course_code: Self::normalize_code(course_code),
            course_name: course_name.into(),
            department: department.into(),
            units,
        }
    }

    /// Normalize a course code for lookup and storage
    pub fn normalize_code(code: &str) -> String {
        code.trim().to_uppercase()
    }

    /// Parse a units value entered as text
    pub fn parse_units(input: &str) -> Result<i32, CourseValidationError> {
        input
            .trim()
            .parse()
            .map_err(|_| CourseValidationError::InvalidUnits(input.trim().to_string()))
    }

    /// Case-insensitive substring match against code, name or department
    ///
    /// `keyword` must already be lower-cased.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.course_code.to_lowercase().contains(keyword)
            || self.course_name.to_lowercase().contains(keyword)
            || self.department.to_lowercase().contains(keyword)
    }

    /// Validate the course
    pub fn validate(&self) -> Result<(), CourseValidationError> {
        if self.course_code.is_empty() {
            return Err(CourseValidationError::EmptyCode);
        }

        Ok(())
    }
}

impl Record for Course {
    fn key(&self) -> &str {
        &self.course_code
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} - {} ({} units)",
            self.course_code, self.course_name, self.department, self.units
        )
    }
}

/// Validation errors for courses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseValidationError {
    EmptyCode,
    InvalidUnits(String),
}

impl fmt::Display for CourseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "Course code cannot be empty"),
            Self::InvalidUnits(value) => {
                write!(f, "Units must be a number (got '{}')", value)
            }
        }
    }
}

impl std::error::Error for CourseValidationError {}
