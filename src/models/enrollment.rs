//! Enrollment model
//!
//! Links one student to one course with the local time of enrollment. The
//! enrollment store groups these by student number.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::storage::Record;

/// On-disk format of `enrollment_date`
pub const ENROLLMENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A student's enrollment in a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Enrolled student
    pub student_number: String,

    /// Course enrolled in
    pub course_code: String,

    /// When the enrollment was made (local time, whole seconds)
    #[serde(with = "enrollment_date")]
    pub enrollment_date: NaiveDateTime,
}

impl Enrollment {
    /// Create an enrollment at a given time
    pub fn new(
        student_number: impl Into<String>,
        course_code: impl Into<String>,
        enrollment_date: NaiveDateTime,
    ) -> Self {
        Self {
            student_number: student_number.into(),
            course_code: course_code.into(),
            enrollment_date: enrollment_date.with_nanosecond(0).unwrap_or(enrollment_date),
        }
    }

    /// Create an enrollment stamped with the current local time
    pub fn now(student_number: impl Into<String>, course_code: impl Into<String>) -> Self {
        Self::new(student_number, course_code, Local::now().naive_local())
    }

    /// The enrollment date as stored on disk
    pub fn formatted_date(&self) -> String {
        self.enrollment_date
            .format(ENROLLMENT_DATE_FORMAT)
            .to_string()
    }
}

impl Record for Enrollment {
    fn key(&self) -> &str {
        &self.student_number
    }
}

mod enrollment_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ENROLLMENT_DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(ENROLLMENT_DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, ENROLLMENT_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
