//! Audit log entries
//!
//! An entry records one committed change to the catalog or to a student's
//! enrollments. Constructors take the domain records directly.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::generate_diff;
use crate::models::{Course, Enrollment};

/// Kind of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// The record a change applied to, identified by its keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AuditSubject {
    Course {
        course_code: String,
    },
    Enrollment {
        student_number: String,
        course_code: String,
    },
}

impl AuditSubject {
    /// The course code involved, for either kind of subject
    pub fn course_code(&self) -> &str {
        match self {
            AuditSubject::Course { course_code } => course_code,
            AuditSubject::Enrollment { course_code, .. } => course_code,
        }
    }
}

impl From<&Course> for AuditSubject {
    fn from(course: &Course) -> Self {
        AuditSubject::Course {
            course_code: course.course_code.clone(),
        }
    }
}

impl From<&Enrollment> for AuditSubject {
    fn from(enrollment: &Enrollment) -> Self {
        AuditSubject::Enrollment {
            student_number: enrollment.student_number.clone(),
            course_code: enrollment.course_code.clone(),
        }
    }
}

impl fmt::Display for AuditSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditSubject::Course { course_code } => write!(f, "Course {}", course_code),
            AuditSubject::Enrollment {
                student_number,
                course_code,
            } => write!(f, "Enrollment {}/{}", student_number, course_code),
        }
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the change was committed (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub subject: AuditSubject,

    /// Course name at the time of the change
    pub course_name: String,

    /// Record as it was before an update or delete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    /// Record as written by a create or update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// Changed fields of an update, e.g. `units: 3 -> 4`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, subject: AuditSubject, course_name: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            subject,
            course_name: course_name.to_string(),
            before: None,
            after: None,
            changes: None,
        }
    }

    /// A course was added to the catalog
    pub fn course_added(course: &Course) -> Self {
        Self {
            after: serde_json::to_value(course).ok(),
            ..Self::new(Operation::Create, course.into(), &course.course_name)
        }
    }

    /// A catalog course was edited
    pub fn course_updated(before: &Course, after: &Course) -> Self {
        let before_value = serde_json::to_value(before).ok();
        let after_value = serde_json::to_value(after).ok();
        let changes = match (&before_value, &after_value) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };

        Self {
            before: before_value,
            after: after_value,
            changes,
            ..Self::new(Operation::Update, after.into(), &after.course_name)
        }
    }

    /// A course was removed from the catalog
    pub fn course_deleted(course: &Course) -> Self {
        Self {
            before: serde_json::to_value(course).ok(),
            ..Self::new(Operation::Delete, course.into(), &course.course_name)
        }
    }

    /// A student enrolled in `course`
    pub fn enrolled(enrollment: &Enrollment, course: &Course) -> Self {
        Self {
            after: serde_json::to_value(enrollment).ok(),
            ..Self::new(Operation::Create, enrollment.into(), &course.course_name)
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.subject,
            self.course_name
        )?;

        if let Some(changes) = &self.changes {
            write!(f, "\n  Changes: {}", changes)?;
        }

        Ok(())
    }
}
