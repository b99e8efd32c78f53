//! Core data models
//!
//! This module contains the records persisted by the enrollment manager:
//! students, catalog courses, and enrollments linking the two.

pub mod course;
pub mod enrollment;
pub mod student;

pub use course::{Course, CourseValidationError};
pub use enrollment::{Enrollment, ENROLLMENT_DATE_FORMAT};
pub use student::{hash_password, validate_email, Student, EMAIL_DOMAIN};
