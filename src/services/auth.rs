//! Authentication service
//!
//! Checks a claimed student identity against the student store. The email
//! format is checked before any lookup; credentials must then match exactly.

use crate::error::{EnrollmentError, EnrollmentResult};
use crate::models::student::{expected_email, validate_email_for_domain, EMAIL_DOMAIN};
use crate::models::Student;
use crate::storage::Storage;

/// Service for student authentication
pub struct AuthService<'a> {
    storage: &'a Storage,
    email_domain: String,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service using the default email domain
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_domain(storage, EMAIL_DOMAIN)
    }

    /// Create a new auth service for a specific email domain
    pub fn with_domain(storage: &'a Storage, email_domain: impl Into<String>) -> Self {
        Self {
            storage,
            email_domain: email_domain.into(),
        }
    }

    /// Check that `email` is `<student_number>@<domain>`
    pub fn validate_email(&self, email: &str, student_number: &str) -> bool {
        validate_email_for_domain(email, student_number, &self.email_domain)
    }

    /// Look up a student and check their email and password
    ///
    /// Returns `None` if the student is unknown, the stored email differs, or
    /// the password hash doesn't match.
    pub fn authenticate(
        &self,
        student_number: &str,
        email: &str,
        password: &str,
    ) -> EnrollmentResult<Option<Student>> {
        let mut students = self.storage.students.load()?;

        let matched = students
            .get(student_number)
            .is_some_and(|s| s.email == email && s.verify_password(password));

        Ok(if matched {
            students.remove(student_number)
        } else {
            None
        })
    }

    /// Validate the email format, then authenticate
    ///
    /// Leading and trailing whitespace is stripped from all three inputs.
    pub fn login(
        &self,
        student_number: &str,
        email: &str,
        password: &str,
    ) -> EnrollmentResult<Student> {
        let (student_number, email, password) =
            (student_number.trim(), email.trim(), password.trim());

        if !self.validate_email(email, student_number) {
            return Err(EnrollmentError::Validation(format!(
                "Email must be in format [student_number]@{}; expected {}",
                self.email_domain,
                expected_email(student_number, &self.email_domain)
            )));
        }

        self.authenticate(student_number, email, password)?
            .ok_or_else(|| EnrollmentError::Authentication("Invalid credentials".into()))
    }
}
