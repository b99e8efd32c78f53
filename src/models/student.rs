//! Student model
//!
//! Students are produced by an external seeding step and only read here.
//! Passwords are stored as an unsalted SHA-256 hex digest under the JSON key
//! `password`, which keeps existing data files readable. Identical passwords
//! therefore produce identical stored hashes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::storage::Record;

/// Domain every student email must use
pub const EMAIL_DOMAIN: &str = "mocku.edu.ph";

/// A student who can log in and enroll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Student number (primary key)
    pub student_number: String,

    /// Full name
    pub name: String,

    /// Year level, e.g. "3rd Year"
    pub year: String,

    /// Degree program, e.g. "BS Computer Science"
    pub degree: String,

    /// Login email, `<student_number>@<domain>`
    pub email: String,

    /// Hex-encoded SHA-256 of the password
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl Student {
    /// Create a student with the default email and a hashed password
    pub fn new(
        student_number: impl Into<String>,
        name: impl Into<String>,
        year: impl Into<String>,
        degree: impl Into<String>,
        password: &str,
    ) -> Self {
        let student_number = student_number.into();
        Self {
            email: expected_email(&student_number, EMAIL_DOMAIN),
            student_number,
            name: name.into(),
            year: year.into(),
            degree: degree.into(),
            password_hash: hash_password(password),
        }
    }

    /// Check a plaintext password against the stored hash
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash == hash_password(password)
    }
}

impl Record for Student {
    fn key(&self) -> &str {
        &self.student_number
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.student_number)
    }
}

/// Hash a password the way stored credentials are hashed
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// The email a student number must log in with under `domain`
pub fn expected_email(student_number: &str, domain: &str) -> String {
    format!("{}@{}", student_number, domain)
}

/// True iff `email` is exactly `<student_number>@mocku.edu.ph`
pub fn validate_email(email: &str, student_number: &str) -> bool {
    validate_email_for_domain(email, student_number, EMAIL_DOMAIN)
}

/// True iff `email` is exactly `<student_number>@<domain>`
pub fn validate_email_for_domain(email: &str, student_number: &str, domain: &str) -> bool {
    email == expected_email(student_number, domain)
}
