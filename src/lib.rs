//! Enrollment CLI - console course catalog and student enrollment manager
//!
//! This library provides the core functionality for the `enroll` binary.
//! An administrator maintains a catalog of courses; students log in with
//! their student number, school email and password to browse the catalog,
//! enroll in courses and review their total units.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and settings
//! - `error`: Custom error types
//! - `models`: Core data models (students, courses, enrollments)
//! - `storage`: JSON-lines file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging of catalog and enrollment changes
//! - `display`: Fixed-width terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use enrollment::config::{paths::EnrollmentPaths, settings::Settings};
//! use enrollment::services::CourseService;
//! use enrollment::storage::Storage;
//!
//! let paths = EnrollmentPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::with_settings(paths, &settings)?;
//! let courses = CourseService::new(&storage).list()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::EnrollmentError;
