//! Service layer
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, existence checks, and cross-store joins.

pub mod auth;
pub mod course;
pub mod enrollment;

pub use auth::AuthService;
pub use course::{CourseChanges, CourseService, CourseUpdate, DeleteOutcome, NewCourse};
pub use enrollment::{EnrolledCourse, EnrollmentService, EnrollmentSummary};
