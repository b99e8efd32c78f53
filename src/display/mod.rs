//! Display formatting for terminal output
//!
//! Provides fixed-width table formatting for courses and enrollments.

pub mod course;
pub mod enrollment;

pub use course::{format_course_choices, format_course_details, format_course_table};
pub use enrollment::{format_enrolled_courses, format_student_banner};
