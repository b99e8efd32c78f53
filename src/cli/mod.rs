//! CLI command handlers
//!
//! This module contains the command handlers for the enrollment CLI,
//! translating parsed arguments into service calls and printed output.

pub mod course;
pub mod history;
pub mod student;

pub use course::{handle_course_command, CourseCommands};
pub use history::handle_history_command;
pub use student::{handle_student_command, StudentArgs, StudentCommands};
