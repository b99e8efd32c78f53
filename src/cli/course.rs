//! Course CLI commands
//!
//! Implements CLI commands for course catalog management.

use std::io::{BufRead, Write};

use clap::Subcommand;

use crate::display::course::{format_course_choices, format_course_details, format_course_table};
use crate::error::{EnrollmentError, EnrollmentResult};
use crate::models::Course;
use crate::services::course::DELETE_CONFIRMATION;
use crate::services::{CourseChanges, CourseService, DeleteOutcome, NewCourse};
use crate::storage::Storage;

/// Course subcommands
#[derive(Subcommand)]
pub enum CourseCommands {
    /// List all courses ordered by code
    List {
        /// One line per course instead of a table
        #[arg(short, long)]
        brief: bool,
    },
    /// Add a new course
    Add {
        /// Course code (stored upper-case)
        code: String,
        /// Course name
        #[arg(short, long, default_value = "")]
        name: String,
        /// Department
        #[arg(short, long, default_value = "")]
        department: String,
        /// Units (integer)
        #[arg(short, long, allow_hyphen_values = true)]
        units: String,
    },
    /// Update an existing course; omitted or empty values are kept
    Update {
        /// Course code
        code: String,
        /// New course name
        #[arg(short, long)]
        name: Option<String>,
        /// New department
        #[arg(short, long)]
        department: Option<String>,
        /// New units (integer)
        #[arg(short, long, allow_hyphen_values = true)]
        units: Option<String>,
    },
    /// Delete a course
    Delete {
        /// Course code
        code: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Search courses by code, name or department
    Search {
        /// Keyword (case-insensitive substring)
        keyword: String,
    },
}

/// Handle a course command
pub fn handle_course_command(storage: &Storage, cmd: CourseCommands) -> EnrollmentResult<()> {
    let service = CourseService::new(storage);

    match cmd {
        CourseCommands::List { brief } => {
            let courses = service.list()?;
            if brief {
                print!("{}", format_course_choices(&courses));
            } else {
                print!("{}", format_course_table(&courses));
            }
        }

        CourseCommands::Add {
            code,
            name,
            department,
            units,
        } => {
            let course = service.add(NewCourse {
                course_code: &code,
                course_name: &name,
                department: &department,
                units: &units,
            })?;

            println!("Course {} added successfully!", course.course_code);
            print!("{}", format_course_details(&course));
        }

        CourseCommands::Update {
            code,
            name,
            department,
            units,
        } => {
            let result = service.update(
                &code,
                CourseChanges {
                    course_name: name.as_deref(),
                    department: department.as_deref(),
                    units: units.as_deref(),
                },
            )?;

            for warning in &result.warnings {
                println!("Warning: {}", warning);
            }
            if result.changed {
                println!("Course {} updated successfully!", result.course.course_code);
            } else {
                println!("No changes for course {}.", result.course.course_code);
            }
            print!("{}", format_course_details(&result.course));
        }

        CourseCommands::Delete { code, yes } => {
            let confirmation = if yes {
                DELETE_CONFIRMATION.to_string()
            } else {
                let course = service.get(&code)?.ok_or_else(|| {
                    EnrollmentError::course_not_found(Course::normalize_code(&code))
                })?;
                prompt_confirmation(&format!(
                    "Are you sure you want to delete {}? (yes/no): ",
                    course
                ))?
            };

            match service.delete(&code, &confirmation)? {
                DeleteOutcome::Deleted(course) => {
                    println!("Course {} deleted successfully!", course.course_code)
                }
                DeleteOutcome::Cancelled => println!("Deletion cancelled."),
            }
        }

        CourseCommands::Search { keyword } => {
            let results = service.search(&keyword)?;
            if results.is_empty() {
                println!("No courses matched your search.");
            } else {
                print!("{}", format_course_table(&results));
            }
        }
    }

    Ok(())
}

/// Read one line of confirmation from stdin
fn prompt_confirmation(prompt: &str) -> EnrollmentResult<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer)
}
