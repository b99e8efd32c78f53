//! Student CLI commands
//!
//! Every student command logs in first with the student number, school
//! email and password, then runs against that student.

use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::{format_course_table, format_enrolled_courses, format_student_banner};
use crate::error::{EnrollmentError, EnrollmentResult};
use crate::models::Student;
use crate::services::{AuthService, EnrollmentService};
use crate::storage::Storage;

/// Environment variable read for the password when `--password` is omitted
pub const PASSWORD_ENV: &str = "ENROLLMENT_PASSWORD";

/// Student login credentials plus the action to run
#[derive(Args)]
pub struct StudentArgs {
    /// Student number
    #[arg(short, long)]
    pub student_number: String,

    /// School email ([student_number]@domain)
    #[arg(short, long)]
    pub email: String,

    /// Password; prompted for when not given
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: StudentCommands,
}

/// Student subcommands
#[derive(Subcommand)]
pub enum StudentCommands {
    /// Show courses you are not yet enrolled in
    Available,
    /// Enroll in a course
    Enroll {
        /// Course code
        course_code: String,
    },
    /// Show your enrolled courses and total units
    #[command(alias = "my-courses")]
    Courses,
    /// Show who you are logged in as
    Whoami,
}

/// Handle a student command
pub fn handle_student_command(
    storage: &Storage,
    settings: &Settings,
    args: StudentArgs,
) -> EnrollmentResult<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };

    let student = AuthService::with_domain(storage, settings.email_domain.as_str()).login(
        &args.student_number,
        &args.email,
        &password,
    )?;

    run_as(storage, &student, args.command)
}

fn run_as(storage: &Storage, student: &Student, cmd: StudentCommands) -> EnrollmentResult<()> {
    let service = EnrollmentService::new(storage);

    match cmd {
        StudentCommands::Available => {
            let courses = service.available_courses(student)?;
            if courses.is_empty() {
                println!("You are already enrolled in all available courses.");
            } else {
                print!("{}", format_course_table(&courses));
            }
        }

        StudentCommands::Enroll { course_code } => {
            let enrollment = service.enroll(student, &course_code)?;
            println!("Successfully enrolled in {}!", enrollment.course_code);
        }

        StudentCommands::Courses => {
            print!("{}", format_student_banner(student));
            println!();
            let summary = service.my_courses(student)?;
            print!("{}", format_enrolled_courses(&summary));
        }

        StudentCommands::Whoami => {
            print!("{}", format_student_banner(student));
            println!("Email: {}", student.email);
        }
    }

    Ok(())
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> EnrollmentResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| EnrollmentError::Io(format!("Failed to read password: {}", e)))
}
