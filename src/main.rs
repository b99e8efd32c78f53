use anyhow::Result;
use clap::{Parser, Subcommand};

use enrollment::cli::{
    handle_course_command, handle_history_command, handle_student_command, CourseCommands,
    StudentArgs,
};
use enrollment::config::{paths::EnrollmentPaths, settings::Settings};
use enrollment::storage::Storage;

#[derive(Parser)]
#[command(
    name = "enroll",
    version,
    about = "Console course catalog and student enrollment manager",
    long_about = "Maintain a catalog of courses and let students log in with their \
                  student number, school email and password to enroll in courses \
                  and review their total units."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Course catalog management commands
    #[command(subcommand)]
    Course(CourseCommands),

    /// Log in as a student and browse or enroll
    Student(StudentArgs),

    /// Show recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write the effective settings to config.json
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = EnrollmentPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::with_settings(paths.clone(), &settings)?;

    match cli.command {
        Some(Commands::Course(cmd)) => {
            handle_course_command(&storage, cmd)?;
            report_audit_warnings(&storage);
        }
        Some(Commands::Student(args)) => {
            handle_student_command(&storage, &settings, args)?;
            report_audit_warnings(&storage);
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&storage, limit)?;
        }
        Some(Commands::Config { write }) => {
            if write {
                settings.save(&paths)?;
                println!("Settings written to {}", paths.settings_file().display());
                println!();
            }
            println!("Enrollment Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Schema version: {}", settings.schema_version);
            println!("  Email domain:   {}", settings.email_domain);
            println!("  Audit enabled:  {}", settings.audit_enabled);
        }
        None => {
            println!("Enrollment CLI - course catalog and student enrollment");
            println!();
            println!("Run 'enroll --help' for usage information.");
            println!("Run 'enroll course list' to see the course catalog.");
        }
    }

    Ok(())
}

/// Print audit appends that failed after their change was saved
fn report_audit_warnings(storage: &Storage) {
    for warning in storage.take_audit_warnings() {
        eprintln!("Warning: {}", warning);
    }
}
