//! Course display formatting
//!
//! Formats catalog courses as a fixed-width table or as one-line choices.

use crate::models::Course;

/// Width of the separator under the course table header
pub const COURSE_TABLE_RULE: usize = 70;

/// Format courses as a table with Code, Course Name, Department and Units columns
pub fn format_course_table(courses: &[Course]) -> String {
    if courses.is_empty() {
        return "No courses available.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10} {:<30} {:<20} {:<6}\n",
        "Code", "Course Name", "Department", "Units"
    ));
    output.push_str(&"-".repeat(COURSE_TABLE_RULE));
    output.push('\n');

    for course in courses {
        output.push_str(&format!(
            "{:<10} {:<30} {:<20} {:<6}\n",
            course.course_code, course.course_name, course.department, course.units
        ));
    }

    output
}

/// Format courses one per line as `CODE: name - department (N units)`
pub fn format_course_choices(courses: &[Course]) -> String {
    courses
        .iter()
        .map(|c| format!("{}\n", c))
        .collect()
}

/// Format a single course's details
pub fn format_course_details(course: &Course) -> String {
    let mut output = String::new();
    output.push_str(&format!("Course: {}\n", course.course_code));
    output.push_str(&format!("  Name:       {}\n", course.course_name));
    output.push_str(&format!("  Department: {}\n", course.department));
    output.push_str(&format!("  Units:      {}\n", course.units));
    output
}
