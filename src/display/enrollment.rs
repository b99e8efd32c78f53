//! Enrollment display formatting

use crate::models::Student;
use crate::services::EnrollmentSummary;

/// Format a student's enrolled courses with a units total
pub fn format_enrolled_courses(summary: &EnrollmentSummary) -> String {
    if summary.courses.is_empty() && summary.skipped == 0 {
        return "You are not enrolled in any courses yet.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10} {:<30} {:<20} {:<6} {:<20}\n",
        "Code", "Course Name", "Department", "Units", "Enrolled On"
    ));
    output.push_str(&"-".repeat(90));
    output.push('\n');

    for row in &summary.courses {
        output.push_str(&format!(
            "{:<10} {:<30} {:<20} {:<6} {:<20}\n",
            row.course.course_code,
            row.course.course_name,
            row.course.department,
            row.course.units,
            row.enrollment.formatted_date()
        ));
    }

    output.push_str(&"-".repeat(90));
    output.push('\n');
    output.push_str(&format!("Total Units: {}\n", summary.total_units));

    output
}

/// Header shown for a logged-in student
pub fn format_student_banner(student: &Student) -> String {
    format!(
        "Logged in as: {} ({})\nYear: {} | Degree: {}\n",
        student.name, student.student_number, student.year, student.degree
    )
}
