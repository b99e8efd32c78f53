//! Enrollment service
//!
//! Enrollments are append-only and grouped per student. Duplicate
//! enrollments are prevented by checking the student's list before insert.

use crate::audit::AuditEntry;
use crate::error::{EnrollmentError, EnrollmentResult};
use crate::models::{Course, Enrollment, Student};
use crate::storage::Storage;

/// One row of a student's enrolled-course listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledCourse {
    pub course: Course,
    pub enrollment: Enrollment,
}

/// A student's enrolled courses joined against the current catalog
#[derive(Debug, Clone, Default)]
pub struct EnrollmentSummary {
    /// Matched courses, in enrollment order
    pub courses: Vec<EnrolledCourse>,
    /// Sum of units over `courses`
    pub total_units: i64,
    /// Enrollments whose course is no longer in the catalog
    pub skipped: usize,
}

/// Service for student enrollments
pub struct EnrollmentService<'a> {
    storage: &'a Storage,
}

impl<'a> EnrollmentService<'a> {
    /// Create a new enrollment service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Enroll a student in a course
    pub fn enroll(&self, student: &Student, course_code: &str) -> EnrollmentResult<Enrollment> {
        let courses = self.storage.courses.load()?;
        let mut enrollments = self.storage.enrollments.load()?;

        let code = Course::normalize_code(course_code);
        let course = courses
            .get(&code)
            .ok_or_else(|| EnrollmentError::course_not_found(&code))?;

        let already = enrollments
            .get(&student.student_number)
            .iter()
            .any(|e| e.course_code == code);
        if already {
            return Err(EnrollmentError::AlreadyEnrolled {
                student_number: student.student_number.clone(),
                course_code: code,
            });
        }

        let enrollment = Enrollment::now(&student.student_number, &code);
        enrollments.push(enrollment.clone());
        self.storage.enrollments.save(&enrollments)?;

        self.storage.record(AuditEntry::enrolled(&enrollment, course));

        Ok(enrollment)
    }

    /// The student's enrollments in enrollment order
    pub fn enrollments_for(&self, student: &Student) -> EnrollmentResult<Vec<Enrollment>> {
        let enrollments = self.storage.enrollments.load()?;
        Ok(enrollments.get(&student.student_number).to_vec())
    }

    /// Catalog courses the student is not enrolled in, ordered by code
    pub fn available_courses(&self, student: &Student) -> EnrollmentResult<Vec<Course>> {
        let courses = self.storage.courses.load()?;
        let enrollments = self.storage.enrollments.load()?;
        let enrolled = enrollments.get(&student.student_number);

        let mut available: Vec<Course> = courses
            .iter()
            .filter(|c| !enrolled.iter().any(|e| e.course_code == c.course_code))
            .cloned()
            .collect();
        available.sort_by(|a, b| a.course_code.cmp(&b.course_code));
        Ok(available)
    }

    /// The student's enrolled courses with a units total
    ///
    /// Enrollments referring to courses no longer in the catalog are left
    /// out of both the rows and the total.
    pub fn my_courses(&self, student: &Student) -> EnrollmentResult<EnrollmentSummary> {
        let courses = self.storage.courses.load()?;
        let enrollments = self.storage.enrollments.load()?;

        let mut summary = EnrollmentSummary::default();
        for enrollment in enrollments.get(&student.student_number) {
            match courses.get(&enrollment.course_code) {
                Some(course) => {
                    summary.total_units += i64::from(course.units);
                    summary.courses.push(EnrolledCourse {
                        course: course.clone(),
                        enrollment: enrollment.clone(),
                    });
                }
                None => summary.skipped += 1,
            }
        }

        Ok(summary)
    }
}
