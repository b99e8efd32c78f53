//! Course catalog service
//!
//! Provides add/update/delete/list/search over the course store. Each
//! operation loads the catalog, validates, mutates and rewrites the file.
//! Failed operations leave the file untouched.

use crate::audit::AuditEntry;
use crate::error::{EnrollmentError, EnrollmentResult};
use crate::models::Course;
use crate::storage::Storage;

/// Token that confirms a deletion (compared case-insensitively)
pub const DELETE_CONFIRMATION: &str = "yes";

/// Raw input for a new course
#[derive(Debug, Clone, Default)]
pub struct NewCourse<'i> {
    pub course_code: &'i str,
    pub course_name: &'i str,
    pub department: &'i str,
    /// Units as entered; must parse as an integer
    pub units: &'i str,
}

/// Raw replacement values for an existing course
///
/// `None` or an empty string leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct CourseChanges<'i> {
    pub course_name: Option<&'i str>,
    pub department: Option<&'i str>,
    pub units: Option<&'i str>,
}

/// Result of an update
#[derive(Debug, Clone)]
pub struct CourseUpdate {
    /// The course as saved
    pub course: Course,
    /// Whether any field actually changed
    pub changed: bool,
    /// Problems with individual fields that were skipped
    pub warnings: Vec<String>,
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The course was removed
    Deleted(Course),
    /// Confirmation was not given; nothing changed
    Cancelled,
}

/// Service for course catalog management
pub struct CourseService<'a> {
    storage: &'a Storage,
}

impl<'a> CourseService<'a> {
    /// Create a new course service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new course
    pub fn add(&self, input: NewCourse<'_>) -> EnrollmentResult<Course> {
        let mut courses = self.storage.courses.load()?;

        let code = Course::normalize_code(input.course_code);
        if courses.contains_key(&code) {
            return Err(EnrollmentError::course_exists(code));
        }

        let units = Course::parse_units(input.units)
            .map_err(|e| EnrollmentError::Validation(e.to_string()))?;

        let course = Course::new(&code, input.course_name.trim(), input.department.trim(), units);
        course
            .validate()
            .map_err(|e| EnrollmentError::Validation(e.to_string()))?;

        courses.insert(course.clone());
        self.storage.courses.save(&courses)?;

        self.storage.record(AuditEntry::course_added(&course));

        Ok(course)
    }

    /// Update fields of an existing course
    ///
    /// A units value that isn't an integer is reported in `warnings` and the
    /// previous units are kept; the other fields are still applied.
    pub fn update(
        &self,
        course_code: &str,
        changes: CourseChanges<'_>,
    ) -> EnrollmentResult<CourseUpdate> {
        let mut courses = self.storage.courses.load()?;

        let code = Course::normalize_code(course_code);
        let course = courses
            .get_mut(&code)
            .ok_or_else(|| EnrollmentError::course_not_found(&code))?;

        let before = course.clone();
        let mut warnings = Vec::new();

        if let Some(name) = non_empty(changes.course_name) {
            course.course_name = name.to_string();
        }
        if let Some(department) = non_empty(changes.department) {
            course.department = department.to_string();
        }
        if let Some(units) = non_empty(changes.units) {
            match Course::parse_units(units) {
                Ok(units) => course.units = units,
                Err(e) => warnings.push(format!("{}; keeping {} units", e, before.units)),
            }
        }

        let after = course.clone();
        self.storage.courses.save(&courses)?;

        let changed = before != after;
        if changed {
            self.storage.record(AuditEntry::course_updated(&before, &after));
        }

        Ok(CourseUpdate {
            course: after,
            changed,
            warnings,
        })
    }

    /// Delete a course after confirmation
    ///
    /// The course must exist. Anything other than `yes` as `confirmation`
    /// cancels the deletion.
    pub fn delete(
        &self,
        course_code: &str,
        confirmation: &str,
    ) -> EnrollmentResult<DeleteOutcome> {
        let mut courses = self.storage.courses.load()?;

        let code = Course::normalize_code(course_code);
        if !courses.contains_key(&code) {
            return Err(EnrollmentError::course_not_found(code));
        }

        if !confirmation.trim().eq_ignore_ascii_case(DELETE_CONFIRMATION) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let removed = courses
            .remove(&code)
            .ok_or_else(|| EnrollmentError::course_not_found(&code))?;
        self.storage.courses.save(&courses)?;

        self.storage.record(AuditEntry::course_deleted(&removed));

        Ok(DeleteOutcome::Deleted(removed))
    }

    /// Get a course by code (case-insensitive)
    pub fn get(&self, course_code: &str) -> EnrollmentResult<Option<Course>> {
        let courses = self.storage.courses.load()?;
        Ok(courses.get(&Course::normalize_code(course_code)).cloned())
    }

    /// List all courses ordered by code
    pub fn list(&self) -> EnrollmentResult<Vec<Course>> {
        let courses = self.storage.courses.load()?;
        let mut all: Vec<Course> = courses.iter().cloned().collect();
        all.sort_by(|a, b| a.course_code.cmp(&b.course_code));
        Ok(all)
    }

    /// Find courses whose code, name or department contains `keyword`
    ///
    /// Matching is case-insensitive; results keep catalog order.
    pub fn search(&self, keyword: &str) -> EnrollmentResult<Vec<Course>> {
        let keyword = keyword.trim().to_lowercase();
        let courses = self.storage.courses.load()?;

        Ok(courses
            .iter()
            .filter(|c| c.matches_keyword(&keyword))
            .cloned()
            .collect())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::EnrollmentPaths;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnrollmentPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn new_course<'i>(
        code: &'i str,
        name: &'i str,
        dept: &'i str,
        units: &'i str,
    ) -> NewCourse<'i> {
        NewCourse {
            course_code: code,
            course_name: name,
            department: dept,
            units,
        }
    }

    fn seed(service: &CourseService<'_>) {
        service
            .add(new_course("MATH101", "Calculus I", "Mathematics", "3"))
            .unwrap();
        service
            .add(new_course("CS101", "Introduction to Programming", "Computer Science", "3"))
            .unwrap();
        service
            .add(new_course("ENG101", "Technical Writing", "English", "2"))
            .unwrap();
    }

    fn file_contents(storage: &Storage) -> Vec<u8> {
        fs::read(storage.courses.path()).unwrap()
    }

    #[test]
    fn test_add_then_load() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);

        let course = service
            .add(new_course("cs301", "Database Management Systems", "Computer Science", " 3 "))
            .unwrap();

        assert_eq!(course.course_code, "CS301");
        assert_eq!(course.units, 3);

        let loaded = storage.courses.load().unwrap();
        assert_eq!(loaded.get("CS301"), Some(&course));
    }

    #[test]
    fn test_add_duplicate_does_not_mutate() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);
        seed(&service);
        let before = file_contents(&storage);

        let err = service
            .add(new_course("cs101", "Another Name", "Elsewhere", "5"))
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(file_contents(&storage), before);
    }

    #[test]
    fn test_add_invalid_units_does_not_mutate() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);
        seed(&service);
        let before = file_contents(&storage);

        let err = service
            .add(new_course("IT101", "Web Development", "IT", "three"))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(file_contents(&storage), before);
        assert!(service.get("IT101").unwrap().is_none());
    }

    #[test]
    fn test_add_empty_code_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);

        let err = service.add(new_course("  ", "Nothing", "None", "1")).unwrap_err();
        assert!(err.is_validation());
        assert!(!storage.courses.path().exists());
    }

    #[test]
    fn test_update_empty_fields_preserved() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);
        seed(&service);

        let result = service
            .update(
                "math101",
                CourseChanges {
                    course_name: Some(""),
                    department: Some("  "),
                    units: None,
                },
            )
            .unwrap();

        assert!(!result.changed);
        assert!(result.warnings.is_empty());
        assert_eq!(result.course.course_name, "Calculus I");
        assert_eq!(result.course.department, "Mathematics");
        assert_eq!(result.course.units, 3);
    }

    #[test]
    fn test_update_invalid_units_applies_other_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);
        seed(&service);

        let result = service
            .update(
                "CS101",
                CourseChanges {
                    course_name: Some("Programming 1"),
                    department: None,
                    units: Some("lots"),
                },
            )
            .unwrap();

        assert!(result.changed);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("lots"));

        let stored = service.get("CS101").unwrap().unwrap();
        assert_eq!(stored.course_name, "Programming 1");
        assert_eq!(stored.department, "Computer Science");
        assert_eq!(stored.units, 3);
    }

    #[test]
    fn test_update_units() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);
        seed(&service);

        service
            .update(
                "ENG101",
                CourseChanges {
                    units: Some("4"),
                    ..CourseChanges::default()
                },
            )
            .unwrap();

        assert_eq!(service.get("eng101").unwrap().unwrap().units, 4);

        let entries = storage.audit().read_all().unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.operation, Operation::Update);
        assert_eq!(last.changes.as_deref(), Some("units: 2 -> 4"));
    }

    #[test]
    fn test_update_missing_course() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);
        seed(&service);
        let before = file_contents(&storage);

        let err = service
            .update("CS999", CourseChanges::default())
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(file_contents(&storage), before);
    }

    #[test]
    fn test_delete_with_confirmation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);
        seed(&service);

        let outcome = service.delete("eng101", " YES ").unwrap();

        match outcome {
            DeleteOutcome::Deleted(course) => assert_eq!(course.course_code, "ENG101"),
            DeleteOutcome::Cancelled => panic!("expected deletion"),
        }
        assert!(service.get("ENG101").unwrap().is_none());
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_cancelled() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);
        seed(&service);
        let before = file_contents(&storage);

        for answer in ["no", "y", "", "yes please"] {
            assert_eq!(
                service.delete("CS101", answer).unwrap(),
                DeleteOutcome::Cancelled
            );
        }

        assert_eq!(file_contents(&storage), before);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);
        seed(&service);
        let before = file_contents(&storage);
        let audit_before = storage.audit().read_all().unwrap().len();

        let err = service.delete("NOPE1", "yes").unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(file_contents(&storage), before);
        assert_eq!(storage.audit().read_all().unwrap().len(), audit_before);
    }

    #[test]
    fn test_list_sorted_by_code() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);
        seed(&service);

        let codes: Vec<_> = service
            .list()
            .unwrap()
            .into_iter()
            .map(|c| c.course_code)
            .collect();
        assert_eq!(codes, vec!["CS101", "ENG101", "MATH101"]);
    }

    #[test]
    fn test_search() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);
        seed(&service);

        let by_dept: Vec<_> = service
            .search("SCIENCE")
            .unwrap()
            .into_iter()
            .map(|c| c.course_code)
            .collect();
        assert_eq!(by_dept, vec!["CS101"]);

        // Catalog order, not sorted
        let by_code: Vec<_> = service
            .search("101")
            .unwrap()
            .into_iter()
            .map(|c| c.course_code)
            .collect();
        assert_eq!(by_code, vec!["MATH101", "CS101", "ENG101"]);

        assert!(service.search("biology").unwrap().is_empty());
        assert_eq!(service.search("").unwrap().len(), 3);
    }

    #[test]
    fn test_mutations_are_audited() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CourseService::new(&storage);
        seed(&service);
        service.delete("MATH101", "yes").unwrap();

        let ops: Vec<_> = storage
            .audit()
            .read_all()
            .unwrap()
            .into_iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(
            ops,
            vec![
                Operation::Create,
                Operation::Create,
                Operation::Create,
                Operation::Delete
            ]
        );
    }

    #[test]
    fn test_mutations_saved_when_audit_log_unwritable() {
        let (_temp_dir, storage) = create_test_storage();
        fs::create_dir_all(storage.audit().path()).unwrap();
        let service = CourseService::new(&storage);

        let course = service
            .add(new_course("CS101", "Introduction to Programming", "Computer Science", "3"))
            .unwrap();
        assert_eq!(service.get("CS101").unwrap(), Some(course));

        let result = service
            .update(
                "CS101",
                CourseChanges {
                    units: Some("4"),
                    ..CourseChanges::default()
                },
            )
            .unwrap();
        assert!(result.changed);

        assert_eq!(
            service.delete("CS101", "yes").unwrap(),
            DeleteOutcome::Deleted(result.course)
        );
        assert!(service.get("CS101").unwrap().is_none());

        let warnings = storage.take_audit_warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].starts_with("CREATE Course CS101"));
        assert!(warnings[2].starts_with("DELETE Course CS101"));
    }
}
