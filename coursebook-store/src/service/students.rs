//! Student service
//!
//! Course selections arrive as a list of ids. They are resolved against the
//! full course set before reaching the store: ids that match no course are
//! dropped without error, and the survivors become the student's complete
//! enrollment set.

use std::collections::BTreeSet;

use coursebook_core::{CourseId, NewStudent, Student, StudentCourseRow, StudentId};
use serde::Deserialize;
use tracing::instrument;

use super::error::{ServiceError, ServiceResult};
use crate::db::{CourseStore, EnrollmentQuery, StudentStore};

/// Raw student form input, as submitted by the presentation layer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub department: String,
    pub semester: i32,
    /// Selected courses; absent means none
    #[serde(default)]
    pub course_ids: Vec<CourseId>,
}

impl StudentForm {
    /// Validate the scalar fields. The enrollment set is left empty.
    pub fn validate(&self) -> Result<NewStudent, ServiceError> {
        Ok(NewStudent::new(
            &self.name,
            &self.email,
            &self.department,
            self.semester,
        )?)
    }
}

pub struct StudentService<S, C> {
    students: S,
    courses: C,
}

impl<S, C> StudentService<S, C>
where
    S: StudentStore + EnrollmentQuery,
    C: CourseStore,
{
    pub fn new(students: S, courses: C) -> Self {
        Self { students, courses }
    }

    pub async fn list_students(&self) -> ServiceResult<Vec<Student>> {
        Ok(self.students.list_all().await?)
    }

    pub async fn get_student(&self, id: StudentId) -> ServiceResult<Option<Student>> {
        Ok(self.students.get_by_id(id).await?)
    }

    /// Flattened (student, course) view; students without courses are absent.
    pub async fn students_with_courses(&self) -> ServiceResult<Vec<StudentCourseRow>> {
        Ok(self.students.students_with_courses().await?)
    }

    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn create_student(&self, form: &StudentForm) -> ServiceResult<Student> {
        let student = form.validate()?;
        let courses = self.resolve_courses(&form.course_ids).await?;
        let saved = self.students.save(student.with_courses(courses)).await?;
        tracing::info!(student_id = %saved.id, "student saved");
        Ok(saved)
    }

    /// Overwrite a student. The resolved course list fully replaces the
    /// previous enrollment set.
    #[instrument(skip_all, fields(student_id = %id))]
    pub async fn update_student(&self, id: StudentId, form: &StudentForm) -> ServiceResult<Student> {
        let student = form.validate()?;
        let courses = self.resolve_courses(&form.course_ids).await?;
        Ok(self.students.update(id, student.with_courses(courses)).await?)
    }

    /// Delete a student. Absent ids succeed; store failures are logged and
    /// reported, never propagated as a panic.
    #[instrument(skip_all, fields(student_id = %id))]
    pub async fn delete_student(&self, id: StudentId) -> ServiceResult<()> {
        match self.students.delete_by_id(id).await {
            Ok(true) => {
                tracing::info!("student deleted");
                Ok(())
            }
            Ok(false) => {
                tracing::debug!("student already absent");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to delete student");
                Err(ServiceError::Storage(e))
            }
        }
    }

    /// Keep only the ids that name an existing course.
    async fn resolve_courses(&self, requested: &[CourseId]) -> ServiceResult<BTreeSet<CourseId>> {
        if requested.is_empty() {
            return Ok(BTreeSet::new());
        }

        let known: BTreeSet<CourseId> = self
            .courses
            .list_all()
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();

        let (resolved, dropped): (Vec<CourseId>, Vec<CourseId>) = requested
            .iter()
            .copied()
            .partition(|id| known.contains(id));

        if !dropped.is_empty() {
            tracing::debug!(?dropped, "ignoring unknown course ids");
        }

        Ok(resolved.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::service::{CourseForm, CourseService};

    fn student_form(email: &str, course_ids: Vec<CourseId>) -> StudentForm {
        StudentForm {
            name: "Ada".to_string(),
            email: email.to_string(),
            department: "CS".to_string(),
            semester: 1,
            course_ids,
        }
    }

    async fn setup() -> (CourseService<MemoryStore>, StudentService<MemoryStore, MemoryStore>) {
        let store = MemoryStore::new();
        let courses = CourseService::new(store.clone());
        let students = StudentService::new(store.clone(), store);

        for code in ["CS101", "CS201", "CS301"] {
            courses
                .create_course(&CourseForm {
                    course_code: code.to_string(),
                    course_name: format!("Course {code}"),
                    credits: 4,
                    description: None,
                })
                .await
                .unwrap();
        }

        (courses, students)
    }

    #[tokio::test]
    async fn unknown_course_ids_are_dropped() {
        let (_, students) = setup().await;
        let ada = students
            .create_student(&student_form("ada@x.com", vec![CourseId(1), CourseId(77)]))
            .await
            .unwrap();
        assert_eq!(ada.courses, BTreeSet::from([CourseId(1)]));
    }

    #[tokio::test]
    async fn duplicate_email_is_reported() {
        let (_, students) = setup().await;
        students
            .create_student(&student_form("ada@x.com", vec![]))
            .await
            .unwrap();

        let err = students
            .create_student(&student_form("ada@x.com", vec![]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email already exists");
    }

    #[tokio::test]
    async fn update_to_another_students_email_is_duplicate() {
        let (_, students) = setup().await;
        let a = students
            .create_student(&student_form("a@x.com", vec![]))
            .await
            .unwrap();
        students
            .create_student(&student_form("b@x.com", vec![]))
            .await
            .unwrap();

        let err = students
            .update_student(a.id, &student_form("b@x.com", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateKey { .. }));
        assert_eq!(err.to_string(), "Email already exists");

        // Keeping its own email is fine
        students
            .update_student(a.id, &student_form("a@x.com", vec![CourseId(1)]))
            .await
            .unwrap();
        let stored = students.get_student(a.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "a@x.com");
    }

    #[tokio::test]
    async fn semester_and_department_are_free_form() {
        let (_, students) = setup().await;
        let mut form = student_form("ada@x.com", vec![]);
        form.semester = 13;
        form.department = String::new();

        let ada = students.create_student(&form).await.unwrap();
        assert_eq!(ada.semester, 13);
        assert_eq!(ada.department, "");
    }

    #[tokio::test]
    async fn update_replaces_enrollment_set() {
        let (_, students) = setup().await;
        let ada = students
            .create_student(&student_form("ada@x.com", vec![CourseId(1), CourseId(2)]))
            .await
            .unwrap();

        students
            .update_student(ada.id, &student_form("ada@x.com", vec![CourseId(3)]))
            .await
            .unwrap();

        let stored = students.get_student(ada.id).await.unwrap().unwrap();
        assert_eq!(stored.courses, BTreeSet::from([CourseId(3)]));
    }

    #[tokio::test]
    async fn update_with_no_courses_clears_enrollments() {
        let (_, students) = setup().await;
        let ada = students
            .create_student(&student_form("ada@x.com", vec![CourseId(1)]))
            .await
            .unwrap();

        let updated = students
            .update_student(ada.id, &student_form("ada@x.com", vec![]))
            .await
            .unwrap();
        assert!(updated.courses.is_empty());
        assert!(students.students_with_courses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_unknown_student_is_not_found() {
        let (_, students) = setup().await;
        let err = students
            .update_student(StudentId(5), &student_form("ada@x.com", vec![]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Student not found with id: 5");
    }

    #[tokio::test]
    async fn invalid_email_is_validation_error() {
        let (_, students) = setup().await;
        let err = students
            .create_student(&student_form("ada-at-x", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_missing_is_ok() {
        let (_, students) = setup().await;
        students.delete_student(StudentId(123)).await.unwrap();
    }

    #[test]
    fn form_course_ids_default_to_empty() {
        let form: StudentForm = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@x.com","department":"CS","semester":1}"#,
        )
        .unwrap();
        assert!(form.course_ids.is_empty());
    }
}
