//! Course service

use std::collections::BTreeSet;

use coursebook_core::{Course, CourseId, NewCourse, StudentId};
use serde::Deserialize;
use tracing::instrument;

use super::error::{ServiceError, ServiceResult};
use crate::db::CourseStore;

/// Raw course form input, as submitted by the presentation layer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseForm {
    pub course_code: String,
    pub course_name: String,
    pub credits: i32,
    #[serde(default)]
    pub description: Option<String>,
}

impl CourseForm {
    pub fn validate(&self) -> Result<NewCourse, ServiceError> {
        Ok(NewCourse::new(
            &self.course_code,
            &self.course_name,
            self.credits,
            self.description.as_deref(),
        )?)
    }
}

pub struct CourseService<C> {
    courses: C,
}

impl<C: CourseStore> CourseService<C> {
    pub fn new(courses: C) -> Self {
        Self { courses }
    }

    pub async fn list_courses(&self) -> ServiceResult<Vec<Course>> {
        Ok(self.courses.list_all().await?)
    }

    pub async fn get_course(&self, id: CourseId) -> ServiceResult<Option<Course>> {
        Ok(self.courses.get_by_id(id).await?)
    }

    /// Students enrolled in a course. Unknown course ids are `NotFound`.
    pub async fn enrolled_students(&self, id: CourseId) -> ServiceResult<BTreeSet<StudentId>> {
        if self.courses.get_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("course", id));
        }
        Ok(self.courses.enrolled_students(id).await?)
    }

    #[instrument(skip_all, fields(code = %form.course_code))]
    pub async fn create_course(&self, form: &CourseForm) -> ServiceResult<Course> {
        let course = form.validate()?;
        let saved = self.courses.save(course).await?;
        tracing::info!(course_id = %saved.id, "course saved");
        Ok(saved)
    }

    #[instrument(skip_all, fields(course_id = %id))]
    pub async fn update_course(&self, id: CourseId, form: &CourseForm) -> ServiceResult<Course> {
        let course = form.validate()?;
        Ok(self.courses.update(id, course).await?)
    }

    /// Delete a course. Absent ids succeed; store failures are logged and
    /// reported, never propagated as a panic.
    #[instrument(skip_all, fields(course_id = %id))]
    pub async fn delete_course(&self, id: CourseId) -> ServiceResult<()> {
        match self.courses.delete_by_id(id).await {
            Ok(true) => {
                tracing::info!("course deleted");
                Ok(())
            }
            Ok(false) => {
                tracing::debug!("course already absent");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to delete course");
                Err(ServiceError::Storage(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn form(code: &str) -> CourseForm {
        CourseForm {
            course_code: code.to_string(),
            course_name: "Intro".to_string(),
            credits: 4,
            description: Some("basics".to_string()),
        }
    }

    #[tokio::test]
    async fn create_returns_id() {
        let service = CourseService::new(MemoryStore::new());
        let course = service.create_course(&form("CS101")).await.unwrap();
        assert_eq!(course.id, CourseId(1));
        assert_eq!(course.description.as_deref(), Some("basics"));
    }

    #[tokio::test]
    async fn duplicate_code_is_reported() {
        let service = CourseService::new(MemoryStore::new());
        service.create_course(&form("CS101")).await.unwrap();

        let err = service.create_course(&form("CS101")).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateKey { .. }));
        assert_eq!(err.to_string(), "Course code already exists");
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_store() {
        let service = CourseService::new(MemoryStore::new());
        let mut bad = form("CS101");
        bad.course_name = "X".to_string();

        let err = service.create_course(&bad).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(service.list_courses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn large_credit_counts_are_accepted() {
        let service = CourseService::new(MemoryStore::new());
        let mut thesis = form("CS999");
        thesis.course_name = "Thesis".to_string();
        thesis.credits = 36;

        let course = service.create_course(&thesis).await.unwrap();
        assert_eq!(course.credits, 36);
    }

    #[tokio::test]
    async fn update_unknown_is_not_found() {
        let service = CourseService::new(MemoryStore::new());
        let err = service
            .update_course(CourseId(42), &form("CS101"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Course not found with id: 42");
    }

    #[tokio::test]
    async fn update_overwrites_all_fields() {
        let service = CourseService::new(MemoryStore::new());
        let course = service.create_course(&form("CS101")).await.unwrap();

        let changed = CourseForm {
            course_code: "CS102".to_string(),
            course_name: "Programming II".to_string(),
            credits: 3,
            description: None,
        };
        service.update_course(course.id, &changed).await.unwrap();

        let stored = service.get_course(course.id).await.unwrap().unwrap();
        assert_eq!(stored.code, "CS102");
        assert_eq!(stored.name, "Programming II");
        assert_eq!(stored.credits, 3);
        assert_eq!(stored.description, None);
    }

    #[tokio::test]
    async fn delete_missing_is_ok() {
        let service = CourseService::new(MemoryStore::new());
        service.delete_course(CourseId(9)).await.unwrap();
    }

    #[tokio::test]
    async fn enrolled_students_of_unknown_course() {
        let service = CourseService::new(MemoryStore::new());
        let err = service.enrolled_students(CourseId(3)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}
