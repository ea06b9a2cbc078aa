//! Course store
//!
//! - save: INSERT, unique index on course_code reports duplicates
//! - update: UPDATE ... RETURNING, no row means not found
//! - delete: idempotent; enrollment rows go with the course

use std::collections::BTreeSet;

use async_trait::async_trait;
use coursebook_core::{Course, CourseId, NewCourse, StudentId};
use sqlx::{FromRow, PgPool};

use crate::db::DbError;

/// Persistence contract for courses
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// All courses, ordered by id. No paging.
    async fn list_all(&self) -> Result<Vec<Course>, DbError>;

    async fn get_by_id(&self, id: CourseId) -> Result<Option<Course>, DbError>;

    /// Insert a new course. Fails with `DuplicateKey` if the code is taken.
    async fn save(&self, course: NewCourse) -> Result<Course, DbError>;

    /// Overwrite every mutable field of an existing course.
    async fn update(&self, id: CourseId, course: NewCourse) -> Result<Course, DbError>;

    /// Remove a course and detach it from all students.
    ///
    /// Returns `false` if nothing was removed.
    async fn delete_by_id(&self, id: CourseId) -> Result<bool, DbError>;

    /// Students enrolled in a course (the derived back-reference).
    async fn enrolled_students(&self, id: CourseId) -> Result<BTreeSet<StudentId>, DbError>;
}

#[derive(Debug, FromRow)]
struct CourseRow {
    id: i64,
    course_code: String,
    course_name: String,
    credits: i32,
    description: Option<String>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Self {
            id: CourseId(row.id),
            code: row.course_code,
            name: row.course_name,
            credits: row.credits,
            description: row.description,
        }
    }
}

/// PostgreSQL course repository
#[derive(Clone)]
pub struct CourseRepo {
    pool: PgPool,
}

impl CourseRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseStore for CourseRepo {
    async fn list_all(&self) -> Result<Vec<Course>, DbError> {
        let rows: Vec<CourseRow> = sqlx::query_as(
            r#"
            SELECT id, course_code, course_name, credits, description
            FROM courses
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn get_by_id(&self, id: CourseId) -> Result<Option<Course>, DbError> {
        let row: Option<CourseRow> = sqlx::query_as(
            r#"
            SELECT id, course_code, course_name, credits, description
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Course::from))
    }

    async fn save(&self, course: NewCourse) -> Result<Course, DbError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO courses (course_code, course_name, credits, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(course.code.as_str())
        .bind(course.name.as_str())
        .bind(course.credits.get())
        .bind(course.description.as_ref().map(|d| d.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from_write(e, "course", "course code", course.code.as_str()))?;

        tracing::info!(course_id = id, code = course.code.as_str(), "course created");
        Ok(course.into_course(CourseId(id)))
    }

    async fn update(&self, id: CourseId, course: NewCourse) -> Result<Course, DbError> {
        let updated: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE courses
            SET course_code = $1, course_name = $2, credits = $3, description = $4
            WHERE id = $5
            RETURNING id
            "#,
        )
        .bind(course.code.as_str())
        .bind(course.name.as_str())
        .bind(course.credits.get())
        .bind(course.description.as_ref().map(|d| d.as_str()))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::from_write(e, "course", "course code", course.code.as_str()))?;

        if updated.is_none() {
            return Err(DbError::not_found("course", id));
        }

        tracing::info!(course_id = %id, "course updated");
        Ok(course.into_course(id))
    }

    async fn delete_by_id(&self, id: CourseId) -> Result<bool, DbError> {
        // student_courses rows cascade
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn enrolled_students(&self, id: CourseId) -> Result<BTreeSet<StudentId>, DbError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT student_id FROM student_courses WHERE course_id = $1 ORDER BY student_id",
        )
        .bind(id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(StudentId).collect())
    }
}
