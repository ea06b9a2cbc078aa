//! Flattened student/course join view
//!
//! Inner join: students without courses produce no rows.

use async_trait::async_trait;
use coursebook_core::{CourseId, StudentCourseRow, StudentId};
use sqlx::Row;

use super::StudentRepo;
use crate::db::DbError;

/// Read-side query over the enrollment relation
#[async_trait]
pub trait EnrollmentQuery: Send + Sync {
    /// One row per (student, course) pair, ordered by student id then
    /// course id.
    async fn students_with_courses(&self) -> Result<Vec<StudentCourseRow>, DbError>;
}

#[async_trait]
impl EnrollmentQuery for StudentRepo {
    async fn students_with_courses(&self) -> Result<Vec<StudentCourseRow>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                s.id AS student_id,
                s.name AS student_name,
                s.email AS student_email,
                s.department AS student_department,
                s.semester AS student_semester,
                c.id AS course_id,
                c.course_code,
                c.course_name,
                c.credits AS course_credits
            FROM students s
            INNER JOIN student_courses sc ON sc.student_id = s.id
            INNER JOIN courses c ON c.id = sc.course_id
            ORDER BY s.id, c.id
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        tracing::debug!(rows = rows.len(), "loaded students with courses");

        Ok(rows
            .into_iter()
            .map(|r| StudentCourseRow {
                student_id: StudentId(r.get("student_id")),
                student_name: r.get("student_name"),
                student_email: r.get("student_email"),
                student_department: r.get("student_department"),
                student_semester: r.get("student_semester"),
                course_id: CourseId(r.get("course_id")),
                course_code: r.get("course_code"),
                course_name: r.get("course_name"),
                course_credits: r.get("course_credits"),
            })
            .collect())
    }
}
