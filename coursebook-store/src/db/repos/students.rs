//! Student store - owning side of the enrollment relation
//!
//! Student save/update replaces the full enrollment set inside the same
//! transaction as the row write: the caller always supplies the complete
//! desired set, never a delta.

use std::collections::BTreeSet;

use async_trait::async_trait;
use coursebook_core::{CourseId, NewStudent, Student, StudentId};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::db::DbError;

/// Persistence contract for students and their enrollments
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All students with their enrollment sets, ordered by id.
    async fn list_all(&self) -> Result<Vec<Student>, DbError>;

    async fn get_by_id(&self, id: StudentId) -> Result<Option<Student>, DbError>;

    /// Insert a new student and its enrollment set.
    ///
    /// Fails with `DuplicateKey` if the email is taken.
    async fn save(&self, student: NewStudent) -> Result<Student, DbError>;

    /// Overwrite an existing student and replace its entire enrollment set.
    async fn update(&self, id: StudentId, student: NewStudent) -> Result<Student, DbError>;

    /// Remove a student and its enrollments.
    ///
    /// Returns `false` if nothing was removed.
    async fn delete_by_id(&self, id: StudentId) -> Result<bool, DbError>;
}

#[derive(Debug, FromRow)]
struct StudentRow {
    id: i64,
    name: String,
    email: String,
    department: String,
    semester: i32,
    course_ids: Vec<i64>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: StudentId(row.id),
            name: row.name,
            email: row.email,
            department: row.department,
            semester: row.semester,
            courses: row.course_ids.into_iter().map(CourseId).collect(),
        }
    }
}

/// Student columns plus the aggregated enrollment set (LEFT JOIN keeps
/// students without courses).
const SELECT_STUDENTS: &str = r#"
    SELECT
        s.id,
        s.name,
        s.email,
        s.department,
        s.semester,
        COALESCE(
            array_agg(sc.course_id ORDER BY sc.course_id) FILTER (WHERE sc.course_id IS NOT NULL),
            '{}'
        ) AS course_ids
    FROM students s
    LEFT JOIN student_courses sc ON sc.student_id = s.id
"#;

/// PostgreSQL student repository
#[derive(Clone)]
pub struct StudentRepo {
    pool: PgPool,
}

impl StudentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Replace the enrollment set of `student_id` with exactly `courses`.
    async fn replace_enrollments(
        tx: &mut Transaction<'_, Postgres>,
        student_id: i64,
        courses: &BTreeSet<CourseId>,
    ) -> Result<(), DbError> {
        sqlx::query("DELETE FROM student_courses WHERE student_id = $1")
            .bind(student_id)
            .execute(&mut **tx)
            .await?;

        if courses.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = courses.iter().map(|c| c.get()).collect();
        sqlx::query(
            r#"
            INSERT INTO student_courses (student_id, course_id)
            SELECT $1, UNNEST($2::BIGINT[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(student_id)
        .bind(&ids)
        .execute(&mut **tx)
        .await
        .map_err(|e| DbError::from_enrollment(e, &ids))?;

        Ok(())
    }
}

#[async_trait]
impl StudentStore for StudentRepo {
    async fn list_all(&self) -> Result<Vec<Student>, DbError> {
        let query = format!("{SELECT_STUDENTS} GROUP BY s.id ORDER BY s.id");
        let rows: Vec<StudentRow> = sqlx::query_as(&query).fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn get_by_id(&self, id: StudentId) -> Result<Option<Student>, DbError> {
        let query = format!("{SELECT_STUDENTS} WHERE s.id = $1 GROUP BY s.id");
        let row: Option<StudentRow> = sqlx::query_as(&query)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Student::from))
    }

    async fn save(&self, student: NewStudent) -> Result<Student, DbError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO students (name, email, department, semester)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(student.name.as_str())
        .bind(student.email.as_str())
        .bind(student.department.as_str())
        .bind(student.semester.get())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DbError::from_write(e, "student", "email", student.email.as_str()))?;

        Self::replace_enrollments(&mut tx, id, &student.courses).await?;
        tx.commit().await?;

        tracing::info!(
            student_id = id,
            courses = student.courses.len(),
            "student created"
        );
        Ok(student.into_student(StudentId(id)))
    }

    async fn update(&self, id: StudentId, student: NewStudent) -> Result<Student, DbError> {
        let mut tx = self.pool.begin().await?;

        let updated: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE students
            SET name = $1, email = $2, department = $3, semester = $4
            WHERE id = $5
            RETURNING id
            "#,
        )
        .bind(student.name.as_str())
        .bind(student.email.as_str())
        .bind(student.department.as_str())
        .bind(student.semester.get())
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DbError::from_write(e, "student", "email", student.email.as_str()))?;

        if updated.is_none() {
            // Dropping tx rolls back
            return Err(DbError::not_found("student", id));
        }

        Self::replace_enrollments(&mut tx, id.get(), &student.courses).await?;
        tx.commit().await?;

        tracing::info!(
            student_id = %id,
            courses = student.courses.len(),
            "student updated"
        );
        Ok(student.into_student(id))
    }

    async fn delete_by_id(&self, id: StudentId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
