//! Schema creation for courses, students and enrollments
//!
//! Idempotent: safe to run on every startup.

use sqlx::PgPool;

use super::DbError;

/// Create all tables and indexes if they do not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running coursebook migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id BIGSERIAL PRIMARY KEY,
            course_code TEXT NOT NULL,
            course_name TEXT NOT NULL,
            credits INTEGER NOT NULL,
            description VARCHAR(500)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Named unique index: the authoritative duplicate check for course codes
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS courses_course_code_key ON courses (course_code)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            department TEXT NOT NULL,
            semester INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS students_email_key ON students (email)")
        .execute(pool)
        .await?;

    // Owning side is students; deleting either end removes the pair only
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS student_courses (
            student_id BIGINT NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            PRIMARY KEY (student_id, course_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_student_courses_course ON student_courses (course_id)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Coursebook migrations complete");
    Ok(())
}
