//! Startup against PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p coursebook-store -- --ignored
//!
//! WARNING: truncates the courses/students tables of the target database.

use coursebook_core::{CoursebookConfig, DatabaseConfig};
use coursebook_store::bootstrap;

#[tokio::test]
#[ignore = "requires database"]
async fn bootstrap_migrates_and_seeds_once() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let mut config = CoursebookConfig {
        database: DatabaseConfig {
            url,
            max_connections: 2,
        },
        seed_demo_data: false,
    };

    // First run creates the schema; clear whatever an earlier run left
    let services = bootstrap(&config).await.expect("bootstrap failed");
    let pool = sqlx::PgPool::connect(&config.database.url).await.unwrap();
    sqlx::query("TRUNCATE student_courses, students, courses RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .unwrap();
    assert!(services.courses.list_courses().await.unwrap().is_empty());

    config.seed_demo_data = true;
    let services = bootstrap(&config).await.expect("bootstrap failed");
    assert_eq!(services.courses.list_courses().await.unwrap().len(), 10);
    assert_eq!(services.students.students_with_courses().await.unwrap().len(), 26);

    // Seeding again is skipped
    let services = bootstrap(&config).await.expect("bootstrap failed");
    assert_eq!(services.students.list_students().await.unwrap().len(), 10);
}
