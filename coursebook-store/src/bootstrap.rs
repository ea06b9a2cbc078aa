//! Startup wiring
//!
//! Connects to PostgreSQL, brings the schema up to date, builds the services
//! and loads the demonstration data when `seed_demo_data` is set.

use anyhow::{Context, Result};
use coursebook_core::CoursebookConfig;

use crate::db::{
    create_pool, migrations, CourseRepo, CourseStore, EnrollmentQuery, StudentRepo, StudentStore,
};
use crate::seed::{seed_demo_data, SeedReport};
use crate::service::{CourseService, ServiceResult, StudentService};

/// Course and student services sharing one pair of stores
pub struct Services<S, C> {
    pub courses: CourseService<C>,
    pub students: StudentService<S, C>,
}

/// Services backed by PostgreSQL
pub type PgServices = Services<StudentRepo, CourseRepo>;

impl<S, C> Services<S, C>
where
    S: StudentStore + EnrollmentQuery,
    C: CourseStore + Clone,
{
    pub fn new(students: S, courses: C) -> Self {
        Self {
            courses: CourseService::new(courses.clone()),
            students: StudentService::new(students, courses),
        }
    }

    /// Load the demonstration data if `enabled`. `None` when disabled.
    pub async fn seed_if_enabled(&self, enabled: bool) -> ServiceResult<Option<SeedReport>> {
        if !enabled {
            tracing::debug!("demo data disabled");
            return Ok(None);
        }
        seed_demo_data(&self.courses, &self.students).await.map(Some)
    }
}

/// Connect, migrate, and build the PostgreSQL-backed services.
///
/// ```ignore
/// let config = CoursebookConfig::load()?;
/// let services = bootstrap(&config).await?;
/// let rows = services.students.students_with_courses().await?;
/// ```
pub async fn bootstrap(config: &CoursebookConfig) -> Result<PgServices> {
    let pool = create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let services = Services::new(StudentRepo::new(pool.clone()), CourseRepo::new(pool));

    if let Some(report) = services
        .seed_if_enabled(config.seed_demo_data)
        .await
        .context("Failed to load demo data")?
    {
        tracing::info!(skipped = report.skipped, "demo data step finished");
    }

    Ok(services)
}
