//! coursebook-store: persistence and application services
//!
//! - `db`: store traits with PostgreSQL and in-memory implementations
//! - `service`: validation + store orchestration for courses and students
//! - `seed`: demonstration data
//! - `bootstrap`: connect, migrate and optionally seed at startup

pub mod bootstrap;
pub mod db;
pub mod seed;
pub mod service;

pub use bootstrap::{bootstrap, PgServices, Services};
pub use db::{
    CourseRepo, CourseStore, DbError, EnrollmentQuery, MemoryStore, StudentRepo, StudentStore,
};
pub use seed::{seed_demo_data, SeedReport};
pub use service::{
    CourseForm, CourseService, ServiceError, ServiceResult, StudentForm, StudentService,
};
