//! Store traits and their PostgreSQL implementations
//!
//! Each repository follows these patterns:
//! - Unique indexes decide duplicates (no check-then-insert)
//! - Student lists aggregate enrollments in the same query (no N+1)
//! - Multi-statement writes run in a transaction

pub mod courses;
pub mod enrollments;
pub mod students;

pub use courses::{CourseRepo, CourseStore};
pub use enrollments::EnrollmentQuery;
pub use students::{StudentRepo, StudentStore};
