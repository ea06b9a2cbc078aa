//! Application service layer
//!
//! Validates raw form input, delegates to the stores, and translates store
//! failures into user-facing `ServiceError`s.

pub mod courses;
pub mod error;
pub mod students;

pub use courses::{CourseForm, CourseService};
pub use error::{ServiceError, ServiceResult};
pub use students::{StudentForm, StudentService};
