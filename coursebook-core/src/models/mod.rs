//! Domain models with validation at construction
//!
//! Input types (`NewCourse`, `NewStudent`) are built from validated field
//! newtypes. Stored records (`Course`, `Student`) carry plain values read
//! back from persistence.

pub mod validation;
pub mod ids;
pub mod course;
pub mod student;
pub mod enrollment;

pub use validation::ValidationError;
pub use ids::{CourseId, StudentId};
pub use course::{Course, CourseCode, CourseName, Credits, Description, NewCourse};
pub use student::{Department, Email, NewStudent, Semester, Student, StudentName};
pub use enrollment::StudentCourseRow;
