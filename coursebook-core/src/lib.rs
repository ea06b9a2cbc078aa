//! coursebook-core: domain types for the student/course enrollment store
//!
//! All user input is validated when the domain types are constructed, so the
//! store and service layers only ever see well-formed values.

pub mod config;
pub mod models;

pub use config::{CoursebookConfig, DatabaseConfig};
pub use models::{
    Course, CourseCode, CourseId, CourseName, Credits, Department, Description, Email, NewCourse,
    NewStudent, Semester, Student, StudentCourseRow, StudentId, StudentName, ValidationError,
};
