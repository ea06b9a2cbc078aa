//! Flattened student/course join record

use serde::{Deserialize, Serialize};

use super::{Course, CourseId, Student, StudentId};

/// One row per (student, course) pair. A student enrolled in three courses
/// appears in three rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentCourseRow {
    pub student_id: StudentId,
    pub student_name: String,
    pub student_email: String,
    pub student_department: String,
    pub student_semester: i32,
    pub course_id: CourseId,
    pub course_code: String,
    pub course_name: String,
    pub course_credits: i32,
}

impl StudentCourseRow {
    pub fn new(student: &Student, course: &Course) -> Self {
        Self {
            student_id: student.id,
            student_name: student.name.clone(),
            student_email: student.email.clone(),
            student_department: student.department.clone(),
            student_semester: student.semester,
            course_id: course.id,
            course_code: course.code.clone(),
            course_name: course.name.clone(),
            course_credits: course.credits,
        }
    }
}
