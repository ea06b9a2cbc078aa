//! In-process store with the same semantics as the PostgreSQL repositories
//!
//! One mutex guards all state, so every operation (including the
//! uniqueness check and the insert that follows it) is atomic. Clones share
//! the same data, which lets one `MemoryStore` back both the course and the
//! student side of the service layer.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use coursebook_core::{
    Course, CourseId, NewCourse, NewStudent, Student, StudentCourseRow, StudentId,
};

use super::{CourseStore, DbError, EnrollmentQuery, StudentStore};

#[derive(Debug, Default)]
struct State {
    courses: BTreeMap<CourseId, Course>,
    students: BTreeMap<StudentId, Student>,
    last_course_id: i64,
    last_student_id: i64,
}

impl State {
    fn code_taken(&self, code: &str, except: Option<CourseId>) -> bool {
        self.courses
            .values()
            .any(|c| c.code == code && Some(c.id) != except)
    }

    fn email_taken(&self, email: &str, except: Option<StudentId>) -> bool {
        self.students
            .values()
            .any(|s| s.email == email && Some(s.id) != except)
    }

    /// Mirror of the foreign key on student_courses.course_id
    fn check_courses_exist(&self, courses: &BTreeSet<CourseId>) -> Result<(), DbError> {
        match courses.iter().find(|id| !self.courses.contains_key(id)) {
            Some(missing) => Err(DbError::not_found("course", missing)),
            None => Ok(()),
        }
    }
}

/// Shared in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // No operation leaves State half-written, so a poisoned lock is still usable
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Course>, DbError> {
        Ok(self.lock().courses.values().cloned().collect())
    }

    async fn get_by_id(&self, id: CourseId) -> Result<Option<Course>, DbError> {
        Ok(self.lock().courses.get(&id).cloned())
    }

    async fn save(&self, course: NewCourse) -> Result<Course, DbError> {
        let mut state = self.lock();
        if state.code_taken(course.code.as_str(), None) {
            return Err(DbError::duplicate(
                "course",
                "course code",
                course.code.as_str(),
            ));
        }

        state.last_course_id += 1;
        let course = course.into_course(CourseId(state.last_course_id));
        state.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn update(&self, id: CourseId, course: NewCourse) -> Result<Course, DbError> {
        let mut state = self.lock();
        if !state.courses.contains_key(&id) {
            return Err(DbError::not_found("course", id));
        }
        if state.code_taken(course.code.as_str(), Some(id)) {
            return Err(DbError::duplicate(
                "course",
                "course code",
                course.code.as_str(),
            ));
        }

        let course = course.into_course(id);
        state.courses.insert(id, course.clone());
        Ok(course)
    }

    async fn delete_by_id(&self, id: CourseId) -> Result<bool, DbError> {
        let mut state = self.lock();
        let removed = state.courses.remove(&id).is_some();
        if removed {
            for student in state.students.values_mut() {
                student.courses.remove(&id);
            }
        }
        Ok(removed)
    }

    async fn enrolled_students(&self, id: CourseId) -> Result<BTreeSet<StudentId>, DbError> {
        Ok(self
            .lock()
            .students
            .values()
            .filter(|s| s.is_enrolled_in(id))
            .map(|s| s.id)
            .collect())
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Student>, DbError> {
        Ok(self.lock().students.values().cloned().collect())
    }

    async fn get_by_id(&self, id: StudentId) -> Result<Option<Student>, DbError> {
        Ok(self.lock().students.get(&id).cloned())
    }

    async fn save(&self, student: NewStudent) -> Result<Student, DbError> {
        let mut state = self.lock();
        if state.email_taken(student.email.as_str(), None) {
            return Err(DbError::duplicate("student", "email", student.email.as_str()));
        }
        state.check_courses_exist(&student.courses)?;

        state.last_student_id += 1;
        let student = student.into_student(StudentId(state.last_student_id));
        state.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(&self, id: StudentId, student: NewStudent) -> Result<Student, DbError> {
        let mut state = self.lock();
        if !state.students.contains_key(&id) {
            return Err(DbError::not_found("student", id));
        }
        if state.email_taken(student.email.as_str(), Some(id)) {
            return Err(DbError::duplicate("student", "email", student.email.as_str()));
        }
        state.check_courses_exist(&student.courses)?;

        let student = student.into_student(id);
        state.students.insert(id, student.clone());
        Ok(student)
    }

    async fn delete_by_id(&self, id: StudentId) -> Result<bool, DbError> {
        Ok(self.lock().students.remove(&id).is_some())
    }
}

#[async_trait]
impl EnrollmentQuery for MemoryStore {
    async fn students_with_courses(&self) -> Result<Vec<StudentCourseRow>, DbError> {
        let state = self.lock();
        let courses = &state.courses;
        let rows = state
            .students
            .values()
            .flat_map(|student| {
                student
                    .courses
                    .iter()
                    .filter_map(move |id| courses.get(id))
                    .map(move |course| StudentCourseRow::new(student, course))
            })
            .collect();
        Ok(rows)
    }
}
