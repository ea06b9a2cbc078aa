//! Student fields and records
//!
//! A student owns its enrollment set: the courses it is enrolled in are
//! written together with the student row.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::required_text;
use super::{CourseId, StudentId, ValidationError};

/// local@domain.tld, no whitespace, exactly one '@'
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex")
});

/// Validated student name (required)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StudentName(String);

impl StudentName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        required_text(s, "name").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated email address. Unique across all students; compared exactly as
/// entered, so `Ada@x.com` and `ada@x.com` are different addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create an email address.
    ///
    /// # Example
    /// ```
    /// use coursebook_core::models::Email;
    ///
    /// assert_eq!(Email::new(" Ada@X.com ").unwrap().as_str(), "Ada@X.com");
    /// assert!(Email::new("not-an-email").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = required_text(s, "email")?;

        if !EMAIL_RE.is_match(&s) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like name@example.com",
            });
        }

        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Department name, trimmed. May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Department(String);

impl Department {
    pub fn new(s: &str) -> Self {
        Self(s.trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Semester number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Semester(i32);

impl Semester {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// A student that has not been stored yet, or replacement values for an
/// existing student. `courses` is the complete desired enrollment set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: StudentName,
    pub email: Email,
    pub department: Department,
    pub semester: Semester,
    pub courses: BTreeSet<CourseId>,
}

impl NewStudent {
    /// Validate all student fields. The enrollment set starts empty.
    pub fn new(
        name: &str,
        email: &str,
        department: &str,
        semester: i32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: StudentName::new(name)?,
            email: Email::new(email)?,
            department: Department::new(department),
            semester: Semester::new(semester),
            courses: BTreeSet::new(),
        })
    }

    /// Replace the enrollment set.
    pub fn with_courses(mut self, courses: impl IntoIterator<Item = CourseId>) -> Self {
        self.courses = courses.into_iter().collect();
        self
    }

    /// Attach a store-assigned identifier.
    pub fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name.into_string(),
            email: self.email.into_string(),
            department: self.department.into_string(),
            semester: self.semester.get(),
            courses: self.courses,
        }
    }
}

/// Stored student record with its enrollment set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub semester: i32,
    pub courses: BTreeSet<CourseId>,
}

impl Student {
    pub fn is_enrolled_in(&self, course: CourseId) -> bool {
        self.courses.contains(&course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_student() {
        let student = NewStudent::new("Ada", "ada@x.com", "CS", 1).unwrap();
        assert_eq!(student.name.as_str(), "Ada");
        assert_eq!(student.email.as_str(), "ada@x.com");
        assert!(student.courses.is_empty());
    }

    #[test]
    fn email_is_trimmed_but_keeps_case() {
        let email = Email::new("  Ada.Lovelace@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "Ada.Lovelace@Example.COM");
    }

    #[test]
    fn rejects_missing_email() {
        let err = NewStudent::new("Ada", "  ", "CS", 1).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "email" });
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["ada", "ada@", "@x.com", "ada@x", "a da@x.com", "a@b@c.com"] {
            let err = Email::new(bad).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { field: "email", .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_missing_name() {
        let err = NewStudent::new("", "ada@x.com", "CS", 1).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "name" });
    }

    #[test]
    fn semester_and_department_are_unconstrained() {
        let student = NewStudent::new("Ada", "ada@x.com", "", 13).unwrap();
        assert_eq!(student.semester.get(), 13);
        assert_eq!(student.department.as_str(), "");

        let student = NewStudent::new("Bo", "bo@x.com", "  Physics ", 0).unwrap();
        assert_eq!(student.department.as_str(), "Physics");
        assert_eq!(student.semester.get(), 0);
    }

    #[test]
    fn single_character_name_is_accepted() {
        assert_eq!(StudentName::new(" Q ").unwrap().as_str(), "Q");
    }

    #[test]
    fn with_courses_deduplicates() {
        let student = NewStudent::new("Ada", "ada@x.com", "CS", 1)
            .unwrap()
            .with_courses([CourseId(2), CourseId(1), CourseId(2)]);
        assert_eq!(
            student.courses.into_iter().collect::<Vec<_>>(),
            vec![CourseId(1), CourseId(2)]
        );
    }

    #[test]
    fn into_student_keeps_enrollment() {
        let student = NewStudent::new("Ada", "ada@x.com", "CS", 1)
            .unwrap()
            .with_courses([CourseId(3)])
            .into_student(StudentId(1));
        assert!(student.is_enrolled_in(CourseId(3)));
        assert!(!student.is_enrolled_in(CourseId(4)));
    }
}
