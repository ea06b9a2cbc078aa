//! Course fields and records

use serde::{Deserialize, Serialize};

use super::validation::{bounded_text, required_text};
use super::{CourseId, ValidationError};

const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 500;

/// Validated course code, e.g. `CS101`. Unique across all courses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseCode(String);

impl CourseCode {
    /// Create a course code.
    ///
    /// # Rules
    /// - Surrounding whitespace is trimmed
    /// - Must not be blank
    ///
    /// # Example
    /// ```
    /// use coursebook_core::models::CourseCode;
    ///
    /// assert_eq!(CourseCode::new(" CS101 ").unwrap().as_str(), "CS101");
    /// assert!(CourseCode::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        required_text(s, "course code").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated course name (2-200 characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseName(String);

impl CourseName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "course name", MIN_NAME_LEN, MAX_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Credit count for a course. Any integer is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Credits(i32);

impl Credits {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Optional free-text course description (max 500 characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Description(String);

impl Description {
    /// Parse an optional description. Blank input means "no description".
    pub fn parse(raw: Option<&str>) -> Result<Option<Self>, ValidationError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => bounded_text(s, "description", 1, MAX_DESCRIPTION_LEN)
                .map(|s| Some(Self(s))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// A course that has not been stored yet, or replacement values for an
/// existing course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub code: CourseCode,
    pub name: CourseName,
    pub credits: Credits,
    pub description: Option<Description>,
}

impl NewCourse {
    /// Validate all course fields at once.
    ///
    /// Fields are checked in form order and the first failure is returned.
    pub fn new(
        code: &str,
        name: &str,
        credits: i32,
        description: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            code: CourseCode::new(code)?,
            name: CourseName::new(name)?,
            credits: Credits::new(credits),
            description: Description::parse(description)?,
        })
    }

    /// Attach a store-assigned identifier.
    pub fn into_course(self, id: CourseId) -> Course {
        Course {
            id,
            code: self.code.into_string(),
            name: self.name.into_string(),
            credits: self.credits.get(),
            description: self.description.map(Description::into_string),
        }
    }
}

/// Stored course record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub name: String,
    pub credits: i32,
    pub description: Option<String>,
}
