//! Store error type

/// Error returned by every store operation
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("duplicate {field} for {resource}: '{value}'")]
    DuplicateKey {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn duplicate(resource: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::DuplicateKey {
            resource,
            field,
            value: value.into(),
        }
    }

    /// Translate a write failure, turning a unique-index violation into
    /// `DuplicateKey`. Any other error passes through as `Sqlx`.
    pub(crate) fn from_write(
        err: sqlx::Error,
        resource: &'static str,
        field: &'static str,
        value: &str,
    ) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::duplicate(resource, field, value);
            }
        }
        Self::Sqlx(err)
    }

    /// Translate an enrollment insert failure. A foreign-key violation means
    /// one of the referenced courses no longer exists; Postgres does not say
    /// which, so every requested id is reported.
    pub(crate) fn from_enrollment(err: sqlx::Error, course_ids: &[i64]) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return Self::missing_courses(course_ids);
            }
        }
        Self::Sqlx(err)
    }

    fn missing_courses(course_ids: &[i64]) -> Self {
        let resource = if course_ids.len() == 1 { "course" } else { "courses" };
        let ids = course_ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::not_found(resource, ids)
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
