//! Service error types
//!
//! Every variant is recoverable at the request boundary: the caller shows the
//! message and abandons the operation.

use coursebook_core::ValidationError;

use crate::db::DbError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    DuplicateKey { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("storage error: {0}")]
    Storage(DbError),
}

impl ServiceError {
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            message: format!("{} not found with id: {}", capitalize(resource), id),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::DuplicateKey { field, .. } => Self::DuplicateKey {
                message: format!("{} already exists", capitalize(field)),
            },
            DbError::NotFound { resource, id } => Self::not_found(resource, id),
            DbError::Sqlx(_) => Self::Storage(e),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
