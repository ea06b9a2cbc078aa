//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing or blank
    Empty { field: &'static str },

    /// Field is shorter than the minimum length
    TooShort { field: &'static str, min: usize },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::TooShort { field, min } => {
                write!(f, "{} must be at least {} characters", field, min)
            }
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim `raw` and check it is non-blank and within `min..=max` characters.
pub(crate) fn bounded_text(
    raw: &str,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    let len = s.chars().count();
    if len < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if len > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(s.to_owned())
}

/// Trim `raw` and check it is non-blank.
pub(crate) fn required_text(raw: &str, field: &'static str) -> Result<String, ValidationError> {
    bounded_text(raw, field, 1, usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "course name",
            max: 200,
        };
        assert_eq!(
            err.to_string(),
            "course name exceeds maximum length of 200 characters"
        );

        let err = ValidationError::Empty { field: "email" };
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn bounded_text_trims_before_measuring() {
        assert_eq!(bounded_text("  ab  ", "name", 2, 5).unwrap(), "ab");
        assert!(matches!(
            bounded_text("   ", "name", 1, 5),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn required_text_has_no_upper_bound() {
        let long = "x".repeat(10_000);
        assert_eq!(required_text(&long, "name").unwrap().len(), 10_000);
        assert_eq!(
            required_text(" \t ", "name"),
            Err(ValidationError::Empty { field: "name" })
        );
    }

    #[test]
    fn bounded_text_counts_chars_not_bytes() {
        // 4 chars, 8 bytes
        assert!(bounded_text("ÄÖÜß", "name", 2, 4).is_ok());
    }

    #[test]
    fn field_name_is_exposed() {
        let err = ValidationError::Empty { field: "email" };
        assert_eq!(err.field(), "email");
    }
}
