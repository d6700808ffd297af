//! Shared Error Types
//!
//! Errors raised while checking form input locally, before any request is
//! sent. Both variants display only a message, since the form shows it
//! inline.
//!
//! # Usage
//!
//! ```rust
//! use revisewise::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Please enter a valid email address");
//! assert_eq!(error.to_string(), "Please enter a valid email address");
//! assert_eq!(SharedError::missing("Name").to_string(), "Name is required");
//! ```
use thiserror::Error;

/// Local validation failures of the login, signup and question forms
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// A required field was left blank
    #[error("{field} is required")]
    Missing { field: String },

    /// A field has a value the API would reject
    #[error("{message}")]
    Invalid {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing { field: field.into() }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field the error refers to
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::Invalid { field, .. } => field,
        }
    }
}

/// Loose email shape check used by the signup and login forms.
pub fn validate_email(email: &str) -> Result<(), SharedError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(SharedError::validation("email", "Please enter a valid email address"))
    }
}

/// Require a non-blank value for `field`.
pub fn require(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        Err(SharedError::missing(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_display_message_only() {
        let error = SharedError::validation("email", "Invalid email format");
        assert_eq!(error.to_string(), "Invalid email format");
        assert_eq!(error.field(), "email");
        assert_eq!(SharedError::missing("Password").field(), "Password");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("student@school.edu").is_ok());
        assert!(validate_email("  teacher@example.com ").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@localhost").is_err());
    }

    #[test]
    fn test_require() {
        assert!(require("Name", "Asha").is_ok());
        let err = require("Name", "   ").unwrap_err();
        assert_eq!(err, SharedError::missing("Name"));
        assert_eq!(err.to_string(), "Name is required");
    }
}
