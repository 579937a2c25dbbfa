//! Error types for the library layer.

use std::fmt;

use crate::validation::FormErrors;

/// Errors produced by the library layer, wrapping upstream API errors and
/// adding input and form validation failures.
#[derive(Debug)]
pub enum BakeryError {
    /// An error from the underlying API client.
    Api(bakery_api::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// A product or category form has one or more invalid fields.
    InvalidForm(FormErrors),
}

impl BakeryError {
    /// True when the backend answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(e) if e.status() == Some(404))
    }
}

impl fmt::Display for BakeryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "{}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::InvalidForm(errors) => write!(f, "Please fix the form: {}", errors),
        }
    }
}

impl std::error::Error for BakeryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bakery_api::Error> for BakeryError {
    fn from(e: bakery_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<FormErrors> for BakeryError {
    fn from(e: FormErrors) -> Self {
        Self::InvalidForm(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_keeps_status_and_body() {
        let err = BakeryError::from(bakery_api::Error::HttpStatus {
            status: 404,
            body: "Not found".to_string(),
        });
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API error 404: Not found");
    }

    #[test]
    fn other_statuses_are_not_not_found() {
        let err = BakeryError::from(bakery_api::Error::HttpStatus {
            status: 500,
            body: String::new(),
        });
        assert!(!err.is_not_found());
        assert!(!BakeryError::InvalidInput("x".to_string()).is_not_found());
    }
}
