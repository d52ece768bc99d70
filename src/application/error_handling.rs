// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-facing responses
// - Validation failures keep their per-field messages
// - Transport failures are reported, never swallowed
// - Logs errors for debugging

use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::AppError;

/// Standard error response for the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
    /// Field name → message, only for validation failures
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, String>,
}

/// Error categories for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found
    NotFound,

    /// Invalid form input
    Validation,

    /// Movie server unreachable or refused the request
    ExternalService,

    /// Export could not be written
    FileSystem,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
            field_errors: BTreeMap::new(),
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Validation(errors) => Self {
                field_errors: errors.to_messages(),
                ..Self::new(ErrorType::Validation, "Please correct the highlighted fields", None)
            },

            AppError::Transport(transport_error) => {
                warn!("Movie server error: {}", transport_error);
                Self::new(
                    ErrorType::ExternalService,
                    "Movie server request failed",
                    Some(transport_error.to_string()),
                )
            }

            AppError::MissingId => Self::validation("Movie has no id".to_string()),

            AppError::Io(io_error) => {
                error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Serialization(serde_error) => {
                error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Config(message) => {
                error!("Configuration error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        for (field, message) in &self.field_errors {
            write!(f, "\n  {}: {}", field, message)?;
        }
        Ok(())
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_app_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{validate_movie, MovieDraft};
    use crate::error::TransportError;

    #[test]
    fn test_validation_error_keeps_field_messages() {
        let errors = validate_movie(&MovieDraft::new("", "90", Some(11.0))).unwrap_err();
        let response = ErrorResponse::from_app_error(AppError::Validation(errors));

        assert_eq!(response.error_type, ErrorType::Validation);
        assert_eq!(response.field_errors.len(), 3);
        assert_eq!(
            response.field_errors.get("duration").map(String::as_str),
            Some("Invalid format. Use Xh or Xm format")
        );
        assert_eq!(
            response.field_errors.get("rating").map(String::as_str),
            Some("Rating must be at most 10")
        );
    }

    #[test]
    fn test_transport_error_is_external_service() {
        let response = ErrorResponse::from_app_error(AppError::Transport(TransportError::Status {
            url: "http://localhost:8585/allmovies".to_string(),
            status: 503,
            body: String::new(),
        }));

        assert_eq!(response.error_type, ErrorType::ExternalService);
        assert!(response.details.unwrap().contains("503"));
    }

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::not_found("Movie");
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Movie not found");
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::not_found("Movie");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("Movie not found"));
        assert!(!json.contains("field_errors"));
    }
}
