//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for Newsdesk.
///
/// Covers request validation, upstream provider failures, cache
/// infrastructure failures, and internal errors.
#[derive(Error, Debug)]
pub enum NewsdeskError {
    // ============ Request Errors ============
    /// Request rejected with field-level details
    #[error("{message}")]
    InvalidInput {
        message: String,
        errors: Vec<FieldError>,
    },

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream provider error
    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Rate limit exceeded
    #[error("Too many requests. Please try again later.")]
    RateLimitExceeded,

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NewsdeskError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } => 400,
            Self::RateLimitExceeded => 429,
            Self::Configuration(_)
            | Self::ExternalService { .. }
            | Self::Cache(_)
            | Self::Timeout(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "VALIDATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates an upstream provider error.
    #[must_use]
    pub fn external<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }
}

impl From<serde_json::Error> for NewsdeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error body returned by the HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Always `false` for errors
    pub success: bool,
    /// Human-readable error message
    pub message: String,
    /// Field-level errors for rejected requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    /// Request path, set for unknown endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates an error body with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
            path: None,
        }
    }

    /// Creates a new error body from a `NewsdeskError`.
    ///
    /// Upstream and cache failures keep their message so callers see why a
    /// search failed; internal details of other 500s are not leaked.
    #[must_use]
    pub fn from_error(error: &NewsdeskError) -> Self {
        match error {
            NewsdeskError::InvalidInput { message, errors } => {
                Self::new(message.clone()).with_errors(errors.clone())
            }
            NewsdeskError::Internal(_) | NewsdeskError::Other(_) => {
                Self::new("Internal Server Error")
            }
            other => Self::new(other.to_string()),
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Sets the request path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl From<&NewsdeskError> for ErrorResponse {
    fn from(error: &NewsdeskError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(NewsdeskError::RateLimitExceeded.status_code(), 429);
        assert_eq!(NewsdeskError::external("thenewsapi", "boom").status_code(), 500);
        assert_eq!(NewsdeskError::cache("down").status_code(), 500);
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err = NewsdeskError::InvalidInput {
            message: "Invalid query parameters".to_string(),
            errors: vec![],
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.to_string(), "Invalid query parameters");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(NewsdeskError::Timeout("t".to_string()).error_code(), "TIMEOUT");
        assert_eq!(NewsdeskError::RateLimitExceeded.error_code(), "RATE_LIMIT_EXCEEDED");
        assert_eq!(NewsdeskError::Internal("err".to_string()).error_code(), "INTERNAL_ERROR");
        assert_eq!(
            NewsdeskError::external("thenewsapi", "x").error_code(),
            "EXTERNAL_SERVICE_ERROR"
        );
    }

    #[test]
    fn test_error_response_hides_internal_details() {
        let response = ErrorResponse::from_error(&NewsdeskError::Internal("stack trace".to_string()));
        assert!(!response.success);
        assert_eq!(response.message, "Internal Server Error");
    }

    #[test]
    fn test_error_response_keeps_field_errors() {
        let err = NewsdeskError::InvalidInput {
            message: "Invalid query parameters".to_string(),
            errors: vec![FieldError {
                field: "pageSize".to_string(),
                message: "must be between 1 and 100".to_string(),
                code: "range".to_string(),
            }],
        };
        let response = ErrorResponse::from(&err);
        assert_eq!(response.message, "Invalid query parameters");
        assert_eq!(response.errors.unwrap().len(), 1);
    }

    #[test]
    fn test_error_response_serialization_skips_empty_fields() {
        let json = serde_json::to_value(ErrorResponse::new("nope")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": false, "message": "nope" }));

        let json = serde_json::to_value(ErrorResponse::new("Endpoint not found").with_path("/x")).unwrap();
        assert_eq!(json["path"], "/x");
    }
}
