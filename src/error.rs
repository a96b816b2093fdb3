/// Error types for the VetClinic backend
///
/// Three failure families with distinct recovery paths:
/// - ConfigError: malformed startup parameters, fatal before serving
/// - ApiError::Validation: a submitted record broke a declared rule,
///   surfaced to the caller with field-level detail
/// - ApiError::NotFound / Conflict / Internal: CRUD outcomes mapped to
///   their HTTP status codes

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single failed validation rule, identified by field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field the rule was declared on (e.g. "end_time", "blocks[2].image_position")
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Configuration failures detected during settings resolution
///
/// These are fatal: the process must not start serving requests with a
/// half-resolved configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Request-scoped errors returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more fields broke a validation rule; the record is wholly rejected
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Referenced id does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Record conflicts with existing data (e.g. duplicate email)
    #[error("{0}")]
    Conflict(String),

    /// Storage or other unexpected failure; details are logged, not leaked
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

/// JSON body produced for every error response
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: "validation failed".to_string(),
                    fields,
                },
            ),
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: format!("{} not found", what),
                    fields: Vec::new(),
                },
            ),
            ApiError::Conflict(message) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    error: message,
                    fields: Vec::new(),
                },
            ),
            ApiError::Internal(e) => {
                tracing::error!("❌ Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "internal server error".to_string(),
                        fields: Vec::new(),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_serialize_with_field_and_message() {
        let err = FieldError::new("end_time", "closing time must be after opening time");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["field"], "end_time");
        assert_eq!(json["message"], "closing time must be after opening time");
    }

    #[test]
    fn validation_error_aggregates_multiple_fields() {
        let err: ApiError = vec![
            FieldError::new("start_time", "required"),
            FieldError::new("end_time", "required"),
        ]
        .into();
        match err {
            ApiError::Validation(fields) => assert_eq!(fields.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
