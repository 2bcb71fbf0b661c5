use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::auth::AuthError;
use crate::types::dto::common::ErrorResponse;

/// Event endpoint error types.
///
/// NotFound deliberately covers both "no such event" and "not a creator of
/// this event" on update/delete, so callers cannot probe for the existence
/// of other users' events.
#[derive(ApiResponse, Debug)]
pub enum EventError {
    /// Missing, invalid or expired token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Event does not exist, or the caller has no rights over it
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl EventError {
    /// Create an Unauthorized error
    pub fn unauthorized(message: String) -> Self {
        EventError::Unauthorized(Json(ErrorResponse {
            error: "unauthorized".to_string(),
            message,
            status_code: 401,
        }))
    }

    /// Create a NotFound error
    pub fn not_found() -> Self {
        EventError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: "Event not found".to_string(),
            status_code: 404,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        EventError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            EventError::Unauthorized(json) => json.0.message.clone(),
            EventError::NotFound(json) => json.0.message.clone(),
            EventError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<AuthError> for EventError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InternalError(json) => EventError::InternalError(json),
            other => EventError::unauthorized(other.message()),
        }
    }
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
