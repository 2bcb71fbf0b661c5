use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::auth::AuthError;
use crate::errors::event::EventError;
use crate::types::dto::common::ErrorResponse;

/// Admin endpoint error types
#[derive(ApiResponse, Debug)]
pub enum AdminError {
    /// Missing, invalid or expired token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Authenticated but not an admin
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Target user or event does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AdminError {
    /// Create an Unauthorized error
    pub fn unauthorized(message: String) -> Self {
        AdminError::Unauthorized(Json(ErrorResponse {
            error: "unauthorized".to_string(),
            message,
            status_code: 401,
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden() -> Self {
        AdminError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: "Admin privileges required".to_string(),
            status_code: 403,
        }))
    }

    /// Create a NotFound error
    pub fn not_found(what: &str) -> Self {
        AdminError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: format!("{} not found", what),
            status_code: 404,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        AdminError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AdminError::Unauthorized(json) => json.0.message.clone(),
            AdminError::Forbidden(json) => json.0.message.clone(),
            AdminError::NotFound(json) => json.0.message.clone(),
            AdminError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<AuthError> for AdminError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAuthorized(json) => AdminError::Forbidden(json),
            AuthError::InternalError(json) => AdminError::InternalError(json),
            other => AdminError::unauthorized(other.message()),
        }
    }
}

impl From<EventError> for AdminError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Unauthorized(json) => AdminError::Unauthorized(json),
            EventError::NotFound(json) => AdminError::NotFound(json),
            EventError::InternalError(json) => AdminError::InternalError(json),
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
