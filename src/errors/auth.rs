use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::types::dto::common::ErrorResponse;

/// Authentication and signup error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid username or password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Username already exists
    #[oai(status = 400)]
    DuplicateUsername(Json<ErrorResponse>),

    /// Email already exists
    #[oai(status = 400)]
    DuplicateEmail(Json<ErrorResponse>),

    /// Invalid or malformed token
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// Token has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

    /// Token subject no longer exists
    #[oai(status = 401)]
    UserNotFound(Json<ErrorResponse>),

    /// Authenticated but not an admin
    #[oai(status = 403)]
    NotAuthorized(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid username or password".to_string(),
            status_code: 401,
        }))
    }

    /// Create a DuplicateUsername error
    pub fn duplicate_username() -> Self {
        AuthError::DuplicateUsername(Json(ErrorResponse {
            error: "duplicate_username".to_string(),
            message: "Username already exists".to_string(),
            status_code: 400,
        }))
    }

    /// Create a DuplicateEmail error
    pub fn duplicate_email() -> Self {
        AuthError::DuplicateEmail(Json(ErrorResponse {
            error: "duplicate_email".to_string(),
            message: "Email already exists".to_string(),
            status_code: 400,
        }))
    }

    /// Create an InvalidToken error
    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(ErrorResponse {
            error: "invalid_token".to_string(),
            message: "Invalid or malformed token".to_string(),
            status_code: 401,
        }))
    }

    /// Create an ExpiredToken error
    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(ErrorResponse {
            error: "expired_token".to_string(),
            message: "Token has expired".to_string(),
            status_code: 401,
        }))
    }

    /// Create a UserNotFound error
    pub fn user_not_found() -> Self {
        AuthError::UserNotFound(Json(ErrorResponse {
            error: "user_not_found".to_string(),
            message: "Token subject no longer exists".to_string(),
            status_code: 401,
        }))
    }

    /// Create a NotAuthorized error
    pub fn not_authorized() -> Self {
        AuthError::NotAuthorized(Json(ErrorResponse {
            error: "not_authorized".to_string(),
            message: "Admin privileges required".to_string(),
            status_code: 403,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        AuthError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::DuplicateUsername(json) => json.0.message.clone(),
            AuthError::DuplicateEmail(json) => json.0.message.clone(),
            AuthError::InvalidToken(json) => json.0.message.clone(),
            AuthError::ExpiredToken(json) => json.0.message.clone(),
            AuthError::UserNotFound(json) => json.0.message.clone(),
            AuthError::NotAuthorized(json) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
