use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for user signup
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Desired username, unique across all users
    pub username: String,

    /// Email address, unique across all users
    pub email: String,

    /// Contact phone number
    pub phone_number: String,

    /// Plaintext password, stored only as a salted hash
    pub password: String,
}

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// Response model containing the session token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "bearer")
    pub token_type: String,
}
