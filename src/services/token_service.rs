use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::fmt;

use crate::errors::auth::AuthError;
use crate::types::internal::auth::Claims;

/// Issues and validates signed, time-limited session tokens.
///
/// Tokens are HS256 JWTs binding the user id and an expiry timestamp; expiry
/// is the only invalidation mechanism, there is no revocation list.
pub struct TokenService {
    jwt_secret: String,
    ttl_minutes: i64,
}

impl TokenService {
    /// Create a new TokenService with the given signing secret and token TTL
    pub fn new(jwt_secret: String, ttl_minutes: i64) -> Self {
        Self {
            jwt_secret,
            ttl_minutes,
        }
    }

    /// Issue a token for the given user with the configured TTL
    pub fn issue(&self, user_id: i32) -> Result<String, AuthError> {
        self.issue_with_ttl(user_id, self.ttl_minutes * 60)
    }

    /// Issue a token for the given user expiring after `ttl_seconds`
    ///
    /// # Returns
    /// * `Ok(String)` - The encoded JWT
    /// * `Err(AuthError)` - InternalError when signing fails
    pub fn issue_with_ttl(&self, user_id: i32, ttl_seconds: i64) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + ttl_seconds,
            iat: now,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::internal_error(format!("Failed to sign token: {}", e)))?;

        Ok(token)
    }

    /// Validate a token and return its claims
    ///
    /// # Returns
    /// * `Ok(Claims)` - The decoded claims
    /// * `Err(AuthError)` - ExpiredToken past expiry, InvalidToken otherwise
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // A token is valid strictly until its exp, no grace window
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::expired_token(),
            _ => AuthError::invalid_token(),
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}
