use std::env;
use std::fmt;
use thiserror::Error;

/// Secrets shorter than this are refused at startup
const MIN_SECRET_LENGTH: usize = 32;

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Required secret {0} is not set")]
    Missing(&'static str),

    #[error("Secret {name} must be at least {min} characters")]
    TooShort { name: &'static str, min: usize },
}

/// Process-wide secrets and auth settings, loaded once at startup.
pub struct Secrets {
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

impl Secrets {
    /// Load secrets from the environment
    ///
    /// `JWT_SECRET` is required and must be long enough to sign with.
    /// `ACCESS_TOKEN_EXPIRE_MINUTES` is optional.
    pub fn from_env() -> Result<Self, SecretError> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| SecretError::Missing("JWT_SECRET"))?;

        if jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(SecretError::TooShort {
                name: "JWT_SECRET",
                min: MIN_SECRET_LENGTH,
            });
        }

        let token_ttl_minutes = env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);

        Ok(Self {
            jwt_secret,
            token_ttl_minutes,
        })
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .finish()
    }
}
