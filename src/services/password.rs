use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand_core::OsRng;

use crate::errors::auth::AuthError;

/// Hashes and verifies user passwords with Argon2id.
///
/// Every hash gets a fresh random salt, so hashing the same plaintext twice
/// produces different output. Stored hashes are PHC strings carrying their
/// own salt and parameters.
#[derive(Default)]
pub struct PasswordService;

impl PasswordService {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password
    ///
    /// # Returns
    /// * `Ok(String)` - PHC-format Argon2id hash
    /// * `Err(AuthError)` - InternalError when hashing fails
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AuthError::internal_error(format!("Password hashing error: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify a plaintext password against a stored hash
    ///
    /// Mismatches and unparseable hashes both yield `false`; no error ever
    /// reaches the caller from here.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
