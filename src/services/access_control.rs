use std::sync::Arc;

use crate::errors::auth::AuthError;
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::db::user;

/// Derives the authenticated identity and role from a bearer token.
///
/// Read-only: no side effects beyond the user lookup.
pub struct AccessControl {
    token_service: Arc<TokenService>,
    user_store: Arc<UserStore>,
}

impl AccessControl {
    pub fn new(token_service: Arc<TokenService>, user_store: Arc<UserStore>) -> Self {
        Self {
            token_service,
            user_store,
        }
    }

    /// Resolve a bearer token to the user it was issued for
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The authenticated user
    /// * `Err(AuthError)` - InvalidToken/ExpiredToken for bad tokens,
    ///   UserNotFound when the subject no longer exists
    pub async fn current_user(&self, token: &str) -> Result<user::Model, AuthError> {
        let claims = self.token_service.validate(token)?;

        let user_id: i32 = claims
            .sub
            .parse()
            .map_err(|_| AuthError::invalid_token())?;

        let user = self.user_store.find_by_id(user_id).await?;

        user.ok_or_else(AuthError::user_not_found)
    }

    /// As `current_user`, but additionally requires the admin role
    pub async fn current_admin(&self, token: &str) -> Result<user::Model, AuthError> {
        let user = self.current_user(token).await?;

        if !user.is_admin {
            return Err(AuthError::not_authorized());
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    use crate::services::PasswordService;
    use crate::types::dto::auth::SignupRequest;

    async fn setup() -> (Arc<UserStore>, Arc<TokenService>, AccessControl) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let user_store = Arc::new(UserStore::new(db, Arc::new(PasswordService::new())));
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
            30,
        ));
        let access = AccessControl::new(token_service.clone(), user_store.clone());

        (user_store, token_service, access)
    }

    fn signup(username: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            phone_number: "555-0100".to_string(),
            password: "hunter2hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_current_user_resolves_token_subject() {
        let (user_store, token_service, access) = setup().await;

        let user = user_store.create_user(&signup("alice")).await.unwrap();
        let token = token_service.issue(user.id).unwrap();

        let resolved = access.current_user(&token).await.unwrap();

        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.username, "alice");
    }

    #[tokio::test]
    async fn test_current_user_rejects_garbage_token() {
        let (_user_store, _token_service, access) = setup().await;

        match access.current_user("garbage").await {
            Err(AuthError::InvalidToken(_)) => {}
            other => panic!("Expected InvalidToken, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_current_user_fails_when_subject_is_gone() {
        let (_user_store, token_service, access) = setup().await;

        // Token for a user id that was never created
        let token = token_service.issue(9999).unwrap();

        match access.current_user(&token).await {
            Err(AuthError::UserNotFound(_)) => {}
            other => panic!("Expected UserNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_current_admin_rejects_regular_user() {
        let (user_store, token_service, access) = setup().await;

        let user = user_store.create_user(&signup("bob")).await.unwrap();
        let token = token_service.issue(user.id).unwrap();

        match access.current_admin(&token).await {
            Err(AuthError::NotAuthorized(_)) => {}
            other => panic!("Expected NotAuthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_current_admin_accepts_admin() {
        let (user_store, token_service, access) = setup().await;

        let user = user_store.create_user(&signup("carol")).await.unwrap();
        user_store.set_admin("carol", true).await.unwrap();
        let token = token_service.issue(user.id).unwrap();

        let admin = access.current_admin(&token).await.unwrap();

        assert!(admin.is_admin);
    }
}
