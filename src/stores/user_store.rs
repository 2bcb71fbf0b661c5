use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;

use crate::errors::admin::AdminError;
use crate::errors::auth::AuthError;
use crate::services::PasswordService;
use crate::types::db::user;
use crate::types::dto::auth::SignupRequest;

/// UserStore manages user accounts and credentials in the database
pub struct UserStore {
    db: DatabaseConnection,
    passwords: Arc<PasswordService>,
}

impl UserStore {
    /// Create a new UserStore with the given database connection
    pub fn new(db: DatabaseConnection, passwords: Arc<PasswordService>) -> Self {
        Self { db, passwords }
    }

    /// Create a new user account
    ///
    /// Username and email are globally unique; each collision gets its own
    /// error so the caller can tell the user which field to fix. The password
    /// is hashed before anything touches the database.
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The created user
    /// * `Err(AuthError)` - DuplicateUsername / DuplicateEmail / InternalError
    pub async fn create_user(&self, data: &SignupRequest) -> Result<user::Model, AuthError> {
        // Check if username already exists
        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(&data.username))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        if existing.is_some() {
            return Err(AuthError::duplicate_username());
        }

        // Check if email already exists
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(&data.email))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        if existing.is_some() {
            return Err(AuthError::duplicate_email());
        }

        let password_hash = self.passwords.hash(&data.password)?;

        let new_user = user::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            username: Set(data.username.clone()),
            email: Set(data.email.clone()),
            phone_number: Set(data.phone_number.clone()),
            password_hash: Set(password_hash),
            is_admin: Set(false),
            is_banned: Set(false),
            status: Set(false),
            created_at: Set(Utc::now().timestamp()),
        };

        // The unique indexes are the backstop for races the pre-checks miss
        new_user.insert(&self.db).await.map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                if msg.contains("email") {
                    AuthError::duplicate_email()
                } else {
                    AuthError::duplicate_username()
                }
            } else {
                AuthError::internal_error(format!("Database error: {}", e))
            }
        })
    }

    /// Verify login credentials and return the account on success
    ///
    /// Unknown username, wrong password and banned account all collapse into
    /// InvalidCredentials so none of them is distinguishable from outside.
    pub async fn verify_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<user::Model, AuthError> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|_| AuthError::invalid_credentials())?;

        let user = user.ok_or_else(AuthError::invalid_credentials)?;

        if !self.passwords.verify(password, &user.password_hash) {
            return Err(AuthError::invalid_credentials());
        }

        if user.is_banned {
            return Err(AuthError::invalid_credentials());
        }

        Ok(user)
    }

    /// Load a user by id
    pub async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, AuthError> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }

    /// Load a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, AuthError> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }

    /// Mark a user as banned
    ///
    /// # Returns
    /// * `Ok(true)` - User was banned
    /// * `Ok(false)` - No user with that id
    pub async fn ban_user(&self, id: i32) -> Result<bool, AdminError> {
        let user = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AdminError::internal_error(format!("Database error: {}", e)))?;

        let Some(user) = user else {
            return Ok(false);
        };

        let mut active: user::ActiveModel = user.into();
        active.is_banned = Set(true);
        active
            .update(&self.db)
            .await
            .map_err(|e| AdminError::internal_error(format!("Database error: {}", e)))?;

        Ok(true)
    }

    /// Grant or revoke the admin role by username. Used by the CLI.
    ///
    /// # Returns
    /// * `Ok(true)` - Role changed
    /// * `Ok(false)` - No user with that username
    pub async fn set_admin(&self, username: &str, is_admin: bool) -> Result<bool, DbErr> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        let Some(user) = user else {
            return Ok(false);
        };

        let mut active: user::ActiveModel = user.into();
        active.is_admin = Set(is_admin);
        active.update(&self.db).await?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_test_store() -> (DatabaseConnection, UserStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let store = UserStore::new(db.clone(), Arc::new(PasswordService::new()));

        (db, store)
    }

    fn signup(username: &str, email: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            phone_number: "555-0100".to_string(),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_persists_with_defaults() {
        let (_db, store) = setup_test_store().await;

        let user = store
            .create_user(&signup("newuser", "new@example.com"))
            .await
            .unwrap();

        assert_eq!(user.username, "newuser");
        assert_eq!(user.email, "new@example.com");
        assert!(!user.is_admin);
        assert!(!user.is_banned);
        assert!(!user.status);
    }

    #[tokio::test]
    async fn test_create_user_never_stores_plaintext() {
        let (db, store) = setup_test_store().await;

        store
            .create_user(&signup("hashcheck", "hash@example.com"))
            .await
            .unwrap();

        let user = user::Entity::find()
            .filter(user::Column::Username.eq("hashcheck"))
            .one(&db)
            .await
            .unwrap()
            .unwrap();

        assert_ne!(user.password_hash, "password123");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let (_db, store) = setup_test_store().await;

        store
            .create_user(&signup("duplicate", "first@example.com"))
            .await
            .unwrap();

        // Same username, different email
        let result = store
            .create_user(&signup("duplicate", "second@example.com"))
            .await;

        match result {
            Err(AuthError::DuplicateUsername(_)) => {}
            other => panic!("Expected DuplicateUsername, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (_db, store) = setup_test_store().await;

        store
            .create_user(&signup("first", "shared@example.com"))
            .await
            .unwrap();

        // Same email, different username
        let result = store.create_user(&signup("second", "shared@example.com")).await;

        match result {
            Err(AuthError::DuplicateEmail(_)) => {}
            other => panic!("Expected DuplicateEmail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_verify_login_succeeds_with_correct_password() {
        let (_db, store) = setup_test_store().await;

        let created = store
            .create_user(&signup("validuser", "valid@example.com"))
            .await
            .unwrap();

        let user = store.verify_login("validuser", "password123").await.unwrap();

        assert_eq!(user.id, created.id);
    }

    #[tokio::test]
    async fn test_verify_login_fails_with_wrong_password() {
        let (_db, store) = setup_test_store().await;

        store
            .create_user(&signup("validuser", "valid@example.com"))
            .await
            .unwrap();

        let result = store.verify_login("validuser", "wrongpass").await;

        match result {
            Err(AuthError::InvalidCredentials(_)) => {}
            other => panic!("Expected InvalidCredentials, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_verify_login_fails_for_unknown_user() {
        let (_db, store) = setup_test_store().await;

        let result = store.verify_login("nonexistent", "anypassword").await;

        match result {
            Err(AuthError::InvalidCredentials(_)) => {}
            other => panic!("Expected InvalidCredentials, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_banned_user_cannot_log_in() {
        let (_db, store) = setup_test_store().await;

        let user = store
            .create_user(&signup("troublemaker", "trouble@example.com"))
            .await
            .unwrap();

        assert!(store.ban_user(user.id).await.unwrap());

        // Same error as a wrong password, the ban is not leaked
        let result = store.verify_login("troublemaker", "password123").await;

        match result {
            Err(AuthError::InvalidCredentials(_)) => {}
            other => panic!("Expected InvalidCredentials, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ban_user_missing_id_returns_false() {
        let (_db, store) = setup_test_store().await;

        assert!(!store.ban_user(9999).await.unwrap());
    }

    #[tokio::test]
    async fn test_set_admin_grants_role() {
        let (_db, store) = setup_test_store().await;

        let user = store
            .create_user(&signup("promoteme", "promote@example.com"))
            .await
            .unwrap();

        assert!(store.set_admin("promoteme", true).await.unwrap());

        let reloaded = store.find_by_id(user.id).await.unwrap().unwrap();
        assert!(reloaded.is_admin);

        assert!(!store.set_admin("nosuchuser", true).await.unwrap());
    }
}
