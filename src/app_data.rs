use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Secrets;
use crate::services::{AccessControl, AuditLogger, PasswordService, TokenService};
use crate::stores::{AuditStore, EventStore, UserStore};

/// Centralized application data following the main-owned stores pattern.
///
/// Every store and service is created once here and shared by the API
/// endpoints, the CLI and the tests. Nothing in the core reaches for global
/// state; the database handle is passed in.
pub struct AppData {
    pub db: DatabaseConnection,
    pub password_service: Arc<PasswordService>,
    pub token_service: Arc<TokenService>,
    pub user_store: Arc<UserStore>,
    pub event_store: Arc<EventStore>,
    pub audit_store: Arc<AuditStore>,
    pub access_control: Arc<AccessControl>,
    pub audit_logger: Arc<AuditLogger>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    pub fn init(db: DatabaseConnection, secrets: &Secrets) -> Self {
        tracing::debug!("Creating stores and services...");

        let password_service = Arc::new(PasswordService::new());
        let token_service = Arc::new(TokenService::new(
            secrets.jwt_secret.clone(),
            secrets.token_ttl_minutes,
        ));

        let user_store = Arc::new(UserStore::new(db.clone(), password_service.clone()));
        let event_store = Arc::new(EventStore::new(db.clone()));
        let audit_store = Arc::new(AuditStore::new(db.clone()));

        let access_control = Arc::new(AccessControl::new(
            token_service.clone(),
            user_store.clone(),
        ));
        let audit_logger = Arc::new(AuditLogger::new(audit_store.clone()));

        tracing::debug!("Stores and services created");

        Self {
            db,
            password_service,
            token_service,
            user_store,
            event_store,
            audit_store,
            access_control,
            audit_logger,
        }
    }
}
