// Common test utilities for integration tests

use migration::{Migrator, MigratorTrait};
use poem_openapi::auth::Bearer;
use sea_orm::{Database, DatabaseConnection};

use pulse_backend::api::auth::BearerAuth;
use pulse_backend::api::{AdminApi, AuthApi, EventsApi};
use pulse_backend::app_data::AppData;
use pulse_backend::config::Secrets;
use pulse_backend::types::dto::auth::SignupRequest;
use pulse_backend::types::dto::event::EventPayload;

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Secrets for tests; never read from the environment
pub fn test_secrets() -> Secrets {
    Secrets {
        jwt_secret: "test-secret-key-minimum-32-characters-long".to_string(),
        token_ttl_minutes: 30,
    }
}

/// Fully wired application plus the API endpoint structs
pub struct TestApp {
    pub app_data: AppData,
    pub auth: AuthApi,
    pub events: EventsApi,
    pub admin: AdminApi,
}

/// Creates a test app backed by an in-memory database
pub async fn setup_test_app() -> TestApp {
    let db = setup_test_db().await;
    let app_data = AppData::init(db, &test_secrets());

    let auth = AuthApi::new(
        app_data.user_store.clone(),
        app_data.token_service.clone(),
        app_data.access_control.clone(),
        app_data.audit_logger.clone(),
    );
    let events = EventsApi::new(
        app_data.event_store.clone(),
        app_data.access_control.clone(),
        app_data.audit_logger.clone(),
    );
    let admin = AdminApi::new(
        app_data.user_store.clone(),
        app_data.event_store.clone(),
        app_data.access_control.clone(),
        app_data.audit_logger.clone(),
    );

    TestApp {
        app_data,
        auth,
        events,
        admin,
    }
}

/// Create a user directly through the store and hand back (id, bearer token)
pub async fn signup_and_login(app: &TestApp, username: &str) -> (i32, String) {
    let user = app
        .app_data
        .user_store
        .create_user(&SignupRequest {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            phone_number: "555-0100".to_string(),
            password: "password123".to_string(),
        })
        .await
        .expect("Failed to create test user");

    let token = app
        .app_data
        .token_service
        .issue(user.id)
        .expect("Failed to issue test token");

    (user.id, token)
}

/// As `signup_and_login`, but with the admin role granted
pub async fn signup_admin(app: &TestApp, username: &str) -> (i32, String) {
    let (id, token) = signup_and_login(app, username).await;

    app.app_data
        .user_store
        .set_admin(username, true)
        .await
        .expect("Failed to grant admin role");

    (id, token)
}

/// Wrap a token string the way the endpoints expect it
pub fn bearer(token: &str) -> BearerAuth {
    BearerAuth(Bearer {
        token: token.to_string(),
    })
}

/// A minimal valid event payload
pub fn event_payload(name: &str) -> EventPayload {
    EventPayload {
        name: name.to_string(),
        description: Some("a neighborhood gathering".to_string()),
        location: Some("community center".to_string()),
        start_datetime: 1_900_000_000,
        end_datetime: 1_900_007_200,
        registration_start_datetime: 1_890_000_000,
        registration_end_datetime: 1_899_999_999,
        photos: Vec::new(),
        category: Some("community".to_string()),
    }
}
