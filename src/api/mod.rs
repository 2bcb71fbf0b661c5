// API layer - HTTP endpoints
pub mod admin;
pub mod auth;
pub mod events;
pub mod health;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use events::EventsApi;
pub use health::HealthApi;
