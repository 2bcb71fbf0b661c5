use sea_orm::{Database, DatabaseConnection, DbErr};
use std::env;

/// Database URL from the environment, defaulting to a local sqlite file
pub fn database_url() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://pulse.db?mode=rwc".to_string())
}

/// Connect to the configured database
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let url = database_url();

    tracing::info!("Connecting to database: {}", url);

    Database::connect(&url).await
}
