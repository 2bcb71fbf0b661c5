use clap::Parser;
use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;

use pulse_backend::api::{AdminApi, AuthApi, EventsApi, HealthApi};
use pulse_backend::app_data::AppData;
use pulse_backend::cli::{self, Cli, Commands};
use pulse_backend::config::{self, Secrets};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    config::init_logging()?;

    let args = Cli::parse();

    // Connect to database and bring the schema up to date
    let db = config::database::connect().await?;
    Migrator::up(&db, None).await?;
    tracing::info!("Database migrations completed");

    match args.command {
        Some(Commands::Migrate) => Ok(()),
        Some(Commands::Admin(command)) => {
            let secrets = Secrets::from_env()?;
            let app_data = AppData::init(db, &secrets);
            cli::admin::run(&app_data, command).await
        }
        None => {
            let secrets = Secrets::from_env()?;
            let app_data = AppData::init(db, &secrets);
            serve(app_data).await
        }
    }
}

async fn serve(app_data: AppData) -> Result<(), Box<dyn std::error::Error>> {
    let auth_api = AuthApi::new(
        app_data.user_store.clone(),
        app_data.token_service.clone(),
        app_data.access_control.clone(),
        app_data.audit_logger.clone(),
    );
    let events_api = EventsApi::new(
        app_data.event_store.clone(),
        app_data.access_control.clone(),
        app_data.audit_logger.clone(),
    );
    let admin_api = AdminApi::new(
        app_data.user_store.clone(),
        app_data.event_store.clone(),
        app_data.access_control.clone(),
        app_data.audit_logger.clone(),
    );

    let api_service = OpenApiService::new(
        (HealthApi, auth_api, events_api, admin_api),
        "Community Pulse API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("http://localhost:8000/api");

    let ui = api_service.swagger_ui();

    // Compose routes: API under /api, Swagger UI under /swagger
    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    tracing::info!("Starting server on http://{}", bind_addr);

    Server::new(TcpListener::bind(bind_addr)).run(app).await?;

    Ok(())
}
