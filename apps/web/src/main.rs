//! # Yatube
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use yatube_web::telemetry::{TelemetryConfig, init_telemetry};
use yatube_web::{AppConfig, AppState, configure_routes, fixtures};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting Yatube on {}:{}", config.host, config.port);

    let state = AppState::new(&config).await;

    if let Some(path) = &config.fixtures_path {
        if let Err(e) = fixtures::load(&state, path).await {
            tracing::error!(path = %path.display(), error = %e, "Failed to load fixtures");
            return Err(std::io::Error::other(e));
        }
    }

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
