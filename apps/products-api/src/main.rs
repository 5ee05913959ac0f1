//! Products API - REST server

use axum_helpers::server::create_production_app;
use core_config::load_dotenv;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::MongoConnection;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    load_dotenv();
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        "Connecting to MongoDB at {} (database: {})",
        config.mongodb.redacted_url(),
        config.mongodb.database()
    );

    // A failed open leaves the connection unusable; the server still starts
    // and reports the failure through /api/test-db.
    let connection = MongoConnection::open(&config.mongodb).await;

    let state = AppState {
        config: config.clone(),
        connection: connection.clone(),
    };

    let app = api::app(&state)?;

    info!(
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );

    create_production_app(app, &config.server, SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: closing MongoDB connection");
        connection.close().await;
    })
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}
