use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use storefront_db::{Database, DatabaseConfig, Stores};
use storefront_server::app::build_app;
use storefront_server::config::ServerConfig;
use storefront_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env();

    let level = if config.dev_mode { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("storefront_server={level}").parse()?),
        )
        .with_target(false)
        .init();

    let db = Database::connect(&DatabaseConfig::from_env()?).await?;
    db.migrate().await?;

    let state = Arc::new(AppState {
        stores: Stores::postgres(&db),
    });

    let app = build_app(config, state);

    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    if config.dev_mode {
        println!("Server is running at http://localhost:{}", config.port);
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
