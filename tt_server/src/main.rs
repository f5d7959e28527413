//! Task tracking server with database-backed authentication.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use pico_args::Arguments;
use task_tracker::{
    auth::{AuthManager, TokenService},
    db::Database,
    task::TaskManager,
};
use tracing::info;
use tt_server::{api, config::ServerConfig, logging};

const HELP: &str = "\
Run a per-user task tracking server

USAGE:
  tt_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:7000]
  --db-url     URL         Database connection string  [default: env DATABASE_URL or sqlite:task_tracker.db?mode=rwc]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:7000)
  DATABASE_URL             SQLite connection string
  ACCESS_TOKEN_SECRET      Access-token signing secret (required)
  REFRESH_TOKEN_SECRET     Refresh-token signing secret (required)
  (See .env.example for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.value_from_str("--bind").ok();
    let database_url_override: Option<String> = pargs.value_from_str("--db-url").ok();

    logging::init();

    // Missing or weak token secrets are startup-fatal.
    let config = ServerConfig::from_env(bind_override, database_url_override)
        .map_err(|e| anyhow::anyhow!("Configuration error: {e}"))?;

    info!("Starting task tracking server at {}", config.bind);

    // Initialize database
    info!("Connecting to database: {}", config.database.url);
    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database: {e}"))?;
    db.migrate()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to apply schema: {e}"))?;

    // Create managers
    let pool = Arc::new(db.pool().clone());
    let tokens = TokenService::new(
        config.security.access_token_secret.clone(),
        config.security.refresh_token_secret.clone(),
    );
    let auth_manager = Arc::new(AuthManager::new(pool.clone(), tokens));
    let task_manager = Arc::new(TaskManager::new(pool.clone()));

    let state = api::AppState {
        auth_manager,
        task_manager,
        pool,
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {e}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {e}"))?;

    info!("Shutting down server...");
    db.close().await;

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
