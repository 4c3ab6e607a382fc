//! Runs the kanban HTTP service.
//!
//! Usage:
//!
//! ```text
//! kanban-server [--config <path>] [--listen <addr>]
//! ```
//!
//! Settings come from the optional TOML file, then `KANBAN_*` environment
//! variables, then the command line. Without `KANBAN_DATABASE_URL` the
//! service keeps its data in memory.

use camino::Utf8PathBuf;
use clap::Parser;
use kanban::api::{self, AppState, Repositories};
use kanban::config::{Config, ConfigError};
use kanban::persistence::{self, PersistenceSetupError};
use kanban::telemetry::{self, TelemetryError};
use kanban::user::services::UserServiceError;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "kanban-server", version, about = "Kanban board HTTP service")]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Address to listen on, overriding configuration.
    #[arg(long)]
    listen: Option<SocketAddr>,
}

/// Errors that stop the server.
#[derive(Debug, Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("database setup failed: {0}")]
    Database(#[from] PersistenceSetupError),
    #[error("database setup task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("failed to seed admin account: {0}")]
    Bootstrap(#[from] UserServiceError),
    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    telemetry::init(&config.log, config.log_format)?;

    let state = AppState::new(open_store(&config).await?);
    if let Some(username) = config.bootstrap_admin.as_deref() {
        let admin = state.users.ensure_admin(username).await?;
        info!(user_id = %admin.id(), username, "bootstrap admin ready");
    }

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(addr = %config.listen_addr, "kanban server listening");
    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("kanban server stopped");
    Ok(())
}

async fn open_store(config: &Config) -> Result<Repositories, ServerError> {
    let Some(url) = config.database_url.clone() else {
        warn!("no database configured; data will not survive a restart");
        return Ok(Repositories::in_memory());
    };
    let pool_size = config.db_pool_size;
    let pool = tokio::task::spawn_blocking(move || {
        let built = persistence::build_pool(&url, pool_size)?;
        persistence::apply_schema(&built)?;
        Ok::<_, PersistenceSetupError>(built)
    })
    .await??;
    info!(pool_size, "connected to PostgreSQL");
    Ok(Repositories::postgres(&pool))
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
