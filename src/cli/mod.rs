use anyhow::Context;
use clap::{Parser, Subcommand};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::app::{router, AppState};
use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, Repositories};

#[derive(Parser)]
#[command(name = "school-news-api")]
#[command(about = "School news and subscription API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overriding HTTP_PORT")]
        port: Option<u16>,

        #[arg(long, help = "Keep all data in process memory instead of PostgreSQL")]
        in_memory: bool,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None, in_memory: false }) {
        Commands::Serve { port, in_memory } => {
            if let Some(port) = port {
                config.http.port = port;
            }
            serve(config, in_memory).await
        }
        Commands::Migrate => {
            config.validate(true).context("invalid configuration")?;
            let pool = DatabaseManager::connect(&config.database).await?;
            DatabaseManager::migrate(&pool).await?;
            DatabaseManager::close(&pool).await;
            Ok(())
        }
    }
}

async fn serve(config: AppConfig, in_memory: bool) -> anyhow::Result<()> {
    config.validate(!in_memory).context("invalid configuration")?;
    let keys = JwtKeys::new(&config.security.jwt_secret)?;

    let (repos, pool) = if in_memory {
        tracing::warn!("Using the in-memory store; data is lost on exit");
        (Repositories::memory(), None)
    } else {
        tracing::info!(database = %config.redacted_database_url(), "Connecting to database");
        let pool = DatabaseManager::connect(&config.database).await?;
        DatabaseManager::migrate(&pool).await?;
        (Repositories::postgres(pool.clone()), Some(pool))
    };

    let state = AppState::new(repos, keys.clone(), &config);
    let app = router(state, &keys, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, environment = ?config.environment, "Server listening");

    run_until_shutdown(listener, app, config.shutdown_grace()).await?;

    if let Some(pool) = pool {
        DatabaseManager::close(&pool).await;
    }
    tracing::info!("Server stopped");
    Ok(())
}

/// Serves until SIGINT/SIGTERM, then gives in-flight requests `grace` to
/// finish before returning regardless.
async fn run_until_shutdown(
    listener: TcpListener,
    app: axum::Router,
    grace: Duration,
) -> anyhow::Result<()> {
    let (signalled_tx, mut signalled_rx) = tokio::sync::watch::channel(false);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!(grace_secs = grace.as_secs(), "Shutting down");
        let _ = signalled_tx.send(true);
    });

    tokio::select! {
        result = server.into_future() => result.context("server error")?,
        _ = async {
            let _ = signalled_rx.changed().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!("Grace period elapsed with requests still in flight");
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
