use clap::Parser;
use tracing_subscriber::EnvFilter;

use school_news_api::cli::{self, Cli};
use school_news_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL and JWT_SECRET can live there.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("school_news_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Starting school news API in {:?} mode", config.environment);

    cli::run(Cli::parse(), config).await
}
