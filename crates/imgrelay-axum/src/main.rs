//! imgrelay entry point.
//!
//! Loads configuration from the environment (a local `.env` is honored),
//! initializes tracing and runs the server until the process is stopped.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use imgrelay_axum::{ServerConfig, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    start_server(config).await
}
