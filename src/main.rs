//! Hantverk API server
//!
//! Reads configuration from `HANTVERK_CONFIG` (optional YAML) and the
//! environment, opens the configured store and serves until Ctrl+C/SIGTERM.

use anyhow::Result;
use hantverk::config::AppConfig;
use hantverk::server::ServerBuilder;
use hantverk::storage;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hantverk=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load()?;
    let store = storage::connect(&config.database).await?;

    tracing::info!(
        backend = store.backend_name(),
        database = config.database.name(),
        "starting Hantverk API"
    );

    let addr = config.server.addr();
    ServerBuilder::new()
        .with_shared_store(store)
        .with_config(config)
        .serve(&addr)
        .await
}
