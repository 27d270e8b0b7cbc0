//! PrestoConfig API server
//!
//! Reads `PRESTOCONFIG_CONFIG` (optional YAML file) and the environment
//! overrides, then serves the configuration API until Ctrl+C or SIGTERM.

use anyhow::Result;
use prestoconfig::config::AppConfig;
use prestoconfig::server::ServerBuilder;
use prestoconfig::storage::InMemoryConfigurationStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("prestoconfig=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load()?;
    let addr = config.addr()?;

    if config.mail.relay_url.is_none() {
        tracing::warn!("MAIL_RELAY_URL not set; branch notifications will only be logged");
    }

    ServerBuilder::from_config(&config)?
        .with_store(InMemoryConfigurationStore::new())
        .serve(addr)
        .await
}
