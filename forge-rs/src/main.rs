//! forge-rs: DigitalForge metering service
//!
//! Registers users, meters the free generation quota and serves the
//! checkout page.

use forge_rs::api::ApiServer;
use forge_rs::store::AccountStore;
use forge_rs::Config;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forge_rs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting forge-rs v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = if std::path::Path::new("config.toml").exists() {
        info!("Loading configuration from config.toml");
        Config::from_file("config.toml")?
    } else {
        info!("No config file found, using defaults");
        Config::default()
    };
    config.apply_port_env()?;

    info!("  Listening on: {}", config.server.listen_addr);
    info!("  Public dir: {}", config.server.public_dir);
    info!("  Free products per account: {}", config.quota.free_products);

    // Accounts live for the process lifetime only
    let store = Arc::new(AccountStore::new());

    let server = ApiServer::new(&config, store);
    server.run().await?;

    Ok(())
}
