//! Phonebook MCP Server - Main entry point
//!
//! Loads configuration, fetches the phonebook once, then serves MCP over stdio.

use anyhow::Result;
use phonebook_mcp_server::client::{AsyncPhonebookClient, AsyncPhonebookClientImpl};
use phonebook_mcp_server::repositories::{HttpPersonRepository, PersonRepository};
use phonebook_mcp_server::{Config, Messages, PhonebookClient, PhonebookMcpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Config first so its log level drives the filter; RUST_LOG still wins
    let config = Config::from_env();
    let level = config
        .as_ref()
        .map(|cfg| cfg.log_level.as_str())
        .unwrap_or("error");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    // Logging goes to stderr; stdout carries MCP traffic
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Phonebook MCP Server with API URL: {} (locale: {})",
        config.api_base_url, config.locale
    );

    let sync_client = PhonebookClient::new(&config);
    let async_client = Arc::new(AsyncPhonebookClientImpl::new(sync_client));
    let client = async_client.clone() as Arc<dyn AsyncPhonebookClient>;
    let person_repo = Arc::new(HttpPersonRepository::new(client)) as Arc<dyn PersonRepository>;

    let server = PhonebookMcpServer::new(
        person_repo,
        Messages::for_locale(config.locale),
        Duration::from_secs(config.notification_timeout_secs),
    );

    // Initial fetch; a failure leaves an empty list that refresh_persons can retry
    match server.phonebook().load().await {
        Ok(count) => info!("Initial phonebook load: {} persons", count),
        Err(e) => warn!("Initial phonebook load failed: {}", e),
    }

    info!("Starting MCP server with stdio transport");
    phonebook_mcp_server::server::run_server(server).await?;

    info!("Directory calls: {}", async_client.inner().metrics().summary());
    info!("Phonebook MCP Server shutdown complete");
    Ok(())
}
