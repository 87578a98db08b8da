use anyhow::{Context, Result};
use atlassian_mcp::confluence::ConfluenceClient;
use atlassian_mcp::server::ConfluenceServer;
use atlassian_mcp::{Config, Product};
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env(Product::Confluence)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let confluence =
        ConfluenceClient::from_config(&config).context("failed to build HTTP client")?;
    let server = ConfluenceServer::new(confluence);

    tracing::info!(
        backend = ?config.backend,
        base_url = %config.base_url,
        "Starting Confluence MCP server..."
    );

    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
