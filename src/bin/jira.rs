use anyhow::{Context, Result};
use atlassian_mcp::jira::JiraClient;
use atlassian_mcp::server::JiraServer;
use atlassian_mcp::{Config, Product};
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env(Product::Jira)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let jira = JiraClient::from_config(&config).context("failed to build HTTP client")?;
    let server = JiraServer::new(jira, config.max_results_default);

    tracing::info!(
        backend = ?config.backend,
        base_url = %config.base_url,
        "Starting Jira MCP server..."
    );

    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
