//! Starter MCP server.
//!
//! Copy this binary and [`dev_server::StarterService`] to begin a new server.

use anyhow::Result;
use dev_server::StarterService;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,dev_server=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    tracing::info!("Starting starter-mcp v{}", env!("CARGO_PKG_VERSION"));

    let service = StarterService::new().serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
