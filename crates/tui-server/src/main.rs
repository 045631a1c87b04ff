//! MCP server entry point for building terminal applications.
//!
//! # Usage
//!
//! Run the server via stdio transport:
//!
//! ```bash
//! tui-builder
//! tui-builder --config ./tui-builder.toml
//! ```
//!
//! Or configure in `~/.config/claude/mcp.json`:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "tui-builder": {
//!       "command": "tui-builder"
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tui_core::{CONFIG_ENV_VAR, Config};
use tui_harness::session::SessionOptions;
use tui_server::TuiBuilderService;

/// MCP server for designing, generating and test-driving terminal apps.
#[derive(Parser, Debug)]
#[command(name = "tui-builder")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the per-user config file)
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // stdout carries the protocol
    let default_filter = format!("{},tui_server=debug", config.general.log_level);
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    tracing::info!("Starting tui-builder v{}", env!("CARGO_PKG_VERSION"));

    let options = SessionOptions::from(&config.harness);
    let service = TuiBuilderService::new(options)?.serve(stdio()).await?;
    service.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
