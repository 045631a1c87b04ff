//! MCP server with development tools for this project.
//!
//! # Usage
//!
//! ```bash
//! project-dev
//! project-dev --config ./tui-builder.toml --root .
//! ```

use anyhow::Result;
use clap::Parser;
use dev_server::ProjectDevService;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tui_core::{CONFIG_ENV_VAR, Config};

/// Development tools for agents working on a project.
#[derive(Parser, Debug)]
#[command(name = "project-dev")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the per-user config file)
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Project root; overrides `[project] root`
    #[arg(long)]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        config.project.root = root;
    }

    // stdout carries the protocol
    let default_filter = format!("{},dev_server=debug", config.general.log_level);
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

    tracing::info!("Starting project-dev v{}", env!("CARGO_PKG_VERSION"));

    let service = ProjectDevService::new(config.project)?;
    tracing::info!(root = %service.root().display(), "serving project");

    let running = service.serve(stdio()).await?;
    running.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
