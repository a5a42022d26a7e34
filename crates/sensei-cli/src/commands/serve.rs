//! `sensei serve` command.
//!
//! Starts the MCP server over stdio. Stdout carries only protocol
//! messages; all logging goes to stderr.

use std::path::PathBuf;

use clap::Args;

use sensei_config::SenseiConfig;
use sensei_transport_stdio::{McpHandler, McpServer, StdioTransport};

use crate::shared;

/// Start the MCP server on stdio.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Catalog TOML file (defaults to the built-in catalog).
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Override the completion model.
    #[arg(long)]
    pub model: Option<String>,
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs, config: &SenseiConfig) -> anyhow::Result<()> {
    let catalog = shared::load_catalog(args.catalog.as_deref())?;
    let completion = shared::create_completion(&config.completion)?;

    let mut handler_config = shared::handler_config(config);
    if let Some(model) = &args.model {
        handler_config.model = model.clone();
    }
    tracing::info!(
        server = %handler_config.server_name,
        model = %handler_config.model,
        timeout = ?handler_config.completion_timeout,
        "handler configured"
    );

    let handler = McpHandler::new(catalog, completion, handler_config);
    let transport = StdioTransport::new(tokio::io::stdin(), tokio::io::stdout());
    let mut server = McpServer::new(transport, handler);
    tracing::info!("sensei MCP server ready on stdio");

    tokio::select! {
        result = server.run() => {
            result.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
