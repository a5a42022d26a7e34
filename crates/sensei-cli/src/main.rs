//! sensei CLI - MCP dispatcher for AI-assisted developer tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
pub(crate) mod shared;

/// sensei - code generation, review and debugging tools over MCP.
#[derive(Debug, Parser)]
#[command(name = "sensei", version, about)]
struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain (default) or json (for log aggregation).
    #[arg(long, global = true, default_value = "plain", value_parser = ["plain", "json"])]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the MCP server on stdio.
    Serve(commands::serve::ServeArgs),
    /// List catalog tools, prompts and resources.
    List(commands::list::ListArgs),
    /// Chat with the configured model in the terminal.
    Chat(commands::chat::ChatArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = sensei_config::load_config(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    // Initialize tracing. Stdout belongs to the protocol; logs go to stderr.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    match cli.log_format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    };

    tracing::debug!(config = ?config, "sensei starting");

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::List(args) => commands::list::execute(args),
        Commands::Chat(args) => commands::chat::execute(args, &config).await,
    }
}
