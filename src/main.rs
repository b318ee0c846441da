//! openai-mcp: MCP stdio server for OpenAI chat completions.
//!
//! Usage:
//!   openai-mcp [serve]      Run the MCP server on stdin/stdout
//!   openai-mcp tools        Print the advertised tool descriptors
//!   openai-mcp status       Show resolved configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use openai_mcp::config::{self, GatewayConfig};
use openai_mcp::mcp::{McpHandler, StdioServer};
use openai_mcp::openai::{ApiKey, ChatCompletion, OpenAiClient};
use openai_mcp::tools::ToolGateway;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "openai-mcp")]
#[command(version)]
#[command(about = "MCP server exposing OpenAI chat completions as a tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the config file.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log level (debug, info, warn, error). Overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP server over stdio (default).
    Serve,

    /// Print the tool descriptors as JSON.
    Tools,

    /// Show the resolved configuration and credential status.
    Status,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(config::expand_path)
        .unwrap_or_else(config::default_config_path);
    let cfg = config::resolve_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // Logs go to stderr; stdout carries the protocol.
    let level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => cmd_serve(cfg).await,
        Commands::Tools => cmd_tools(cfg),
        Commands::Status => cmd_status(cfg, &config_path),
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

async fn cmd_serve(cfg: GatewayConfig) -> Result<()> {
    let api_key = ApiKey::from_env(&cfg.api_key_env)?;
    let client = OpenAiClient::new(&cfg, api_key)?;
    let gateway = Arc::new(ToolGateway::new(Arc::new(client)));
    let server = StdioServer::new(McpHandler::new(gateway));

    info!(base_url = %cfg.api_base_url, "OpenAI MCP server running on stdio");

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if watch_interrupts(tokio::signal::ctrl_c, signal_cancel).await {
            warn!("Second Ctrl+C, exiting without waiting for in-flight calls");
            std::process::exit(130);
        }
    });

    if let Err(e) = server.run_stdio(cancel).await {
        error!("Server error: {:#}", e);
        return Err(e);
    }
    Ok(())
}

fn cmd_tools(cfg: GatewayConfig) -> Result<()> {
    // Listing needs no credential; the client is never called.
    let gateway = ToolGateway::new(Arc::new(Offline(cfg.api_base_url)));
    let json = serde_json::to_string_pretty(gateway.list_tools())?;
    println!("{}", json);
    Ok(())
}

fn cmd_status(cfg: GatewayConfig, config_path: &Path) -> Result<()> {
    let config_state = if config_path.exists() {
        "loaded".green().to_string()
    } else {
        "not found, using defaults".yellow().to_string()
    };
    let credential = match ApiKey::from_env(&cfg.api_key_env) {
        Ok(key) => key.masked().green().to_string(),
        Err(_) => "missing".red().bold().to_string(),
    };

    println!();
    println!("{}", "=== openai-mcp Status ===".bold());
    println!();
    println!("  {}:   {} ({})", "Config".bold(), config_path.display(), config_state);
    println!("  {}:  {}", "API URL".bold(), cfg.api_base_url);
    println!("  {}:  {} = {}", "API key".bold(), cfg.api_key_env, credential);
    println!("  {}:  {}s", "Timeout".bold(), cfg.request_timeout_secs);
    println!("  {}:   {}", "Models".bold(), openai_mcp::types::ChatModel::allow_list());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// First interrupt cancels the server loop. Returns `true` when a second one
/// arrives, meaning the caller should stop immediately.
async fn watch_interrupts<I, Fut>(mut interrupt: I, cancel: CancellationToken) -> bool
where
    I: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    if interrupt().await.is_err() {
        return false;
    }
    info!("Received Ctrl+C, shutting down (press again to force)");
    cancel.cancel();
    interrupt().await.is_ok()
}

/// Stand-in backend for commands that only inspect descriptors.
struct Offline(String);

#[async_trait::async_trait]
impl ChatCompletion for Offline {
    async fn complete(
        &self,
        _model: openai_mcp::types::ChatModel,
        _messages: &[openai_mcp::types::ChatMessage],
    ) -> Result<Option<String>> {
        anyhow::bail!("offline: no client configured for {}", self.0)
    }
}
