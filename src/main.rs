//! MCP server - main entry point.
//!
//! Runs in one of two deployment modes:
//! - `api`: the tool/resource API itself
//! - `gateway`: the API-key authenticating BFF relaying to an upstream API

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

use mcp_gateway::gateway::{gateway_router, ApiKeyGate, ProxyClient};
use mcp_gateway::server::{api_router, HttpServer};
use mcp_gateway::{Config, McpService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Serve the tool and resource API.
    Api,
    /// Authenticate callers and relay to the upstream API.
    Gateway,
}

#[derive(Debug, Parser)]
#[command(name = "mcp-server", version, about)]
struct Cli {
    /// Deployment mode.
    #[arg(long, value_enum, default_value_t = Mode::Api)]
    mode: Mode,

    /// JSON configuration file.
    #[arg(long, env = "MCP_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address, overriding configuration.
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen;
    }

    // Initialize observability
    mcp_gateway::observability::init_tracing(&config.observability);

    let router = match cli.mode {
        Mode::Api => {
            tracing::info!("Starting MCP API");
            api_router(McpService::from_config(&config)?)
        }
        Mode::Gateway => {
            config.validate_gateway()?;
            let proxy = ProxyClient::new(&config.upstream)?;
            tracing::info!(upstream = %proxy.base_url(), "Starting MCP gateway");
            gateway_router(proxy, ApiKeyGate::new(config.upstream.api_key.as_str()))
        }
    };

    let addr: SocketAddr = config.server.listen_addr.parse()?;
    let server = HttpServer::new(router, addr, &config.server);

    let shutdown = server.shutdown_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    server.serve().await?;
    Ok(())
}
