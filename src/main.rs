// This is the entry point of the Google Sheets MCP server.
//
// **Architecture Overview:**
// - `core/` = Business logic (sheets operations, error classification)
// - `infra/` = Implementations of core traits (Google auth, Sheets REST API)
// - `mcp/` = MCP-specific adapters (tool schemas, replies, server handler)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Serve MCP over stdio until the client disconnects

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;
#[path = "mcp/mcp_layer.rs"]
mod mcp;

mod config;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use rmcp::transport::stdio;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use crate::config::{ServerConfig, CREDENTIALS_ENV};
use crate::core::sheets::SheetsService;
use crate::infra::google_sheets::GoogleSheetsProvider;
use crate::mcp::SheetsToolServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Google Sheets MCP Server...");
    tracing::info!(
        "Ensure {} is set to the path of your service account key file.",
        CREDENTIALS_ENV
    );

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // The Sheets client itself is built lazily on the first tool call, so a
    // missing credential only fails that call, not startup.

    let config = ServerConfig::from_env();
    if config.credentials_path.is_none() {
        tracing::warn!("{} is not set; tool calls will fail until it is", CREDENTIALS_ENV);
    }

    let provider = GoogleSheetsProvider::new(config);
    let sheets_service = Arc::new(SheetsService::new(Box::new(provider)));

    // ========================================================================
    // MCP SERVER
    // ========================================================================

    let server = SheetsToolServer::new(Arc::clone(&sheets_service))
        .serve(stdio())
        .await?;
    server.waiting().await?;

    tracing::info!("Google Sheets MCP Server stopped");
    Ok(())
}
