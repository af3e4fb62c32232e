//! MCP server entrypoint (stdio transport).
//!
//! Exposes the string analyzer's tools and resources over stdio for editor and agent
//! integrations. Shares configuration, including `STRING_STORE_PATH`, with the HTTP binary, so
//! both see the same records when pointed at the same snapshot file (though not while running
//! concurrently).
use anyhow::{Context, Result};
use rmcp::{service::ServiceExt, transport::stdio};
use std::sync::Arc;
use string_analyzer::{config, logging, mcp::StringAnalyzerMcpServer, service::StringService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::init_config().context("invalid configuration")?;
    logging::init_tracing_stderr();

    let service = StringService::from_config(config)
        .await
        .context("failed to open record store")?;
    let server = StringAnalyzerMcpServer::new(Arc::new(service));

    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server over stdio")?;

    service
        .waiting()
        .await
        .context("MCP server terminated unexpectedly")?;

    Ok(())
}
