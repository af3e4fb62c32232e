//! Model Context Protocol (MCP) integration for the string analyzer.
//!
//! Exposes the string service over stdio so editors and agent hosts can store and query
//! strings without the HTTP server:
//!
//! - Tools: `create-string`, `get-string`, `delete-string`, `list-strings`,
//!   `filter-natural-language`, and `metrics`.
//! - Resources: `mcp://vocabulary` (phrases the query interpreter understands) and
//!   `mcp://health` (storage mode and record count).

mod format;
pub mod handlers;
mod registry;
mod schemas;
mod server;

pub use server::StringAnalyzerMcpServer;
