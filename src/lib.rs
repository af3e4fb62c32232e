#![deny(missing_docs)]

//! Core library for the string analyzer service.

/// String analysis and content hashing.
pub mod analysis;
/// HTTP routing and REST handlers.
pub mod api;
/// HTTP client for the REST surface.
pub mod client;
/// Environment-driven configuration management.
pub mod config;
/// Structured filter criteria and evaluation.
pub mod filters;
/// Plain-English query interpretation.
pub mod interpreter;
/// Structured logging and tracing setup.
pub mod logging;
/// Model Context Protocol server implementation.
pub mod mcp;
/// Service activity counters.
pub mod metrics;
/// Service layer shared by every surface.
pub mod service;
/// Record storage backends.
pub mod store;
