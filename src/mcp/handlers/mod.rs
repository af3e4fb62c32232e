//! Tool handlers for the MCP server.

use crate::{service::ServiceError, store::StoreError};
use rmcp::{ErrorData as McpError, model::JsonObject};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod metrics;
pub mod query;
pub mod strings;

/// Parse structured arguments supplied to a tool invocation.
pub(crate) fn parse_arguments<T: DeserializeOwned>(
    arguments: Option<JsonObject>,
) -> Result<T, McpError> {
    let value = arguments
        .map(Value::Object)
        .unwrap_or_else(|| Value::Object(JsonObject::new()));
    serde_json::from_value(value)
        .map_err(|err| McpError::invalid_params(format!("Invalid arguments: {err}"), None))
}

/// Map service failures onto MCP errors; caller mistakes become `invalid_params`.
pub(crate) fn map_service_error(err: ServiceError) -> McpError {
    match err {
        ServiceError::Store(StoreError::Io { .. } | StoreError::Snapshot { .. }) => {
            McpError::internal_error(err.to_string(), None)
        }
        other => McpError::invalid_params(other.to_string(), None),
    }
}
