//! Handlers for the single-string tools: create, get, and delete.

use std::sync::Arc;

use crate::{
    mcp::{format::record_payload, schemas::ValueToolRequest},
    service::{StringApi, StringService},
};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject},
};
use serde_json::json;

use super::{map_service_error, parse_arguments};

/// Handle the `create-string` tool by analyzing and storing the value.
pub(crate) async fn handle_create(
    service: &Arc<StringService>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let args: ValueToolRequest = parse_arguments(arguments)?;
    let record = service
        .create_string(args.value)
        .await
        .map_err(map_service_error)?;
    Ok(CallToolResult::structured(record_payload(record)))
}

/// Handle the `get-string` tool.
pub(crate) async fn handle_get(
    service: &Arc<StringService>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let args: ValueToolRequest = parse_arguments(arguments)?;
    let record = service
        .get_string(&args.value)
        .await
        .map_err(map_service_error)?;
    Ok(CallToolResult::structured(record_payload(record)))
}

/// Handle the `delete-string` tool.
pub(crate) async fn handle_delete(
    service: &Arc<StringService>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let args: ValueToolRequest = parse_arguments(arguments)?;
    service
        .delete_string(&args.value)
        .await
        .map_err(map_service_error)?;
    Ok(CallToolResult::structured(json!({ "status": "deleted" })))
}
