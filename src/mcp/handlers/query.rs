//! Handlers for the listing tools.

use std::sync::Arc;

use crate::{
    filters::FilterCriteria,
    mcp::{
        format::{list_payload, natural_language_payload},
        schemas::NaturalLanguageToolRequest,
    },
    service::{StringApi, StringService},
};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject},
};

use super::{map_service_error, parse_arguments};

/// Handle the `list-strings` tool with structured criteria.
pub(crate) async fn handle_list(
    service: &Arc<StringService>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let criteria: FilterCriteria = parse_arguments(arguments)?;
    let outcome = service
        .list_strings(criteria)
        .await
        .map_err(map_service_error)?;
    Ok(CallToolResult::structured(list_payload(outcome)))
}

/// Handle the `filter-natural-language` tool.
pub(crate) async fn handle_natural_language(
    service: &Arc<StringService>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let args: NaturalLanguageToolRequest = parse_arguments(arguments)?;
    let outcome = service
        .filter_by_natural_language(&args.query)
        .await
        .map_err(map_service_error)?;
    Ok(CallToolResult::structured(natural_language_payload(outcome)))
}
