//! Handler for the metrics tool.

use std::sync::Arc;

use crate::service::{StringApi, StringService};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use serde_json::json;

/// Handle the `metrics` tool, returning the current service counters.
pub(crate) async fn handle_metrics(
    service: &Arc<StringService>,
) -> Result<CallToolResult, McpError> {
    let snapshot = service.metrics_snapshot();
    Ok(CallToolResult::structured(json!({
        "stringsCreated": snapshot.strings_created,
        "stringsDeleted": snapshot.strings_deleted,
        "duplicatesRejected": snapshot.duplicates_rejected,
        "listQueries": snapshot.list_queries,
        "naturalLanguageQueries": snapshot.natural_language_queries,
    })))
}
