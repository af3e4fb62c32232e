//! Formatting helpers shared across MCP handlers and resources.

use crate::{
    api::{ListResponse, NaturalLanguageResponse, StringView},
    interpreter::VOCABULARY,
    service::{HealthSnapshot, ListOutcome, NaturalLanguageOutcome},
    store::StringRecord,
};
use rmcp::model::ResourceContents;
use serde::Serialize;
use serde_json::{Value, json};

pub(crate) const APPLICATION_JSON: &str = "application/json";

/// Render a record the same way the HTTP surface does.
pub(crate) fn record_payload(record: StringRecord) -> Value {
    to_value(&StringView::from(record))
}

/// Render a list outcome the same way `GET /strings` does.
pub(crate) fn list_payload(outcome: ListOutcome) -> Value {
    to_value(&ListResponse::from(outcome))
}

/// Render a natural-language outcome the same way the HTTP filter endpoint does.
pub(crate) fn natural_language_payload(outcome: NaturalLanguageOutcome) -> Value {
    to_value(&NaturalLanguageResponse::from(outcome))
}

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|error| {
        tracing::warn!(%error, "Failed to serialize MCP payload");
        Value::Null
    })
}

/// Describe the phrases understood by the natural-language interpreter.
pub(crate) fn vocabulary_payload() -> String {
    let phrases: Vec<Value> = VOCABULARY
        .iter()
        .map(|(phrase, effect)| json!({ "phrase": phrase, "sets": effect }))
        .collect();
    let payload = json!({
        "phrases": phrases,
        "notes": [
            "Matching is case-insensitive and keyword based.",
            "Later phrases overwrite earlier ones for the same filter.",
            "Queries matching no phrase are rejected.",
        ],
    });
    serialize_json(&payload, "mcp://vocabulary")
}

/// Build the health payload summarizing storage status.
pub(crate) fn health_payload(snapshot: &HealthSnapshot) -> String {
    let payload = json!({
        "storage": snapshot.storage,
        "records": snapshot.records,
    });
    serialize_json(&payload, "mcp://health")
}

/// Serialize a value to JSON, falling back to compact formatting on error.
pub(crate) fn serialize_json<T: Serialize>(value: &T, context_uri: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|error| {
        tracing::warn!(uri = context_uri, %error, "Failed to serialize JSON prettily");
        serde_json::to_string(value).unwrap_or_else(|_| "{}".into())
    })
}

/// Build JSON resource contents for MCP resource responses.
pub(crate) fn json_resource_contents(uri: &str, text: String) -> ResourceContents {
    ResourceContents::TextResourceContents {
        uri: uri.to_string(),
        mime_type: Some(APPLICATION_JSON.into()),
        text,
        meta: None,
    }
}
