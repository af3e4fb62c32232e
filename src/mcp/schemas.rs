//! JSON schema builders for MCP tool inputs.

use crate::filters::FilterCriteria;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Arguments for tools addressing a single string by value.
#[derive(Debug, Deserialize, JsonSchema)]
pub(crate) struct ValueToolRequest {
    /// Exact string value, case and whitespace significant.
    pub(crate) value: String,
}

/// Arguments for the `filter-natural-language` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub(crate) struct NaturalLanguageToolRequest {
    /// Plain-English description such as "single word palindromic strings".
    pub(crate) query: String,
}

/// Build the schema describing the `create-string`, `get-string`, and `delete-string` input.
pub(crate) fn value_input_schema() -> Map<String, Value> {
    schema_object::<ValueToolRequest>()
}

/// Build the schema describing the `list-strings` input.
pub(crate) fn list_input_schema() -> Map<String, Value> {
    schema_object::<FilterCriteria>()
}

/// Build the schema describing the `filter-natural-language` input.
pub(crate) fn natural_language_input_schema() -> Map<String, Value> {
    schema_object::<NaturalLanguageToolRequest>()
}

/// Schema for tools that accept no arguments.
pub(crate) fn empty_object_schema() -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(Map::new()));
    schema.insert("additionalProperties".into(), Value::Bool(false));
    schema
}

fn schema_object<T: JsonSchema>() -> Map<String, Value> {
    let root = schemars::schema_for!(T);
    let mut schema = match serde_json::to_value(root) {
        Ok(Value::Object(map)) => map,
        _ => return empty_object_schema(),
    };
    schema.remove("$schema");
    schema.remove("title");
    schema
        .entry("type")
        .or_insert_with(|| Value::String("object".into()));
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_schema_requires_value() {
        let schema = value_input_schema();
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["value"].is_object());
        let required = schema["required"].as_array().expect("required list");
        assert!(required.iter().any(|field| field == "value"));
        assert!(!schema.contains_key("$schema"));
    }

    #[test]
    fn list_schema_exposes_every_criterion_as_optional() {
        let schema = list_input_schema();
        let properties = schema["properties"].as_object().expect("properties");
        for key in [
            "is_palindrome",
            "min_length",
            "max_length",
            "word_count",
            "contains_character",
        ] {
            assert!(properties.contains_key(key), "missing {key}");
        }
        let required = schema
            .get("required")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        assert_eq!(required, 0);
    }

    #[test]
    fn natural_language_schema_requires_query() {
        let schema = natural_language_input_schema();
        let required = schema["required"].as_array().expect("required list");
        assert!(required.iter().any(|field| field == "query"));
    }
}
