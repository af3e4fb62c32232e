//! HTTP surface for the string analyzer.
//!
//! A compact Axum router over [`StringApi`]:
//!
//! - `POST /strings` – Analyze and store a string (`201`, or `409` when it already exists).
//! - `GET /strings` – List stored strings filtered by `is_palindrome`, `min_length`,
//!   `max_length`, `word_count`, and `contains_character`.
//! - `GET /strings/filter-by-natural-language?query=` – Same listing driven by a plain-English
//!   query; the response echoes the interpreted filters.
//! - `GET /strings/{value}` / `DELETE /strings/{value}` – Exact lookup and removal by value.
//! - `GET /metrics` – Service counters.
//! - `GET /commands` – Machine-readable command catalog.

use crate::{
    analysis::StringProperties,
    filters::{FilterCriteria, FilterError},
    interpreter::InterpretError,
    service::{ListOutcome, NaturalLanguageOutcome, ServiceError, StringApi},
    store::{StoreError, StringRecord},
};
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use time::OffsetDateTime;

/// Build the HTTP router exposing the string API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: StringApi + 'static,
{
    Router::new()
        .route(
            "/strings",
            get(list_strings::<S>).post(create_string::<S>),
        )
        .route(
            "/strings/filter-by-natural-language",
            get(filter_by_natural_language::<S>),
        )
        .route(
            "/strings/:value",
            get(get_string::<S>).delete(delete_string::<S>),
        )
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .with_state(service)
}

/// Wire representation of a stored string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringView {
    /// Content hash of the value.
    pub id: String,
    /// Stored value.
    pub value: String,
    /// Derived properties.
    pub properties: StringProperties,
    /// Insertion timestamp (RFC 3339).
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<StringRecord> for StringView {
    fn from(record: StringRecord) -> Self {
        Self {
            id: record.hash,
            value: record.value,
            properties: record.properties,
            created_at: record.created_at,
        }
    }
}

/// Response body for `GET /strings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    /// Matching strings.
    pub data: Vec<StringView>,
    /// Number of matching strings.
    pub count: usize,
    /// Filters that were supplied.
    pub filters_applied: FilterCriteria,
}

impl From<ListOutcome> for ListResponse {
    fn from(outcome: ListOutcome) -> Self {
        Self {
            data: outcome.records.into_iter().map(StringView::from).collect(),
            count: outcome.count,
            filters_applied: outcome.criteria,
        }
    }
}

/// Response body for `GET /strings/filter-by-natural-language`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaturalLanguageResponse {
    /// Matching strings.
    pub data: Vec<StringView>,
    /// Number of matching strings.
    pub count: usize,
    /// The query and the filters derived from it.
    pub interpreted_query: InterpretedQuery,
}

/// Query echo included in natural-language responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpretedQuery {
    /// Query text as supplied.
    pub original: String,
    /// Filters derived from the query.
    pub parsed_filters: FilterCriteria,
}

impl From<NaturalLanguageOutcome> for NaturalLanguageResponse {
    fn from(outcome: NaturalLanguageOutcome) -> Self {
        Self {
            data: outcome.records.into_iter().map(StringView::from).collect(),
            count: outcome.count,
            interpreted_query: InterpretedQuery {
                original: outcome.original_query,
                parsed_filters: outcome.parsed_criteria,
            },
        }
    }
}

/// Store a new string.
///
/// The body must be a JSON object with a string `value`; a missing field is a bad request and
/// a non-string value is unprocessable.
async fn create_string<S>(
    State(service): State<Arc<S>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<StringView>), AppError>
where
    S: StringApi,
{
    let Json(body) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let value = match body.get("value") {
        None => {
            return Err(AppError::BadRequest(
                "Invalid request body or missing \"value\" field".into(),
            ));
        }
        Some(Value::String(value)) => value.clone(),
        Some(_) => {
            return Err(AppError::Unprocessable("\"value\" must be a string".into()));
        }
    };

    let record = service.create_string(value).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Fetch a stored string by its exact value.
async fn get_string<S>(
    State(service): State<Arc<S>>,
    Path(value): Path<String>,
) -> Result<Json<StringView>, AppError>
where
    S: StringApi,
{
    let record = service.get_string(&value).await?;
    Ok(Json(record.into()))
}

/// Delete a stored string by its exact value.
async fn delete_string<S>(
    State(service): State<Arc<S>>,
    Path(value): Path<String>,
) -> Result<StatusCode, AppError>
where
    S: StringApi,
{
    service.delete_string(&value).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Query parameters accepted by `GET /strings`.
#[derive(Debug, Default, Deserialize)]
struct ListParams {
    #[serde(default)]
    is_palindrome: Option<bool>,
    #[serde(default)]
    min_length: Option<usize>,
    #[serde(default)]
    max_length: Option<usize>,
    #[serde(default)]
    word_count: Option<usize>,
    #[serde(default)]
    contains_character: Option<String>,
}

impl ListParams {
    fn into_criteria(self) -> Result<FilterCriteria, AppError> {
        let contains_character = self
            .contains_character
            .map(|raw| {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok(ch),
                    _ => Err(AppError::BadRequest(
                        "contains_character must be exactly one character".into(),
                    )),
                }
            })
            .transpose()?;
        Ok(FilterCriteria {
            is_palindrome: self.is_palindrome,
            min_length: self.min_length,
            max_length: self.max_length,
            word_count: self.word_count,
            contains_character,
        })
    }
}

/// List stored strings matching the supplied filters.
async fn list_strings<S>(
    State(service): State<Arc<S>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse>, AppError>
where
    S: StringApi,
{
    let Query(params) = params.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let criteria = params.into_criteria()?;
    let outcome = service.list_strings(criteria).await?;
    Ok(Json(outcome.into()))
}

#[derive(Debug, Deserialize)]
struct NaturalLanguageParams {
    #[serde(default)]
    query: Option<String>,
}

/// Interpret a plain-English query and list the matching strings.
async fn filter_by_natural_language<S>(
    State(service): State<Arc<S>>,
    params: Result<Query<NaturalLanguageParams>, QueryRejection>,
) -> Result<Json<NaturalLanguageResponse>, AppError>
where
    S: StringApi,
{
    let Query(params) = params.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let query = params
        .query
        .ok_or_else(|| AppError::BadRequest("Missing \"query\" parameter".into()))?;
    let outcome = service.filter_by_natural_language(&query).await?;
    tracing::info!(
        query = %outcome.original_query,
        matches = outcome.count,
        "Natural language filter completed"
    );
    Ok(Json(outcome.into()))
}

/// Return the service counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<crate::metrics::MetricsSnapshot>
where
    S: StringApi,
{
    Json(service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery by hosts and tools.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "create_string",
                method: "POST",
                path: "/strings",
                description: "Analyze a string and store it. Returns 409 when the same value is already stored.",
                request_example: Some(json!({ "value": "racecar" })),
            },
            CommandDescriptor {
                name: "get_string",
                method: "GET",
                path: "/strings/{value}",
                description: "Fetch a stored string and its properties by exact (URL-encoded) value.",
                request_example: None,
            },
            CommandDescriptor {
                name: "delete_string",
                method: "DELETE",
                path: "/strings/{value}",
                description: "Delete a stored string by exact (URL-encoded) value.",
                request_example: None,
            },
            CommandDescriptor {
                name: "list_strings",
                method: "GET",
                path: "/strings",
                description: "List stored strings. Optional filters: is_palindrome, min_length, max_length, word_count, contains_character.",
                request_example: Some(json!({
                    "is_palindrome": true,
                    "min_length": 3,
                    "max_length": 20,
                    "word_count": 1,
                    "contains_character": "a"
                })),
            },
            CommandDescriptor {
                name: "filter_by_natural_language",
                method: "GET",
                path: "/strings/filter-by-natural-language",
                description: "List stored strings matching a plain-English query such as \"single word palindromic strings\".",
                request_example: Some(json!({ "query": "strings longer than 10 characters" })),
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return service counters useful for observability dashboards.",
                request_example: None,
            },
        ],
    })
}

/// Errors rendered by HTTP handlers as `{"error": "..."}` bodies.
#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Unprocessable(String),
    Service(ServiceError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Service(err) => match err {
                ServiceError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
                ServiceError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
                ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                ServiceError::Filter(FilterError::InvalidRange { .. }) => StatusCode::BAD_REQUEST,
                ServiceError::Interpret(InterpretError::Unparseable) => StatusCode::BAD_REQUEST,
                ServiceError::Interpret(InterpretError::Conflict { .. }) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ServiceError::EmptyQuery | ServiceError::QueryTooLong { .. } => {
                    StatusCode::BAD_REQUEST
                }
            },
        }
    }

    fn message(&self) -> String {
        match self {
            Self::BadRequest(message) | Self::Unprocessable(message) => message.clone(),
            Self::Service(err) => err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.message(), "Request failed");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(inner: ServiceError) -> Self {
        Self::Service(inner)
    }
}
