use std::sync::Arc;

use rmcp::{
    handler::client::ClientHandler,
    model::{
        self, CallToolRequestParam, ClientInfo, JsonObject, PaginatedRequestParam,
        ReadResourceRequestParam, ResourceContents,
    },
    service::{RoleClient, RoleServer, RunningService, Service, serve_directly},
    transport::async_rw::AsyncRwTransport,
};
use serde_json::{Value, json};
use string_analyzer::{mcp::StringAnalyzerMcpServer, service::StringService};
use tokio::io::split;

#[derive(Clone, Default)]
struct DummyClientHandler;

impl ClientHandler for DummyClientHandler {
    fn get_info(&self) -> ClientInfo {
        ClientInfo::default()
    }
}

struct TestHarness {
    service: RunningService<RoleClient, DummyClientHandler>,
    server: RunningService<RoleServer, StringAnalyzerMcpServer>,
}

impl TestHarness {
    async fn new() -> Self {
        let server = StringAnalyzerMcpServer::new(Arc::new(StringService::in_memory()));

        let (client_stream, server_stream) = tokio::io::duplex(16 * 1024);
        let (client_read, client_write) = split(client_stream);
        let (server_read, server_write) = split(server_stream);

        let client_transport = AsyncRwTransport::new_client(client_read, client_write);
        let server_transport = AsyncRwTransport::new_server(server_read, server_write);

        let server_info = server.get_info();
        let client_handler = DummyClientHandler;
        let client_info = ClientHandler::get_info(&client_handler);

        let server =
            serve_directly::<RoleServer, _, _, _, _>(server, server_transport, Some(client_info));
        let service = serve_directly::<RoleClient, _, _, _, _>(
            client_handler,
            client_transport,
            Some(server_info),
        );

        Self { service, server }
    }

    async fn call(&self, name: &'static str, arguments: Value) -> Value {
        let response = self
            .service
            .call_tool(CallToolRequestParam {
                name: name.into(),
                arguments: Some(object(arguments)),
            })
            .await
            .unwrap_or_else(|err| panic!("{name} tool call failed: {err:?}"));
        assert_eq!(response.is_error, Some(false));
        response.structured_content.expect("structured payload")
    }

    async fn call_err(&self, name: &'static str, arguments: Value) -> model::ErrorData {
        let err = self
            .service
            .call_tool(CallToolRequestParam {
                name: name.into(),
                arguments: Some(object(arguments)),
            })
            .await
            .expect_err("tool call should fail");
        match err {
            rmcp::service::ServiceError::McpError(data) => data,
            other => panic!("expected MCP error, got {other:?}"),
        }
    }

    async fn shutdown(self) {
        let Self { service, server } = self;
        let _ = service.cancel().await;
        let _ = server.cancel().await;
    }
}

fn object(value: Value) -> JsonObject {
    value.as_object().cloned().expect("arguments must be an object")
}

#[tokio::test]
async fn initialize_and_list_tools() {
    let harness = TestHarness::new().await;
    let service = &harness.service;

    let info = service
        .peer_info()
        .expect("server info should be initialized");
    assert_eq!(info.server_info.name, "string-analyzer");
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.resources.is_some());

    let tools_result = service
        .list_tools(Some(PaginatedRequestParam { cursor: None }))
        .await
        .expect("list_tools");
    let names: Vec<_> = tools_result
        .tools
        .iter()
        .map(|tool| tool.name.as_ref())
        .collect();

    for expected in [
        "create-string",
        "get-string",
        "delete-string",
        "list-strings",
        "filter-natural-language",
        "metrics",
    ] {
        assert!(names.contains(&expected), "missing tool {expected}");
    }

    harness.shutdown().await;
}

#[tokio::test]
async fn create_get_and_list_share_the_http_shape() {
    let harness = TestHarness::new().await;

    let created = harness
        .call("create-string", json!({ "value": "racecar" }))
        .await;
    assert_eq!(created["value"], "racecar");
    assert_eq!(created["properties"]["length"], 7);
    assert_eq!(created["properties"]["is_palindrome"], true);
    assert_eq!(created["id"], created["properties"]["sha256_hash"]);
    assert_eq!(created["properties"]["character_frequency_map"]["r"], 2);

    harness
        .call("create-string", json!({ "value": "hello world" }))
        .await;

    let fetched = harness
        .call("get-string", json!({ "value": "racecar" }))
        .await;
    assert_eq!(fetched["id"], created["id"]);

    let listed = harness
        .call("list-strings", json!({ "is_palindrome": false }))
        .await;
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["data"][0]["value"], "hello world");
    assert_eq!(listed["filters_applied"], json!({ "is_palindrome": false }));

    let metrics = harness.call("metrics", json!({})).await;
    assert_eq!(metrics["stringsCreated"], 2);
    assert_eq!(metrics["listQueries"], 1);

    harness.shutdown().await;
}

#[tokio::test]
async fn natural_language_tool_reports_interpretation() {
    let harness = TestHarness::new().await;
    for value in ["aba", "step on no pets", "zebra"] {
        harness.call("create-string", json!({ "value": value })).await;
    }

    let payload = harness
        .call(
            "filter-natural-language",
            json!({ "query": "strings containing the letter z" }),
        )
        .await;
    // The letter rule is overridden by the trailing "contain" rule.
    assert_eq!(
        payload["interpreted_query"]["parsed_filters"],
        json!({ "contains_character": "t" })
    );
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["data"][0]["value"], "step on no pets");

    let payload = harness
        .call(
            "filter-natural-language",
            json!({ "query": "all single word palindromic strings" }),
        )
        .await;
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["data"][0]["value"], "aba");
    assert_eq!(
        payload["interpreted_query"]["original"],
        "all single word palindromic strings"
    );

    harness.shutdown().await;
}

#[tokio::test]
async fn delete_then_get_returns_error() {
    let harness = TestHarness::new().await;
    harness.call("create-string", json!({ "value": "temp" })).await;

    let deleted = harness
        .call("delete-string", json!({ "value": "temp" }))
        .await;
    assert_eq!(deleted["status"], "deleted");

    let err = harness
        .call_err("get-string", json!({ "value": "temp" }))
        .await;
    assert_eq!(err.code, model::ErrorCode::INVALID_PARAMS);

    harness.shutdown().await;
}

#[tokio::test]
async fn invalid_payloads_return_invalid_params() {
    let harness = TestHarness::new().await;

    let err = harness.call_err("create-string", json!({})).await;
    assert_eq!(err.code, model::ErrorCode::INVALID_PARAMS);

    harness.call("create-string", json!({ "value": "dup" })).await;
    let err = harness
        .call_err("create-string", json!({ "value": "dup" }))
        .await;
    assert_eq!(err.code, model::ErrorCode::INVALID_PARAMS);

    let err = harness
        .call_err(
            "list-strings",
            json!({ "min_length": 5, "max_length": 2 }),
        )
        .await;
    assert_eq!(err.code, model::ErrorCode::INVALID_PARAMS);

    let err = harness
        .call_err("filter-natural-language", json!({ "query": "xyzzy" }))
        .await;
    assert_eq!(err.code, model::ErrorCode::INVALID_PARAMS);

    harness.shutdown().await;
}

#[tokio::test]
async fn vocabulary_resource_is_readable() {
    let harness = TestHarness::new().await;

    let result = harness
        .service
        .read_resource(ReadResourceRequestParam {
            uri: "mcp://vocabulary".into(),
        })
        .await
        .expect("read vocabulary");
    let text = match &result.contents[0] {
        ResourceContents::TextResourceContents { text, .. } => text.clone(),
        other => panic!("expected text contents, got {other:?}"),
    };
    let payload: Value = serde_json::from_str(&text).expect("vocabulary JSON");
    assert!(
        payload["phrases"]
            .as_array()
            .is_some_and(|phrases| !phrases.is_empty())
    );

    harness.shutdown().await;
}
