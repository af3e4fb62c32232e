//! MCP server bootstrap and request dispatch.

use std::{borrow::Cow, sync::Arc};

use crate::{
    mcp::{
        format::{health_payload, json_resource_contents, vocabulary_payload},
        handlers::{
            map_service_error,
            metrics::handle_metrics,
            query::{handle_list, handle_natural_language},
            strings::{handle_create, handle_delete, handle_get},
        },
        registry::{Registry, ResourceFuture, ToolFuture},
        schemas,
    },
    service::StringService,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::{
        AnnotateAble, CallToolRequestParam, CallToolResult, ListResourcesResult, ListToolsResult,
        RawResource, ReadResourceRequestParam, ReadResourceResult, Resource, ServerCapabilities,
        ServerInfo, Tool, ToolAnnotations,
    },
};

const VOCABULARY_URI: &str = "mcp://vocabulary";
const HEALTH_URI: &str = "mcp://health";

/// MCP server implementation exposing the string service.
#[derive(Clone)]
pub struct StringAnalyzerMcpServer {
    service: Arc<StringService>,
    registry: Arc<Registry>,
}

impl StringAnalyzerMcpServer {
    /// Create a new MCP server around the supplied service.
    pub fn new(service: Arc<StringService>) -> Self {
        let registry = Registry::default()
            .with_resource(VOCABULARY_URI, resource_vocabulary)
            .with_resource(HEALTH_URI, resource_health)
            .with_tool("create-string", tool_create)
            .with_tool("get-string", tool_get)
            .with_tool("delete-string", tool_delete)
            .with_tool("list-strings", tool_list)
            .with_tool("filter-natural-language", tool_natural_language)
            .with_tool("metrics", tool_metrics);

        Self {
            service,
            registry: Arc::new(registry),
        }
    }

    fn describe_tools(&self) -> Vec<Tool> {
        let value_schema = Arc::new(schemas::value_input_schema());
        vec![
            Tool {
                name: Cow::Borrowed("create-string"),
                title: Some("Store String".to_string()),
                description: Some(Cow::Borrowed(
                    "Analyze a string (length, palindrome, word count, character frequencies, SHA-256) and store it. Fails if it is already stored.",
                )),
                input_schema: value_schema.clone(),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Store String")
                        .destructive(false)
                        .idempotent(false)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed("get-string"),
                title: Some("Get String".to_string()),
                description: Some(Cow::Borrowed(
                    "Fetch a stored string and its properties by exact value.",
                )),
                input_schema: value_schema.clone(),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Get String")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed("delete-string"),
                title: Some("Delete String".to_string()),
                description: Some(Cow::Borrowed("Remove a stored string by exact value.")),
                input_schema: value_schema,
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Delete String")
                        .destructive(true)
                        .idempotent(false)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed("list-strings"),
                title: Some("List Strings".to_string()),
                description: Some(Cow::Borrowed(
                    "List stored strings, optionally filtered by palindrome flag, length bounds, word count, or a contained character.",
                )),
                input_schema: Arc::new(schemas::list_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("List Strings")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed("filter-natural-language"),
                title: Some("Filter By Description".to_string()),
                description: Some(Cow::Borrowed(
                    "List stored strings matching a plain-English description; see mcp://vocabulary for recognized phrases.",
                )),
                input_schema: Arc::new(schemas::natural_language_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Filter By Description")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed("metrics"),
                title: Some("Metrics Snapshot".to_string()),
                description: Some(Cow::Borrowed(
                    "Check how many strings were stored, deleted, rejected, and queried.",
                )),
                input_schema: Arc::new(schemas::empty_object_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Metrics Snapshot")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
        ]
    }

    fn describe_resources(&self) -> Vec<Resource> {
        let mut vocabulary = RawResource::new(VOCABULARY_URI, "vocabulary");
        vocabulary.description =
            Some("Phrases understood by filter-natural-language and the filters they set".into());

        let mut health = RawResource::new(HEALTH_URI, "health");
        health.description = Some("Storage mode and number of stored strings".into());

        vec![vocabulary.no_annotation(), health.no_annotation()]
    }
}

fn resource_vocabulary(
    _service: Arc<StringService>,
    _request: ReadResourceRequestParam,
) -> ResourceFuture {
    Box::pin(async move {
        Ok(ReadResourceResult {
            contents: vec![json_resource_contents(VOCABULARY_URI, vocabulary_payload())],
        })
    })
}

fn resource_health(
    service: Arc<StringService>,
    _request: ReadResourceRequestParam,
) -> ResourceFuture {
    Box::pin(async move {
        let snapshot = service.health().await.map_err(map_service_error)?;
        Ok(ReadResourceResult {
            contents: vec![json_resource_contents(HEALTH_URI, health_payload(&snapshot))],
        })
    })
}

fn tool_create(service: Arc<StringService>, request: CallToolRequestParam) -> ToolFuture {
    Box::pin(async move { handle_create(&service, request.arguments).await })
}

fn tool_get(service: Arc<StringService>, request: CallToolRequestParam) -> ToolFuture {
    Box::pin(async move { handle_get(&service, request.arguments).await })
}

fn tool_delete(service: Arc<StringService>, request: CallToolRequestParam) -> ToolFuture {
    Box::pin(async move { handle_delete(&service, request.arguments).await })
}

fn tool_list(service: Arc<StringService>, request: CallToolRequestParam) -> ToolFuture {
    Box::pin(async move { handle_list(&service, request.arguments).await })
}

fn tool_natural_language(service: Arc<StringService>, request: CallToolRequestParam) -> ToolFuture {
    Box::pin(async move { handle_natural_language(&service, request.arguments).await })
}

fn tool_metrics(service: Arc<StringService>, _request: CallToolRequestParam) -> ToolFuture {
    Box::pin(async move { handle_metrics(&service).await })
}

impl ServerHandler for StringAnalyzerMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut implementation = rmcp::model::Implementation::from_build_env();
        implementation.name = "string-analyzer".to_string();
        implementation.title = Some("String Analyzer MCP".to_string());
        implementation.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: implementation,
            instructions: Some(
                "Store strings to get their derived properties (length, palindrome, word count, character frequencies, SHA-256), then list them with structured filters or a plain-English description.".into(),
            ),
            ..ServerInfo::default()
        }
    }

    fn list_resources(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        let resources = self.describe_resources();
        std::future::ready(Ok(ListResourcesResult::with_all_items(resources)))
    }

    fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let tools = self.describe_tools();
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        let started = self.registry.read_resource(&self.service, request);
        async move { started?.await }
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        let started = self.registry.call_tool(&self.service, request);
        async move { started?.await }
    }
}
