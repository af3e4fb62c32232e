//! Dispatch tables for MCP tools and resources.

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use rmcp::ErrorData as McpError;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ReadResourceRequestParam, ReadResourceResult,
};

use crate::service::StringService;

pub(crate) type ResourceFuture =
    Pin<Box<dyn Future<Output = Result<ReadResourceResult, McpError>> + Send>>;
pub(crate) type ToolFuture =
    Pin<Box<dyn Future<Output = Result<CallToolResult, McpError>> + Send>>;

pub(crate) type ResourceHandler = fn(Arc<StringService>, ReadResourceRequestParam) -> ResourceFuture;
pub(crate) type ToolHandler = fn(Arc<StringService>, CallToolRequestParam) -> ToolFuture;

/// Handlers keyed by tool name and resource URI.
#[derive(Default)]
pub(crate) struct Registry {
    resources: HashMap<&'static str, ResourceHandler>,
    tools: HashMap<&'static str, ToolHandler>,
}

impl Registry {
    pub(crate) fn with_resource(mut self, uri: &'static str, handler: ResourceHandler) -> Self {
        let replaced = self.resources.insert(uri, handler);
        debug_assert!(replaced.is_none(), "resource {uri} registered twice");
        self
    }

    pub(crate) fn with_tool(mut self, name: &'static str, handler: ToolHandler) -> Self {
        let replaced = self.tools.insert(name, handler);
        debug_assert!(replaced.is_none(), "tool {name} registered twice");
        self
    }

    /// Start the tool named in `request`, or fail with `invalid_params` when it is unknown.
    pub(crate) fn call_tool(
        &self,
        service: &Arc<StringService>,
        request: CallToolRequestParam,
    ) -> Result<ToolFuture, McpError> {
        match self.tools.get(request.name.as_ref()) {
            Some(handler) => Ok(handler(service.clone(), request)),
            None => Err(McpError::invalid_params(
                format!("Unknown tool: {}", request.name),
                None,
            )),
        }
    }

    /// Start the resource read for `request.uri`, or fail when the URI is unknown.
    pub(crate) fn read_resource(
        &self,
        service: &Arc<StringService>,
        request: ReadResourceRequestParam,
    ) -> Result<ResourceFuture, McpError> {
        match self.resources.get(request.uri.as_str()) {
            Some(handler) => Ok(handler(service.clone(), request)),
            None => Err(McpError::invalid_params(
                format!("Unknown resource URI: {}", request.uri),
                None,
            )),
        }
    }

    #[cfg(test)]
    fn tool_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
