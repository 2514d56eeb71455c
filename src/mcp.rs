//! MCP JSON-RPC protocol bridge.
//!
//! Adapts the [`ToolRegistry`] to a proper MCP Streamable HTTP endpoint
//! that research clients connect to using the standard JSON-RPC protocol.
//! Each call's result is delivered as a single JSON text content; failures
//! come back as a single structured error result on the same channel,
//! never as a partial payload.

use std::borrow::Cow;
use std::sync::Arc;

use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler};

use crate::config::Config;
use crate::error::GatewayError;
use crate::traits::{ToolContext, ToolRegistry};

/// Bridges the tool registry to the MCP JSON-RPC protocol.
///
/// Each MCP session receives a clone of this struct (everything is behind
/// `Arc`), so all sessions share the same two tools.
#[derive(Clone)]
pub struct McpBridge {
    config: Arc<Config>,
    tools: Arc<ToolRegistry>,
}

impl McpBridge {
    pub fn new(config: Arc<Config>, tools: Arc<ToolRegistry>) -> Self {
        Self { config, tools }
    }

    /// Convert a gateway tool into an rmcp `Tool` descriptor.
    ///
    /// Every tool is annotated read-only: the gateway never mutates
    /// upstream state.
    fn to_mcp_tool(tool: &dyn crate::traits::Tool) -> Tool {
        let schema_value = tool.parameters_schema();
        let input_schema: Arc<serde_json::Map<String, serde_json::Value>> = match schema_value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        };

        Tool {
            name: Cow::Owned(tool.name().to_string()),
            title: None,
            description: Some(Cow::Owned(tool.description().to_string())),
            input_schema,
            output_schema: None,
            annotations: Some(ToolAnnotations::new().read_only(true)),
            execution: None,
            icons: None,
            meta: None,
        }
    }
}

impl ServerHandler for McpBridge {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "taskgate".to_string(),
                title: Some("Taskgate".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Taskgate — read-only search and fetch over a Todoist account. \
                 Use the search tool to find tasks and projects by free text \
                 (an empty query lists everything), and fetch to retrieve one \
                 record by the identifier search returned."
                    .to_string(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let tools: Vec<Tool> = self
            .tools
            .tools()
            .iter()
            .map(|t| Self::to_mcp_tool(t.as_ref()))
            .collect();
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    fn get_tool(&self, name: &str) -> Option<Tool> {
        self.tools.find(name).map(Self::to_mcp_tool)
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool = self.tools.find(&request.name).ok_or_else(|| {
            McpError::new(
                ErrorCode::METHOD_NOT_FOUND,
                format!("no tool registered with name: {}", request.name),
                None,
            )
        })?;

        let params = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        let ctx = ToolContext::new(self.config.clone());
        match tool.execute(params, &ctx).await {
            Ok(result) => {
                let text = serde_json::to_string_pretty(&result).unwrap_or_default();
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => {
                // Keep the taxonomy code visible to the caller.
                let message = match e.downcast_ref::<GatewayError>() {
                    Some(gw) => format!("{}: {}", gw.code(), gw),
                    None => format!("internal: {}", e),
                };
                Ok(CallToolResult::error(vec![Content::text(message)]))
            }
        }
    }
}
