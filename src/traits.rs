//! Tool abstraction shared by the gateway's protocol surfaces.
//!
//! The two operations are exposed through a small [`Tool`] trait so the
//! JSON HTTP API and the MCP bridge dispatch identically: look the tool up
//! in the [`ToolRegistry`], validate parameters against its schema, execute
//! with a [`ToolContext`]. The registry carries exactly two built-ins —
//! [`SearchTool`] and [`FetchTool`] — because the gateway's contract is
//! exactly two operations.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::config::Config;
use crate::error::GatewayError;
use crate::fetch::fetch_gateway;
use crate::models::{FetchRecord, SearchResultItem};
use crate::search::{search_gateway, DEFAULT_RESULT_LIMIT};

/// A gateway operation that clients can discover and call.
///
/// Implementations are stateless; per-request state lives in the
/// [`ToolContext`] handed to [`execute`](Tool::execute).
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's wire name (`"search"`, `"fetch"`).
    fn name(&self) -> &str;

    /// One-line description for client discovery.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute with JSON parameters. The returned value is the complete
    /// response payload, delivered to the client as a single event.
    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<Value>;
}

/// Per-invocation bridge between tools and the gateway core.
///
/// Holds the configuration only; upstream clients are constructed per call
/// because no state is shared between requests.
pub struct ToolContext {
    config: Arc<Config>,
}

impl ToolContext {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Search upstream tasks and projects.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, GatewayError> {
        search_gateway(&self.config, query, DEFAULT_RESULT_LIMIT).await
    }

    /// Fetch one full record by identifier.
    pub async fn fetch(&self, identifier: &str) -> Result<FetchRecord, GatewayError> {
        fetch_gateway(&self.config, identifier).await
    }
}

/// Built-in search tool. Delegates to [`ToolContext::search`].
pub struct SearchTool;

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Search Todoist tasks and projects by free text"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Free-text search string; empty lists everything" }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<Value> {
        let query = params
            .get("query")
            .and_then(|q| q.as_str())
            .ok_or_else(|| GatewayError::BadRequest("'query' must be a string".to_string()))?;

        let results = ctx.search(query).await?;
        Ok(serde_json::to_value(results)?)
    }
}

/// Built-in fetch tool. Delegates to [`ToolContext::fetch`].
pub struct FetchTool;

#[async_trait]
impl Tool for FetchTool {
    fn name(&self) -> &str {
        "fetch"
    }

    fn description(&self) -> &str {
        "Fetch full detail for a Todoist task or project by id"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "id": { "type": "string", "description": "Identifier returned from search, e.g. 'task:2995104339'" }
            },
            "required": ["id"]
        })
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<Value> {
        let identifier = params
            .get("id")
            .and_then(|i| i.as_str())
            .ok_or_else(|| GatewayError::BadRequest("'id' must be a string".to_string()))?;

        let record = ctx.fetch(identifier).await?;
        Ok(serde_json::to_value(record)?)
    }
}

/// Registry of the gateway's tools.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Create a registry with the two gateway operations.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SearchTool));
        registry.register(Box::new(FetchTool));
        registry
    }

    /// Register a tool.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    /// All registered tools.
    pub fn tools(&self) -> &[Box<dyn Tool>] {
        &self.tools
    }

    /// Find a tool by name.
    pub fn find(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_carries_exactly_the_two_operations() {
        let registry = ToolRegistry::with_builtins();
        assert_eq!(registry.len(), 2);
        assert!(registry.find("search").is_some());
        assert!(registry.find("fetch").is_some());
        assert!(registry.find("sources").is_none());
    }
}
