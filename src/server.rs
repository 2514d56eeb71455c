//! Gateway HTTP server.
//!
//! Exposes the two operations over two surfaces sharing one dispatch path:
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `*`    | `/mcp` | MCP Streamable HTTP endpoint (JSON-RPC) |
//! | `GET`  | `/tools/list` | List the two tools with schemas |
//! | `POST` | `/tools/{name}` | Call a tool by name |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! Error responses are a single structured body:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "'id' must be a string" } }
//! ```
//!
//! Codes: `bad_request` (400), `not_found` (404), `upstream_auth` (502),
//! `upstream_rate_limited` (503), `upstream_unavailable` (502),
//! `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser-based
//! clients and cross-origin MCP tool calls.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::error::GatewayError;
use crate::mcp::McpBridge;
use crate::traits::{ToolContext, ToolRegistry};

/// Shared application state passed to route handlers via Axum's `State`.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    tools: Arc<ToolRegistry>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            tools: Arc::new(ToolRegistry::with_builtins()),
        }
    }
}

/// Build the gateway router. Standalone so integration tests can serve it
/// on an ephemeral port without going through [`run_server`].
pub fn app(state: AppState) -> Router {
    let bridge = McpBridge::new(state.config.clone(), state.tools.clone());
    let mcp_service = StreamableHttpService::new(
        move || Ok(bridge.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tools/list", get(handle_list_tools))
        .route("/tools/{name}", post(handle_tool_call))
        .route("/health", get(handle_health))
        .nest_service("/mcp", mcp_service)
        .layer(cors)
        .with_state(state)
}

/// Start the gateway server on the configured bind address.
///
/// Runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.bind.clone();
    let state = AppState::new(Arc::new(config.clone()));

    println!("MCP endpoint at http://{}/mcp", bind_addr);
    for tool in state.tools.tools() {
        println!("  POST /tools/{} — {}", tool.name(), tool.description());
    }

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<&GatewayError> for AppError {
    fn from(err: &GatewayError) -> Self {
        AppError {
            status: err.status(),
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Map a tool execution failure onto the error contract.
///
/// Tools fail with [`GatewayError`] for everything classified; anything
/// else is an internal error.
fn classify_tool_error(tool_name: &str, err: anyhow::Error) -> AppError {
    match err.downcast_ref::<GatewayError>() {
        Some(gw) => {
            let mut app = AppError::from(gw);
            app.message = format!("{}: {}", tool_name, app.message);
            app
        }
        None => AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal".to_string(),
            message: format!("{}: {}", tool_name, err),
        },
    }
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Health check used by load balancers and monitoring.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /tools/list ============

/// Descriptor for one registered tool.
#[derive(Serialize)]
struct ToolInfo {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

/// JSON response body for `GET /tools/list`.
#[derive(Serialize)]
struct ToolListResponse {
    tools: Vec<ToolInfo>,
}

/// List the registered tools with their parameter schemas.
async fn handle_list_tools(State(state): State<AppState>) -> Json<ToolListResponse> {
    let tools = state
        .tools
        .tools()
        .iter()
        .map(|t| ToolInfo {
            name: t.name().to_string(),
            description: t.description().to_string(),
            parameters: t.parameters_schema(),
        })
        .collect();

    Json(ToolListResponse { tools })
}

// ============ POST /tools/{name} ============

/// Unified tool dispatch: look the tool up by name and execute it.
///
/// The response body is the tool's complete result payload; failures use
/// the error contract above.
async fn handle_tool_call(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(params): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tool = state.tools.find(&name).ok_or_else(|| AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: format!("no tool registered with name: {}", name),
    })?;

    let ctx = ToolContext::new(state.config.clone());
    let result = tool
        .execute(params, &ctx)
        .await
        .map_err(|e| classify_tool_error(&name, e))?;

    Ok(Json(result))
}
