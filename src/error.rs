//! Error taxonomy.
//!
//! A single typed error, [`GatewayError`], carries every failure the gateway
//! classifies. Each variant maps to a stable wire code and an HTTP status
//! (per `SPEC_FULL.md` §5): the HTTP surface renders the code/message in the
//! `{ "error": { "code", "message" } }` contract, and the MCP bridge keeps
//! the code visible on the structured error result. The enum downcasts cleanly
//! from `anyhow::Error` at the protocol boundary, so tools return
//! `anyhow::Result` while the server still recovers the typed classification.

use axum::http::StatusCode;
use thiserror::Error;

/// Every failure the gateway classifies, with a wire code and HTTP status.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed request parameters (missing or mistyped fields).
    #[error("{0}")]
    BadRequest(String),

    /// An identifier that is not a well-formed `"<kind>:<numeric-id>"`.
    #[error("{0}")]
    InvalidIdentifier(String),

    /// A well-formed identifier that matches no freshly-listed entity.
    #[error("{0}")]
    NotFound(String),

    /// Upstream rejected the credentials (401/403).
    #[error("{0}")]
    UpstreamAuth(String),

    /// Upstream rate-limited the request (429).
    #[error("{0}")]
    UpstreamRateLimited(String),

    /// Upstream was unreachable or failed transiently (network/timeout/5xx).
    #[error("{0}")]
    UpstreamUnavailable(String),

    /// An unexpected internal failure or unclassifiable upstream response.
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    /// Stable protocol code for the error contract.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::BadRequest(_) | GatewayError::InvalidIdentifier(_) => "bad_request",
            GatewayError::NotFound(_) => "not_found",
            GatewayError::UpstreamAuth(_) => "upstream_auth",
            GatewayError::UpstreamRateLimited(_) => "upstream_rate_limited",
            GatewayError::UpstreamUnavailable(_) => "upstream_unavailable",
            GatewayError::Internal(_) => "internal",
        }
    }

    /// HTTP status the error maps onto.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) | GatewayError::InvalidIdentifier(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::UpstreamAuth(_) => StatusCode::BAD_GATEWAY,
            GatewayError::UpstreamRateLimited(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
