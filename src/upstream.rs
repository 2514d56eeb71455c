//! Authenticated Todoist REST client.
//!
//! Wraps a [`reqwest::Client`] with the bearer token from [`Config`] and
//! exposes the two listing calls the gateway needs. The client keeps no
//! state between calls — every search and fetch re-reads the upstream, so
//! results always reflect the most recent successful listing.
//!
//! Failures are classified, never retried:
//!
//! | Upstream signal | Error |
//! |-----------------|-------|
//! | network error / timeout | [`GatewayError::UpstreamUnavailable`] |
//! | 401, 403 | [`GatewayError::UpstreamAuth`] |
//! | 429 | [`GatewayError::UpstreamRateLimited`] |
//! | other 5xx | [`GatewayError::UpstreamUnavailable`] |
//! | other status / bad payload | [`GatewayError::Internal`] |

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::GatewayError;
use crate::models::{Project, Task};

/// Per-request timeout for upstream calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client bound to one upstream account.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl UpstreamClient {
    /// Build a client from the gateway configuration.
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            token: config.token.clone(),
        })
    }

    /// List all active tasks in the account.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, GatewayError> {
        self.get_json("/tasks").await
    }

    /// List all projects in the account.
    pub async fn list_projects(&self) -> Result<Vec<Project>, GatewayError> {
        self.get_json("/projects").await
    }

    /// Perform one authenticated GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.api_base, path);

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|e| GatewayError::UpstreamUnavailable(format!("GET {}: {}", url, e)))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| GatewayError::Internal(format!("invalid payload from {}: {}", url, e)));
        }

        let body = response.text().await.unwrap_or_default();
        let detail = format!("GET {} returned {}: {}", url, status, body.trim());

        match status.as_u16() {
            401 | 403 => Err(GatewayError::UpstreamAuth(detail)),
            429 => Err(GatewayError::UpstreamRateLimited(detail)),
            500..=599 => Err(GatewayError::UpstreamUnavailable(detail)),
            _ => Err(GatewayError::Internal(detail)),
        }
    }
}
