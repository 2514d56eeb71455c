//! Upstream connectivity and health reporting.
//!
//! A lightweight probe used by `taskgate status`. It lists projects — the
//! cheapest authenticated call — and reports whether the account is
//! reachable with the configured token.

use serde::Serialize;

use crate::config::Config;
use crate::upstream::UpstreamClient;
use anyhow::Result;

/// Configuration and health status of the upstream account.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamStatus {
    /// Whether an API token is configured.
    pub configured: bool,
    /// Whether a probe call succeeded.
    pub healthy: bool,
    /// Diagnostic notes (project count, or the probe failure).
    pub notes: Option<String>,
}

/// Probe the upstream service and report its status.
pub async fn get_status(config: &Config) -> UpstreamStatus {
    if config.token.trim().is_empty() {
        return UpstreamStatus {
            configured: false,
            healthy: false,
            notes: Some("no API token configured".to_string()),
        };
    }

    let probe = match UpstreamClient::new(config) {
        Ok(client) => client.list_projects().await,
        Err(e) => Err(e),
    };

    match probe {
        Ok(projects) => UpstreamStatus {
            configured: true,
            healthy: true,
            notes: Some(format!("{} projects visible", projects.len())),
        },
        Err(e) => UpstreamStatus {
            configured: true,
            healthy: false,
            notes: Some(e.to_string()),
        },
    }
}

/// CLI entry point for `taskgate status`.
pub async fn run_status(config: &Config) -> Result<()> {
    let status = get_status(config).await;

    let state = if !status.configured {
        "NOT CONFIGURED"
    } else if status.healthy {
        "OK"
    } else {
        "UNHEALTHY"
    };

    println!("upstream: {} ({})", config.api_base, state);
    if let Some(notes) = &status.notes {
        println!("notes:    {}", notes);
    }

    Ok(())
}
