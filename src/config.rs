//! Environment-backed configuration.
//!
//! The gateway is configured entirely through environment variables, read
//! once at startup into a [`Config`] that is passed by reference into every
//! component. Nothing reads the environment after load, so tests can build
//! a `Config` directly and point it at a fake upstream.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `TODOIST_TOKEN` | yes (for upstream calls) | — |
//! | `PORT` | no | `8000` |
//! | `TODOIST_API_BASE` | no | `https://api.todoist.com/rest/v2` |

use anyhow::{bail, Result};

/// Default Todoist REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.todoist.com/rest/v2";

/// Default listen port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8000;

/// Gateway configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Todoist API token sent as a bearer credential on every upstream call.
    pub token: String,
    /// Upstream REST API base URL, overridable for tests.
    pub api_base: String,
    /// Server bind address (`0.0.0.0:<port>`).
    pub bind: String,
}

impl Config {
    /// Load and validate configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let token = match std::env::var("TODOIST_TOKEN") {
            Ok(t) if !t.trim().is_empty() => t,
            _ => bail!("TODOIST_TOKEN environment variable is not set"),
        };

        let port: u16 = match std::env::var("PORT") {
            Ok(p) => match p.parse() {
                Ok(n) => n,
                Err(_) => bail!("PORT must be a number, got '{}'", p),
            },
            Err(_) => DEFAULT_PORT,
        };

        let api_base = std::env::var("TODOIST_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            token,
            api_base,
            bind: format!("0.0.0.0:{}", port),
        })
    }
}
