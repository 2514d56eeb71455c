//! # Taskgate
//!
//! **A read-only search-and-fetch gateway over a Todoist account.**
//!
//! Taskgate lets a remote research client discover and retrieve tasks and
//! projects through exactly two operations — `search(query)` and
//! `fetch(id)` — exposed as MCP tools over a Streamable HTTP endpoint and
//! as a plain JSON tool API. The gateway never writes upstream and keeps
//! no local state: every query is answered from a fresh listing.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ MCP / HTTP  │──▶│ Tool dispatch │──▶│ Todoist REST  │
//! │  (axum)     │    │ search/fetch │    │  (reqwest)   │
//! └─────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! ## Control Flow
//!
//! 1. A request arrives on the MCP endpoint or `POST /tools/{name}`.
//! 2. The [`traits`] layer validates parameters and dispatches.
//! 3. The [`upstream`] client lists tasks and projects concurrently.
//! 4. [`search`] matches free text, or [`ident`] resolves the identifier
//!    and [`fetch`] normalizes the entity.
//! 5. The result is serialized and delivered as a single event; failures
//!    become one structured error on the same channel.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Environment-backed configuration, loaded once at startup |
//! | [`error`] | Error taxonomy with wire codes and HTTP statuses |
//! | [`models`] | Entity types and the two response shapes |
//! | [`ident`] | `kind:numeric-id` identifier codec and deep links |
//! | [`upstream`] | Authenticated Todoist REST client |
//! | [`search`] | Free-text matcher over tasks and projects |
//! | [`fetch`] | Identifier resolution and record normalization |
//! | [`status`] | Upstream connectivity probe |
//! | [`traits`] | `Tool` trait, context, and registry |
//! | [`mcp`] | MCP JSON-RPC bridge (rmcp) |
//! | [`server`] | Axum HTTP server with the MCP endpoint |

pub mod config;
pub mod error;
pub mod fetch;
pub mod ident;
pub mod mcp;
pub mod models;
pub mod search;
pub mod server;
pub mod status;
pub mod traits;
pub mod upstream;

pub use error::GatewayError;
pub use ident::EntityKind;
pub use models::{Entity, FetchRecord, Project, SearchResultItem, Task};
pub use traits::{FetchTool, SearchTool, Tool, ToolContext, ToolRegistry};
