//! # Taskgate CLI (`taskgate`)
//!
//! The `taskgate` binary drives the gateway: ad-hoc searches and fetches
//! from the terminal, an upstream health probe, and the MCP server.
//!
//! ## Usage
//!
//! ```bash
//! export TODOIST_TOKEN=...
//! taskgate <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `taskgate search "<query>"` | Search tasks and projects by free text |
//! | `taskgate fetch <id>` | Fetch one record by identifier (`task:123`, `project:456`) |
//! | `taskgate status` | Probe upstream connectivity with the configured token |
//! | `taskgate serve mcp` | Start the MCP server |

use clap::{Parser, Subcommand};

use taskgate::{config, fetch, search, server, status};

/// Taskgate — a read-only search-and-fetch gateway over a Todoist account.
///
/// Configuration comes from the environment: `TODOIST_TOKEN` (required),
/// `PORT` (optional, default 8000), `TODOIST_API_BASE` (optional).
#[derive(Parser)]
#[command(
    name = "taskgate",
    about = "Taskgate — search and fetch Todoist tasks & projects over MCP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Search tasks and projects by free text.
    ///
    /// An empty query lists everything, tasks before projects.
    Search {
        /// The search query string.
        query: String,

        /// Maximum number of results to return.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Fetch full detail for one task or project.
    Fetch {
        /// Identifier returned from search, e.g. `task:2995104339`.
        id: String,
    },

    /// Probe upstream connectivity and report health.
    Status,

    /// Start the gateway server.
    Serve {
        #[command(subcommand)]
        service: ServeService,
    },
}

/// Server subcommands.
#[derive(Subcommand)]
enum ServeService {
    /// Start the MCP server.
    ///
    /// Binds to `0.0.0.0:$PORT` and serves the MCP Streamable HTTP
    /// endpoint alongside the JSON tool API.
    Mcp,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::Config::from_env()?;

    match cli.command {
        Commands::Search { query, limit } => {
            search::run_search(&cfg, &query, limit).await?;
        }
        Commands::Fetch { id } => {
            fetch::run_fetch(&cfg, &id).await?;
        }
        Commands::Status => {
            status::run_status(&cfg).await?;
        }
        Commands::Serve { service } => match service {
            ServeService::Mcp => {
                server::run_server(&cfg).await?;
            }
        },
    }

    Ok(())
}
