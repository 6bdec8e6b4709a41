//! Sandboxed file system MCP server.
//!
//! Every tool call is scoped to a `(workspace_id, agent_id, session_id)`
//! triple. The triple selects a session directory under the sandbox root,
//! and every path an agent supplies is resolved inside that directory or
//! rejected.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server, transports and the
//!   `security` pipeline (identifier validation, session provisioning,
//!   lexical canonicalization, boundary enforcement)
//! - **domains**: MCP tools exposed to clients
//!
//! # Example
//!
//! ```rust,no_run
//! use sandbox_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::try_new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result, SecurePathResolver, resolve_secure_path};
