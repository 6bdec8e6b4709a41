//! MCP Server implementation and lifecycle management.
//!
//! The handler only serves tools; each tool lives in
//! `domains/tools/definitions/` and the router is built dynamically in
//! `domains/tools/router.rs`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::fs;
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Error;
use crate::domains::tools::build_tool_router;

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        Self {
            tool_router: build_tool_router::<Self>(config.clone()),
            config,
        }
    }

    /// Create the server after making sure the sandbox root exists.
    pub fn try_new(config: Config) -> super::error::Result<Self> {
        let root = &config.sandbox.root;
        if !root.is_absolute() {
            return Err(Error::config(format!(
                "sandbox root must be absolute: {}",
                root.display()
            )));
        }

        fs::create_dir_all(root)?;
        info!("Sandbox root ready at {}", root.display());

        Ok(Self::new(config))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "File system tools confined to a per-session sandbox. Every call takes \
                 workspace_id, agent_id and session_id; paths are relative to that \
                 session's directory and cannot leave it."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::TOOL_NAMES;
    use tempfile::TempDir;

    #[test]
    fn test_try_new_creates_root() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.sandbox.root = tmp.path().join("sandbox");

        let server = McpServer::try_new(config).unwrap();
        assert!(tmp.path().join("sandbox").is_dir());
        assert_eq!(server.list_tools().len(), TOOL_NAMES.len());
    }

    #[test]
    fn test_try_new_rejects_relative_root() {
        let mut config = Config::default();
        config.sandbox.root = "relative".into();
        assert!(matches!(McpServer::try_new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_server_info() {
        let server = McpServer::new(Config::default());
        let info = server.get_info();
        assert_eq!(info.server_info.name, "sandbox-mcp-server");
        assert!(info.capabilities.tools.is_some());
        assert_eq!(server.name(), "sandbox-mcp-server");
    }
}
