//! Helpers shared by the file system tools.

use std::fs;
use std::path::{Path, PathBuf};

use rmcp::model::{CallToolResult, Content};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::config::Config;
use crate::core::security::{SecurePathResolver, TenantPath};
use crate::domains::tools::ToolError;

/// The session a tool call operates in.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SessionScope {
    /// Workspace identifier.
    pub workspace_id: String,

    /// Agent identifier.
    pub agent_id: String,

    /// Session identifier.
    pub session_id: String,
}

impl SessionScope {
    /// Validate the identifiers.
    pub fn tenant(&self) -> Result<TenantPath, ToolError> {
        Ok(TenantPath::new(
            &self.workspace_id,
            &self.agent_id,
            &self.session_id,
        )?)
    }
}

/// A validated session with its resolver, used to resolve several paths.
pub struct Session {
    resolver: SecurePathResolver,
    tenant: TenantPath,
}

impl Session {
    pub fn open(scope: &SessionScope, config: &Config) -> Result<Self, ToolError> {
        Ok(Self {
            resolver: SecurePathResolver::from_config(&config.sandbox),
            tenant: scope.tenant()?,
        })
    }

    /// Resolve a caller-supplied path inside this session.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, ToolError> {
        Ok(self.resolver.resolve_for(&self.tenant, path)?)
    }

    /// Resolve a path naming an entry to act on. A trailing symlink is
    /// returned as the link, not its target.
    pub fn resolve_entry(&self, path: &str) -> Result<PathBuf, ToolError> {
        Ok(self.resolver.resolve_entry_for(&self.tenant, path)?)
    }

    /// Real path of the session directory.
    pub fn root(&self) -> Result<PathBuf, ToolError> {
        Ok(self.resolver.session_dir(&self.tenant)?)
    }
}

/// Describe what kind of file system item `path` is, without following a
/// trailing symlink.
pub fn item_type(path: &Path) -> &'static str {
    match fs::symlink_metadata(path) {
        Ok(m) if m.is_symlink() => "symlink",
        Ok(m) if m.is_dir() => "directory",
        Ok(m) if m.is_file() => "file",
        _ => "item",
    }
}

/// Create an error result from a tool error.
pub fn error_result(err: &ToolError) -> CallToolResult {
    warn!("{}", err);
    CallToolResult::error(vec![Content::text(err.to_string())])
}

/// Create a success result with a text summary and structured content.
pub fn structured_result(summary: String, data: &impl Serialize) -> CallToolResult {
    let mut result = CallToolResult::success(vec![Content::text(summary)]);
    result.structured_content = serde_json::to_value(data).ok();
    result
}

/// Extract the text of the first content item of a result.
#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

/// A config whose sandbox root is `root`.
#[cfg(test)]
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.sandbox.root = root.to_path_buf();
    config
}

#[cfg(test)]
pub fn test_scope() -> SessionScope {
    test_scope_for("ws", "agent", "session")
}

#[cfg(test)]
pub fn test_scope_for(workspace_id: &str, agent_id: &str, session_id: &str) -> SessionScope {
    SessionScope {
        workspace_id: workspace_id.to_string(),
        agent_id: agent_id.to_string(),
        session_id: session_id.to_string(),
    }
}
