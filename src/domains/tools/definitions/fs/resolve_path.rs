//! Resolve path tool definition.
//!
//! Exposes the sandbox resolution itself: returns the absolute, symlink-free
//! path a session-relative request maps to.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{Session, SessionScope, error_result, structured_result};
use crate::core::config::Config;
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the resolve path tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsResolvePathParams {
    #[serde(flatten)]
    pub scope: SessionScope,

    /// Path to resolve. Absolute paths are taken relative to the session directory.
    pub path: String,
}

/// Result of a resolution.
#[derive(Debug, Serialize, JsonSchema)]
struct ResolveResult {
    /// Path as supplied by the caller
    path: String,
    /// Absolute resolved path inside the session
    resolved: String,
    /// Whether something exists at the resolved path
    exists: bool,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Resolve path tool - maps a session-relative path to its real location.
pub struct FsResolvePathTool;

impl FsResolvePathTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_resolve_path";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Resolve a path inside the session sandbox to an absolute path. Creates the session directory if needed. Fails if the path would escape the session.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(session = %params.scope.session_id, path = %params.path))]
    pub fn execute(params: &FsResolvePathParams, config: &Config) -> CallToolResult {
        info!("Resolve path tool called for: {}", params.path);

        match Self::run(params, config) {
            Ok(result) => {
                let summary = result.resolved.clone();
                structured_result(summary, &result)
            }
            Err(e) => error_result(&e),
        }
    }

    fn run(params: &FsResolvePathParams, config: &Config) -> Result<ResolveResult, ToolError> {
        let resolved = Session::open(&params.scope, config)?.resolve(&params.path)?;
        Ok(ResolveResult {
            path: params.path.clone(),
            exists: resolved.exists(),
            resolved: resolved.to_string_lossy().into_owned(),
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsResolvePathParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp router.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                let params: FsResolvePathParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::common::{result_text, test_config, test_scope, test_scope_for};
    use super::*;
    use tempfile::TempDir;

    fn params(path: &str) -> FsResolvePathParams {
        FsResolvePathParams {
            scope: test_scope(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_resolves_inside_session() {
        let root = TempDir::new().unwrap();
        let config = test_config(root.path());

        let result = FsResolvePathTool::execute(&params("/etc/passwd"), &config);
        assert_eq!(result.is_error, Some(false));

        let expected = root
            .path()
            .canonicalize()
            .unwrap()
            .join("ws/agent/session/etc/passwd");
        assert_eq!(result_text(&result), expected.to_string_lossy());

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["exists"], false);
        assert_eq!(structured["path"], "/etc/passwd");
    }

    #[test]
    fn test_escape_is_tool_error() {
        let root = TempDir::new().unwrap();
        let config = test_config(root.path());

        let result = FsResolvePathTool::execute(&params("../../../etc/passwd"), &config);
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("outside the session sandbox"));
    }

    #[test]
    fn test_bad_identifier_is_tool_error() {
        let root = TempDir::new().unwrap();
        let config = test_config(root.path());
        let params = FsResolvePathParams {
            scope: test_scope_for("ws", "../agent", "session"),
            path: "x".to_string(),
        };

        let result = FsResolvePathTool::execute(&params, &config);
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("agent_id"));
    }

    #[test]
    fn test_params_deserialize_flat() {
        let params: FsResolvePathParams = serde_json::from_value(serde_json::json!({
            "workspace_id": "ws",
            "agent_id": "ag",
            "session_id": "se",
            "path": "a.txt"
        }))
        .unwrap();
        assert_eq!(params.scope.agent_id, "ag");
        assert_eq!(params.path, "a.txt");
    }
}
