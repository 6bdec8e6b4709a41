//! Rename/move tool definition.
//!
//! A tool that renames or moves files and directories within one session.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{Session, SessionScope, error_result, item_type, structured_result};
use crate::core::config::Config;
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the rename/move tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsRenameParams {
    #[serde(flatten)]
    pub scope: SessionScope,

    /// Source path (file or directory to rename/move), relative to the session.
    pub from: String,

    /// Destination path (new name or location), relative to the session.
    pub to: String,

    /// Overwrite destination if it already exists.
    #[serde(default)]
    pub overwrite: bool,
}

// ============================================================================
// Output Structure (JSON format for AI agents)
// ============================================================================

/// Result of a rename/move operation
#[derive(Debug, Serialize)]
struct RenameResult {
    from: String,
    to: String,
    /// "file", "directory", "symlink" or "item"
    item_type: &'static str,
    /// "renamed" or "moved"
    operation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    overwritten: Option<bool>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Rename/move tool - renames or moves files and directories.
pub struct FsRenameTool;

impl FsRenameTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_rename";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Rename or move a file or directory within the session sandbox. The destination's parent directory must exist.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(session = %params.scope.session_id, from = %params.from, to = %params.to))]
    pub fn execute(params: &FsRenameParams, config: &Config) -> CallToolResult {
        info!("Rename tool called: '{}' -> '{}'", params.from, params.to);

        match Self::rename(params, config) {
            Ok(result) => {
                let summary = format!(
                    "Successfully {} {} from '{}' to '{}'",
                    result.operation, result.item_type, params.from, params.to
                );
                info!("{}", summary);
                structured_result(summary, &result)
            }
            Err(e) => error_result(&e),
        }
    }

    fn rename(params: &FsRenameParams, config: &Config) -> Result<RenameResult, ToolError> {
        let session = Session::open(&params.scope, config)?;
        let from_path = session.resolve_entry(&params.from)?;
        let to_path = session.resolve_entry(&params.to)?;
        let root = session.root()?;

        if from_path == root || to_path == root {
            return Err(ToolError::invalid_arguments(
                "Cannot rename the session directory itself",
            ));
        }

        if fs::symlink_metadata(&from_path).is_err() {
            return Err(ToolError::invalid_arguments(format!(
                "Source does not exist: {}",
                params.from
            )));
        }

        let destination_exists = fs::symlink_metadata(&to_path).is_ok();
        if destination_exists && !params.overwrite {
            return Err(ToolError::invalid_arguments(format!(
                "Destination already exists: {}. Use overwrite=true to replace it.",
                params.to
            )));
        }

        let source_type = item_type(&from_path);
        let operation = if from_path.parent() != to_path.parent() {
            "moved"
        } else {
            "renamed"
        };

        fs::rename(&from_path, &to_path).map_err(|e| {
            ToolError::execution_failed(format!(
                "Failed to {} '{}' to '{}': {}",
                operation, params.from, params.to, e
            ))
        })?;

        Ok(RenameResult {
            from: params.from.clone(),
            to: params.to.clone(),
            item_type: source_type,
            operation,
            overwritten: (destination_exists && params.overwrite).then_some(true),
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsRenameParams>(),
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
                let params: FsRenameParams =
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
    use super::super::common::{result_text, test_config, test_scope};
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn session_dir(root: &TempDir) -> PathBuf {
        let dir = root.path().join("ws/agent/session");
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn params(from: &str, to: &str, overwrite: bool) -> FsRenameParams {
        FsRenameParams {
            scope: test_scope(),
            from: from.to_string(),
            to: to.to_string(),
            overwrite,
        }
    }

    #[test]
    fn test_rename_file() {
        let root = TempDir::new().unwrap();
        let session = session_dir(&root);
        fs::write(session.join("old.txt"), "content").unwrap();

        let result = FsRenameTool::execute(&params("old.txt", "new.txt", false), &test_config(root.path()));
        assert_eq!(result.is_error, Some(false));
        assert!(!session.join("old.txt").exists());
        assert_eq!(fs::read_to_string(session.join("new.txt")).unwrap(), "content");

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["operation"], "renamed");
        assert_eq!(structured["item_type"], "file");
        assert!(structured.get("overwritten").is_none());
    }

    #[test]
    fn test_move_into_subdirectory() {
        let root = TempDir::new().unwrap();
        let session = session_dir(&root);
        fs::write(session.join("a.txt"), "a").unwrap();
        fs::create_dir(session.join("sub")).unwrap();

        let result = FsRenameTool::execute(&params("a.txt", "/sub/a.txt", false), &test_config(root.path()));
        assert_eq!(result.structured_content.unwrap()["operation"], "moved");
        assert!(session.join("sub/a.txt").is_file());
    }

    #[test]
    fn test_existing_destination_requires_overwrite() {
        let root = TempDir::new().unwrap();
        let session = session_dir(&root);
        fs::write(session.join("a.txt"), "a").unwrap();
        fs::write(session.join("b.txt"), "b").unwrap();
        let config = test_config(root.path());

        let result = FsRenameTool::execute(&params("a.txt", "b.txt", false), &config);
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("overwrite=true"));

        let result = FsRenameTool::execute(&params("a.txt", "b.txt", true), &config);
        assert_eq!(result.structured_content.unwrap()["overwritten"], true);
        assert_eq!(fs::read_to_string(session.join("b.txt")).unwrap(), "a");
    }

    #[test]
    fn test_move_out_of_session_rejected() {
        let root = TempDir::new().unwrap();
        let session = session_dir(&root);
        fs::write(session.join("a.txt"), "a").unwrap();

        let result = FsRenameTool::execute(&params("a.txt", "../../a.txt", false), &test_config(root.path()));
        assert_eq!(result.is_error, Some(true));
        assert!(session.join("a.txt").exists());
        assert!(!root.path().join("ws/a.txt").exists());
    }

    #[test]
    fn test_session_dir_cannot_be_renamed() {
        let root = TempDir::new().unwrap();
        session_dir(&root);

        let result = FsRenameTool::execute(&params("/", "moved", false), &test_config(root.path()));
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_missing_source() {
        let root = TempDir::new().unwrap();
        let result = FsRenameTool::execute(&params("ghost.txt", "b.txt", false), &test_config(root.path()));
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("Source does not exist"));
    }

    #[cfg(unix)]
    #[test]
    fn test_rename_symlink_moves_link_not_target() {
        use std::os::unix::fs::symlink;

        let root = TempDir::new().unwrap();
        let session = session_dir(&root);
        fs::create_dir(session.join("real")).unwrap();
        symlink(session.join("real"), session.join("alias")).unwrap();

        let result = FsRenameTool::execute(&params("alias", "renamed", false), &test_config(root.path()));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content.unwrap()["item_type"], "symlink");
        assert!(session.join("real").is_dir());
        assert!(fs::symlink_metadata(session.join("alias")).is_err());
        assert!(fs::symlink_metadata(session.join("renamed")).unwrap().is_symlink());
    }

    #[cfg(unix)]
    #[test]
    fn test_rename_symlink_pointing_outside() {
        use std::os::unix::fs::symlink;

        let root = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("victim.txt"), "keep").unwrap();
        let session = session_dir(&root);
        symlink(outside.path(), session.join("escape")).unwrap();
        let config = test_config(root.path());

        let result = FsRenameTool::execute(&params("escape/victim.txt", "stolen.txt", false), &config);
        assert_eq!(result.is_error, Some(true));
        assert!(outside.path().join("victim.txt").is_file());

        let result = FsRenameTool::execute(&params("escape", "quarantined", false), &config);
        assert_eq!(result.is_error, Some(false));
        assert!(fs::symlink_metadata(session.join("quarantined")).unwrap().is_symlink());
        assert!(outside.path().join("victim.txt").is_file());
    }
}
