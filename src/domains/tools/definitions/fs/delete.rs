//! Delete tool definition.
//!
//! A tool that deletes files and directories inside the session sandbox.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{Session, SessionScope, error_result, item_type, structured_result};
use crate::core::config::Config;
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the delete tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsDeleteParams {
    #[serde(flatten)]
    pub scope: SessionScope,

    /// Path to the file or directory to delete, relative to the session.
    pub path: String,

    /// Recursively delete directories and their contents.
    /// Required to delete non-empty directories.
    #[serde(default)]
    pub recursive: bool,
}

/// Result of a delete operation
#[derive(Debug, Serialize)]
struct DeleteResult {
    path: String,
    /// "file", "directory", "symlink" or "item"
    item_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    recursive: Option<bool>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Delete tool - deletes files and directories.
pub struct FsDeleteTool;

impl FsDeleteTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_delete";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Delete a file or directory in the session sandbox. Use recursive=true to delete non-empty directories and their contents. The session directory itself cannot be deleted.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(session = %params.scope.session_id, path = %params.path))]
    pub fn execute(params: &FsDeleteParams, config: &Config) -> CallToolResult {
        info!("Delete tool called: '{}'", params.path);

        match Self::delete(params, config) {
            Ok(result) => {
                let summary = if result.recursive.is_some() {
                    format!(
                        "Successfully deleted {} '{}' and all its contents",
                        result.item_type, params.path
                    )
                } else {
                    format!("Successfully deleted {} '{}'", result.item_type, params.path)
                };
                info!("{}", summary);
                structured_result(summary, &result)
            }
            Err(e) => error_result(&e),
        }
    }

    fn delete(params: &FsDeleteParams, config: &Config) -> Result<DeleteResult, ToolError> {
        let session = Session::open(&params.scope, config)?;
        let target = session.resolve_entry(&params.path)?;

        if target == session.root()? {
            return Err(ToolError::invalid_arguments(
                "Cannot delete the session directory itself",
            ));
        }

        let metadata = match fs::symlink_metadata(&target) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ToolError::invalid_arguments(format!(
                    "Path does not exist: {}",
                    params.path
                )));
            }
            Err(e) => return Err(ToolError::io("stat", &params.path, e)),
        };

        let kind = item_type(&target);
        let is_directory = metadata.is_dir();

        // Links are unlinked, never followed.
        let outcome = if metadata.is_symlink() {
            remove_symlink(&target)
        } else if is_directory && params.recursive {
            fs::remove_dir_all(&target)
        } else if is_directory {
            let non_empty = fs::read_dir(&target)
                .map_err(|e| ToolError::io("read directory", &params.path, e))?
                .next()
                .is_some();
            if non_empty {
                return Err(ToolError::invalid_arguments(format!(
                    "Directory is not empty: {}. Use recursive=true to delete it and its contents.",
                    params.path
                )));
            }
            fs::remove_dir(&target)
        } else {
            fs::remove_file(&target)
        };

        outcome.map_err(|e| ToolError::io("delete", &params.path, e))?;

        Ok(DeleteResult {
            path: params.path.clone(),
            item_type: kind,
            recursive: (is_directory && params.recursive).then_some(true),
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsDeleteParams>(),
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
                let params: FsDeleteParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

#[cfg(windows)]
fn remove_symlink(path: &std::path::Path) -> io::Result<()> {
    // Directory links on Windows must be removed as directories.
    fs::remove_file(path).or_else(|_| fs::remove_dir(path))
}

#[cfg(not(windows))]
fn remove_symlink(path: &std::path::Path) -> io::Result<()> {
    fs::remove_file(path)
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

    fn params(path: &str, recursive: bool) -> FsDeleteParams {
        FsDeleteParams {
            scope: test_scope(),
            path: path.to_string(),
            recursive,
        }
    }

    #[test]
    fn test_delete_file() {
        let root = TempDir::new().unwrap();
        let session = session_dir(&root);
        fs::write(session.join("test.txt"), "content").unwrap();

        let result = FsDeleteTool::execute(&params("test.txt", false), &test_config(root.path()));
        assert_eq!(result.is_error, Some(false));
        assert!(!session.join("test.txt").exists());
        assert_eq!(result.structured_content.unwrap()["item_type"], "file");
    }

    #[test]
    fn test_delete_non_empty_directory_requires_recursive() {
        let root = TempDir::new().unwrap();
        let session = session_dir(&root);
        fs::create_dir_all(session.join("dir/nested")).unwrap();
        fs::write(session.join("dir/nested/f.txt"), "x").unwrap();
        let config = test_config(root.path());

        let result = FsDeleteTool::execute(&params("dir", false), &config);
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("recursive=true"));
        assert!(session.join("dir").exists());

        let result = FsDeleteTool::execute(&params("dir", true), &config);
        assert!(result_text(&result).contains("and all its contents"));
        assert!(!session.join("dir").exists());
    }

    #[test]
    fn test_delete_empty_directory() {
        let root = TempDir::new().unwrap();
        let session = session_dir(&root);
        fs::create_dir(session.join("empty")).unwrap();

        let result = FsDeleteTool::execute(&params("empty", false), &test_config(root.path()));
        assert_eq!(result.is_error, Some(false));
        assert!(!session.join("empty").exists());
    }

    #[test]
    fn test_session_dir_cannot_be_deleted() {
        let root = TempDir::new().unwrap();
        let session = session_dir(&root);
        let config = test_config(root.path());

        for path in ["", ".", "/", "sub/.."] {
            let result = FsDeleteTool::execute(&params(path, true), &config);
            assert_eq!(result.is_error, Some(true), "{path:?}");
        }
        assert!(session.is_dir());
    }

    #[test]
    fn test_delete_outside_session_rejected() {
        let root = TempDir::new().unwrap();
        session_dir(&root);
        let victim = root.path().join("ws/agent/other");
        fs::create_dir_all(&victim).unwrap();

        let result = FsDeleteTool::execute(&params("../other", true), &test_config(root.path()));
        assert_eq!(result.is_error, Some(true));
        assert!(victim.exists());
    }

    #[test]
    fn test_delete_nonexistent() {
        let root = TempDir::new().unwrap();
        let result = FsDeleteTool::execute(&params("ghost.txt", false), &test_config(root.path()));
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("does not exist"));
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_symlink_removes_link_not_target() {
        use std::os::unix::fs::symlink;

        let root = TempDir::new().unwrap();
        let session = session_dir(&root);
        fs::create_dir_all(session.join("real/nested")).unwrap();
        fs::write(session.join("real/nested/f.txt"), "keep").unwrap();
        symlink(session.join("real"), session.join("alias")).unwrap();

        let result = FsDeleteTool::execute(&params("alias", true), &test_config(root.path()));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content.unwrap()["item_type"], "symlink");
        assert!(fs::symlink_metadata(session.join("alias")).is_err());
        assert_eq!(
            fs::read_to_string(session.join("real/nested/f.txt")).unwrap(),
            "keep"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_symlink_pointing_outside() {
        use std::os::unix::fs::symlink;

        let root = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("victim.txt"), "keep").unwrap();
        let session = session_dir(&root);
        symlink(outside.path(), session.join("escape")).unwrap();
        let config = test_config(root.path());

        // The link's contents stay unreachable.
        let result = FsDeleteTool::execute(&params("escape/victim.txt", false), &config);
        assert_eq!(result.is_error, Some(true));

        let result = FsDeleteTool::execute(&params("escape", true), &config);
        assert_eq!(result.is_error, Some(false));
        assert!(fs::symlink_metadata(session.join("escape")).is_err());
        assert!(outside.path().join("victim.txt").is_file());
    }
}
