//! Read file tool definition.
//!
//! Reads a UTF-8 text file from the session sandbox, bounded by the configured
//! maximum file size.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{Session, SessionScope, error_result, structured_result};
use crate::core::config::{Config, LimitsConfig};
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the read file tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsReadFileParams {
    #[serde(flatten)]
    pub scope: SessionScope,

    /// File to read, relative to the session.
    pub path: String,

    /// First line to return (1-based, inclusive).
    #[serde(default)]
    pub start_line: Option<usize>,

    /// Last line to return (1-based, inclusive).
    #[serde(default)]
    pub end_line: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ReadResult {
    path: String,
    content: String,
    total_lines: usize,
    start_line: usize,
    end_line: usize,
    size: u64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Read file tool - returns the text content of a session file.
pub struct FsReadFileTool;

impl FsReadFileTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_read_file";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Read a UTF-8 text file from the session sandbox. Optionally restrict the output to a 1-based inclusive line range.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(session = %params.scope.session_id, path = %params.path))]
    pub fn execute(params: &FsReadFileParams, config: &Config) -> CallToolResult {
        info!("Read file tool called for: {}", params.path);

        match Self::read(params, config) {
            Ok(result) => {
                info!(
                    "Read lines {}-{} of {} from {}",
                    result.start_line, result.end_line, result.total_lines, params.path
                );
                structured_result(result.content.clone(), &result)
            }
            Err(e) => error_result(&e),
        }
    }

    fn read(params: &FsReadFileParams, config: &Config) -> Result<ReadResult, ToolError> {
        if let (Some(start), Some(end)) = (params.start_line, params.end_line) {
            if start > end {
                return Err(ToolError::invalid_arguments(format!(
                    "start_line ({}) is after end_line ({})",
                    start, end
                )));
            }
        }

        let path = Session::open(&params.scope, config)?.resolve(&params.path)?;

        if !path.is_file() {
            return Err(ToolError::invalid_arguments(format!(
                "Path is not a file: {}",
                params.path
            )));
        }

        let (lines, size) = read_lines(&path, &params.path, &config.limits)?;
        let total_lines = lines.len();

        let start = params.start_line.unwrap_or(1).max(1);
        let end = params.end_line.unwrap_or(total_lines).min(total_lines);
        let content = if start > end {
            String::new()
        } else {
            lines[start - 1..end].join("\n")
        };

        Ok(ReadResult {
            path: params.path.clone(),
            content,
            total_lines,
            start_line: start,
            end_line: end,
            size,
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsReadFileParams>(),
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
                let params: FsReadFileParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

/// Read all lines of a file no larger than `limits.max_file_read_size`.
fn read_lines(
    path: &std::path::Path,
    requested: &str,
    limits: &LimitsConfig,
) -> Result<(Vec<String>, u64), ToolError> {
    let file = File::open(path).map_err(|e| ToolError::io("open", requested, e))?;
    let size = file
        .metadata()
        .map_err(|e| ToolError::io("stat", requested, e))?
        .len();

    if size > limits.max_file_read_size {
        return Err(ToolError::execution_failed(format!(
            "File '{}' is {} bytes, larger than the {} byte read limit",
            requested, size, limits.max_file_read_size
        )));
    }

    let reader = BufReader::with_capacity(limits.read_chunk_size.max(1), file);
    let lines = reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ToolError::io("read", requested, e))?;

    Ok((lines, size))
}

#[cfg(test)]
mod tests {
    use super::super::common::{result_text, test_config, test_scope};
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_session_file(root: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let dir = root.path().join("ws/agent/session");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn params(path: &str, start_line: Option<usize>, end_line: Option<usize>) -> FsReadFileParams {
        FsReadFileParams {
            scope: test_scope(),
            path: path.to_string(),
            start_line,
            end_line,
        }
    }

    #[test]
    fn test_read_whole_file() {
        let root = TempDir::new().unwrap();
        write_session_file(&root, "notes.txt", b"one\ntwo\nthree\n");

        let result = FsReadFileTool::execute(&params("notes.txt", None, None), &test_config(root.path()));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_text(&result), "one\ntwo\nthree");
        assert_eq!(result.structured_content.unwrap()["total_lines"], 3);
    }

    #[test]
    fn test_read_line_range() {
        let root = TempDir::new().unwrap();
        write_session_file(&root, "notes.txt", b"one\ntwo\nthree\nfour");

        let config = test_config(root.path());
        let result = FsReadFileTool::execute(&params("/notes.txt", Some(2), Some(3)), &config);
        assert_eq!(result_text(&result), "two\nthree");

        let result = FsReadFileTool::execute(&params("notes.txt", Some(3), Some(99)), &config);
        assert_eq!(result_text(&result), "three\nfour");
    }

    #[test]
    fn test_inverted_range_rejected() {
        let root = TempDir::new().unwrap();
        write_session_file(&root, "notes.txt", b"one");

        let result = FsReadFileTool::execute(&params("notes.txt", Some(3), Some(1)), &test_config(root.path()));
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_size_limit_enforced() {
        let root = TempDir::new().unwrap();
        write_session_file(&root, "big.txt", &[b'a'; 64]);

        let mut config = test_config(root.path());
        config.limits.max_file_read_size = 32;

        let result = FsReadFileTool::execute(&params("big.txt", None, None), &config);
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("read limit"));
    }

    #[test]
    fn test_binary_file_rejected() {
        let root = TempDir::new().unwrap();
        write_session_file(&root, "blob.bin", &[0xff, 0xfe, 0x00, 0x80]);

        let result = FsReadFileTool::execute(&params("blob.bin", None, None), &test_config(root.path()));
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_directory_rejected() {
        let root = TempDir::new().unwrap();
        let result = FsReadFileTool::execute(&params(".", None, None), &test_config(root.path()));
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("not a file"));
    }

    #[test]
    fn test_traversal_rejected_before_reading() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("secret.txt"), "top secret").unwrap();

        let result = FsReadFileTool::execute(
            &params("../../../secret.txt", None, None),
            &test_config(root.path()),
        );
        assert_eq!(result.is_error, Some(true));
        assert!(!result_text(&result).contains("top secret"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_outside_file_rejected() {
        use std::os::unix::fs::symlink;

        let root = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let secret = outside.path().join("secret.txt");
        fs::write(&secret, "top secret").unwrap();

        let session = root.path().join("ws/agent/session");
        fs::create_dir_all(&session).unwrap();
        symlink(&secret, session.join("link.txt")).unwrap();

        let result = FsReadFileTool::execute(&params("link.txt", None, None), &test_config(root.path()));
        assert_eq!(result.is_error, Some(true));
        assert!(!result_text(&result).contains("top secret"));
    }
}
