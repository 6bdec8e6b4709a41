//! List directory tool definition.
//!
//! A tool that lists files and directories inside the session sandbox.

use chrono::{DateTime, Utc};
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
use tracing::{info, instrument, warn};

use super::common::{Session, SessionScope, error_result, structured_result};
use crate::core::config::Config;
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the list directory tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsListDirParams {
    #[serde(flatten)]
    pub scope: SessionScope,

    /// Directory to list, relative to the session. Defaults to the session directory.
    #[serde(default)]
    pub path: String,

    /// Include hidden files (starting with '.')
    #[serde(default)]
    pub include_hidden: bool,

    /// Show additional details (size, type, modification time)
    #[serde(default)]
    pub detailed: bool,
}

// ============================================================================
// Output Structure
// ============================================================================

#[derive(Debug, Serialize)]
struct ListedEntry {
    name: String,
    /// "file", "directory" or "symlink"
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct ListDirResult {
    path: String,
    entries: Vec<ListedEntry>,
    directories: usize,
    files: usize,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// List directory tool - lists files and directories in a session path.
pub struct FsListDirTool;

impl FsListDirTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_list_dir";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List files and directories in a session directory. Returns names, types, and optionally sizes and modification times.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(session = %params.scope.session_id, path = %params.path))]
    pub fn execute(params: &FsListDirParams, config: &Config) -> CallToolResult {
        info!("List directory tool called for path: {:?}", params.path);

        match Self::list(params, config) {
            Ok(listing) => {
                let summary = render(&listing, params.detailed);
                info!("Listed {} entries in {:?}", listing.entries.len(), params.path);
                structured_result(summary, &listing)
            }
            Err(e) => error_result(&e),
        }
    }

    fn list(params: &FsListDirParams, config: &Config) -> Result<ListDirResult, ToolError> {
        let path = Session::open(&params.scope, config)?.resolve(&params.path)?;

        if !path.is_dir() {
            return Err(ToolError::invalid_arguments(format!(
                "Path is not a directory: {}",
                params.path
            )));
        }

        let read_dir =
            fs::read_dir(&path).map_err(|e| ToolError::io("read directory", &params.path, e))?;

        let mut entries = Vec::new();
        let mut directories = 0;
        let mut files = 0;

        for entry in read_dir {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Error reading entry: {}", e);
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            if !params.include_hidden && name.starts_with('.') {
                continue;
            }

            // Not followed: a link is reported as a link, wherever it points.
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    warn!("Failed to get metadata for {}: {}", name, e);
                    continue;
                }
            };

            let kind = if metadata.is_symlink() {
                "symlink"
            } else if metadata.is_dir() {
                directories += 1;
                "directory"
            } else {
                files += 1;
                "file"
            };

            let (size, modified) = if params.detailed {
                (
                    metadata.is_file().then_some(metadata.len()),
                    metadata.modified().ok().map(DateTime::<Utc>::from),
                )
            } else {
                (None, None)
            };

            entries.push(ListedEntry {
                name,
                kind,
                size,
                modified,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(ListDirResult {
            path: params.path.clone(),
            entries,
            directories,
            files,
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsListDirParams>(),
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
                let params: FsListDirParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn render(listing: &ListDirResult, detailed: bool) -> String {
    let shown = if listing.path.is_empty() {
        "."
    } else {
        listing.path.as_str()
    };
    let mut response = format!("Directory: {}\n", shown);

    if detailed {
        response.push_str("\nType  Size        Modified              Name\n");
        response.push_str("----  ----------  --------------------  ----\n");
    }

    let lines: Vec<String> = listing
        .entries
        .iter()
        .map(|entry| {
            if detailed {
                let tag = match entry.kind {
                    "directory" => "DIR ",
                    "symlink" => "LINK",
                    _ => "FILE",
                };
                let size = entry.size.map(format_size).unwrap_or_else(|| "-".to_string());
                let modified = entry
                    .modified
                    .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "-".to_string());
                format!("{:4}  {:>10}  {:20}  {}", tag, size, modified, entry.name)
            } else if entry.kind == "directory" {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            }
        })
        .collect();

    response.push_str(&lines.join("\n"));
    response.push_str(&format!(
        "\n\nTotal: {} directories, {} files",
        listing.directories, listing.files
    ));
    response
}

/// Format file size in human-readable format.
fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

// ============================================================================
// Tests
// ============================================================================
