//! Write file tool definition.
//!
//! Creates, overwrites or appends to a text file inside the session sandbox.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{Session, SessionScope, error_result, structured_result};
use crate::core::config::Config;
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the write file tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsWriteFileParams {
    #[serde(flatten)]
    pub scope: SessionScope,

    /// File to write, relative to the session. Missing parent directories are created.
    pub path: String,

    /// Text to write.
    pub content: String,

    /// Append to the file instead of replacing it.
    #[serde(default)]
    pub append: bool,
}

#[derive(Debug, Serialize)]
struct WriteResult {
    path: String,
    bytes_written: usize,
    created: bool,
    appended: bool,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Write file tool - writes text content to a session file.
pub struct FsWriteFileTool;

impl FsWriteFileTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_write_file";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Write text to a file in the session sandbox, creating it and any missing parent directories. Use append=true to add to an existing file.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(session = %params.scope.session_id, path = %params.path))]
    pub fn execute(params: &FsWriteFileParams, config: &Config) -> CallToolResult {
        info!("Write file tool called for: {}", params.path);

        match Self::write(params, config) {
            Ok(result) => {
                let verb = if result.appended { "Appended" } else { "Wrote" };
                let summary = format!("{} {} bytes to '{}'", verb, result.bytes_written, params.path);
                info!("{}", summary);
                structured_result(summary, &result)
            }
            Err(e) => error_result(&e),
        }
    }

    fn write(params: &FsWriteFileParams, config: &Config) -> Result<WriteResult, ToolError> {
        let path = Session::open(&params.scope, config)?.resolve(&params.path)?;

        if path.is_dir() {
            return Err(ToolError::invalid_arguments(format!(
                "Path is a directory: {}",
                params.path
            )));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ToolError::io("create parent directories for", &params.path, e))?;
        }

        let created = !path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(params.append)
            .truncate(!params.append)
            .open(&path)
            .map_err(|e| ToolError::io("open", &params.path, e))?;

        file.write_all(params.content.as_bytes())
            .map_err(|e| ToolError::io("write", &params.path, e))?;

        Ok(WriteResult {
            path: params.path.clone(),
            bytes_written: params.content.len(),
            created,
            appended: params.append && !created,
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsWriteFileParams>(),
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
                let params: FsWriteFileParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}
