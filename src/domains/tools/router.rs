//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;

use super::definitions::{
    FsDeleteTool, FsListDirTool, FsReadFileTool, FsRenameTool, FsResolvePathTool,
    FsWriteFileTool,
};

/// Names of every registered tool.
pub const TOOL_NAMES: [&str; 6] = [
    FsDeleteTool::NAME,
    FsListDirTool::NAME,
    FsReadFileTool::NAME,
    FsRenameTool::NAME,
    FsResolvePathTool::NAME,
    FsWriteFileTool::NAME,
];

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: Arc<Config>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(FsDeleteTool::create_route(config.clone()))
        .with_route(FsListDirTool::create_route(config.clone()))
        .with_route(FsReadFileTool::create_route(config.clone()))
        .with_route(FsRenameTool::create_route(config.clone()))
        .with_route(FsResolvePathTool::create_route(config.clone()))
        .with_route(FsWriteFileTool::create_route(config))
}
