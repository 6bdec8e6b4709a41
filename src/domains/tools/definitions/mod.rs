//! Tool definitions module.
//!
//! Each tool is defined in its own file.

pub mod fs;

pub use fs::{
    FsDeleteTool, FsListDirTool, FsReadFileTool, FsRenameTool, FsResolvePathTool,
    FsWriteFileTool, SessionScope,
};
