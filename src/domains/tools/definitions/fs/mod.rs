//! Session-scoped file system tools.
//!
//! Every path argument is resolved through the sandbox before any I/O.

mod common;
pub mod delete;
pub mod list_dir;
pub mod read_file;
pub mod rename;
pub mod resolve_path;
pub mod write_file;

pub use common::SessionScope;
pub use delete::FsDeleteTool;
pub use list_dir::FsListDirTool;
pub use read_file::FsReadFileTool;
pub use rename::FsRenameTool;
pub use resolve_path::FsResolvePathTool;
pub use write_file::FsWriteFileTool;
