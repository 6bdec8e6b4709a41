//! Tools domain module.
//!
//! Tools are the file system operations MCP clients can call. Every tool is
//! scoped to one (workspace, agent, session) sandbox and resolves its path
//! arguments through [`crate::core::security::SecurePathResolver`].
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Dynamic ToolRouter builder
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/fs/` (e.g., `my_tool.rs`)
//! 2. Define params (flattening [`SessionScope`]), `execute()`, `to_tool()` and `create_route()`
//! 3. Export it in `definitions/fs/mod.rs`
//! 4. Add its route and name in `router.rs`

pub mod definitions;
mod error;
pub mod router;

pub use definitions::SessionScope;
pub use error::ToolError;
pub use router::{TOOL_NAMES, build_tool_router};
