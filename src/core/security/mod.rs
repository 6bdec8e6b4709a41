// Security module for sandboxed path resolution
//
// This module confines file system operations to per-session directories
// under a single sandbox root, rejecting identifier injection, `..`
// traversal and symlink escapes.

pub mod boundary;
pub mod canonicalize;
pub mod error;
pub mod identifier;
pub mod provision;
pub mod resolver;

pub use boundary::{enforce_boundary, is_within_root, real_path};
pub use canonicalize::canonicalize_request;
pub use error::{SandboxError, SandboxErrorKind};
pub use identifier::{TenantIdentifier, TenantPath, validate_identifier};
pub use provision::provision_session_dir;
pub use resolver::{SecurePathResolver, resolve_secure_path};
