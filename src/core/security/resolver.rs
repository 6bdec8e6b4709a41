//! Secure path resolution for tenant sessions.
//!
//! Composes the four stages in order: identifier validation, session directory
//! provisioning, lexical canonicalization and boundary enforcement.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::boundary::{enforce_boundary, real_path};
use super::canonicalize::canonicalize_request;
use super::error::SandboxError;
use super::identifier::TenantPath;
use super::provision::provision_session_dir;
use crate::core::config::SandboxConfig;

/// Resolves caller-supplied paths into per-session sandbox directories.
///
/// The sandbox root is fixed at construction. The resolver holds no other
/// state and can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct SecurePathResolver {
    root: PathBuf,
}

impl SecurePathResolver {
    /// Create a resolver confined to `root`. The root is created lazily on
    /// first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a resolver from the sandbox configuration.
    pub fn from_config(config: &SandboxConfig) -> Self {
        Self::new(config.root.clone())
    }

    /// The configured sandbox root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `path` for the given identifiers.
    ///
    /// Identifiers are validated before any filesystem access.
    pub fn resolve(
        &self,
        path: &str,
        workspace_id: &str,
        agent_id: &str,
        session_id: &str,
    ) -> Result<PathBuf, SandboxError> {
        let tenant = TenantPath::new(workspace_id, agent_id, session_id).inspect_err(|e| {
            if e.is_attack() {
                warn!(workspace_id, agent_id, session_id, "Rejected identifier: {}", e);
            }
        })?;
        self.resolve_for(&tenant, path)
    }

    /// Resolve `path` for an already validated tenant.
    ///
    /// On success the returned path is symlink-free and equal to, or nested
    /// under, the real session directory.
    pub fn resolve_for(&self, tenant: &TenantPath, path: &str) -> Result<PathBuf, SandboxError> {
        let session_dir = provision_session_dir(&self.root, tenant)?;
        let candidate = canonicalize_request(&session_dir, path);
        let resolved = enforce_boundary(&session_dir, &candidate, path).inspect_err(|e| {
            if e.is_attack() {
                warn!(tenant = %tenant, requested = path, "Sandbox boundary violation");
            }
        })?;

        debug!(tenant = %tenant, requested = path, resolved = %resolved.display(), "Path resolved");
        Ok(resolved)
    }

    /// Resolve `path` for a tenant without following its final component.
    ///
    /// The parent directory is resolved and boundary checked like
    /// [`Self::resolve_for`]; the last name is then appended as is. A symlink
    /// named by `path` therefore comes back as the link itself, wherever it
    /// points. Requests naming the session directory return its real path.
    pub fn resolve_entry_for(
        &self,
        tenant: &TenantPath,
        path: &str,
    ) -> Result<PathBuf, SandboxError> {
        let session_dir = provision_session_dir(&self.root, tenant)?;
        let candidate = canonicalize_request(&session_dir, path);

        let (parent, name) = match (candidate.parent(), candidate.file_name()) {
            (Some(parent), Some(name)) if candidate != session_dir => (parent, name),
            _ => return enforce_boundary(&session_dir, &candidate, path),
        };

        let parent_real = enforce_boundary(&session_dir, parent, path).inspect_err(|e| {
            if e.is_attack() {
                warn!(tenant = %tenant, requested = path, "Sandbox boundary violation");
            }
        })?;

        Ok(parent_real.join(name))
    }

    /// Provision the session directory and return its real path.
    pub fn session_dir(&self, tenant: &TenantPath) -> Result<PathBuf, SandboxError> {
        let session_dir = provision_session_dir(&self.root, tenant)?;
        real_path(&session_dir).map_err(|source| SandboxError::Provision { source })
    }
}

/// Resolve `path` inside the session directory of the given identifiers.
///
/// Convenience wrapper over [`SecurePathResolver::resolve`] using the root
/// from `config`.
///
/// # Examples
///
/// ```rust,no_run
/// use sandbox_mcp_server::core::{SandboxConfig, resolve_secure_path};
///
/// let config = SandboxConfig::default();
/// let path = resolve_secure_path("/etc/passwd", "ws", "ag", "se", &config)?;
/// assert!(path.ends_with("ws/ag/se/etc/passwd"));
/// # Ok::<(), sandbox_mcp_server::core::SandboxError>(())
/// ```
pub fn resolve_secure_path(
    path: &str,
    workspace_id: &str,
    agent_id: &str,
    session_id: &str,
    config: &SandboxConfig,
) -> Result<PathBuf, SandboxError> {
    SecurePathResolver::from_config(config).resolve(path, workspace_id, agent_id, session_id)
}
