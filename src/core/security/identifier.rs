//! Tenant identifier validation.
//!
//! Workspace, agent and session identifiers become path segments under the
//! sandbox root, so each one is checked before it touches the filesystem.

use std::fmt;
use std::path::{Path, PathBuf};

use super::error::SandboxError;

/// Substrings that indicate a path traversal attempt.
///
/// Matching is plain substring containment, so `"a..b"` is rejected too.
pub const FORBIDDEN_SUBSTRINGS: [&str; 4] = ["..", "/", "\\", "\0"];

/// Validate a single identifier.
///
/// `name` is the parameter name reported in the error (e.g. `"agent_id"`).
pub fn validate_identifier(name: &'static str, value: &str) -> Result<(), SandboxError> {
    if value.trim().is_empty() {
        return Err(SandboxError::InvalidIdentifier { name });
    }

    if FORBIDDEN_SUBSTRINGS.iter().any(|s| value.contains(s)) {
        return Err(SandboxError::ForbiddenCharacter { name });
    }

    Ok(())
}

/// A validated workspace, agent or session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantIdentifier(String);

impl TenantIdentifier {
    /// Validate `value` and wrap it.
    pub fn new(name: &'static str, value: impl Into<String>) -> Result<Self, SandboxError> {
        let value = value.into();
        validate_identifier(name, &value)?;
        Ok(Self(value))
    }
}

impl AsRef<Path> for TenantIdentifier {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for TenantIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The (workspace, agent, session) triple naming one session directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantPath {
    workspace: TenantIdentifier,
    agent: TenantIdentifier,
    session: TenantIdentifier,
}

impl TenantPath {
    /// Validate all three identifiers in order, reporting the first one that fails.
    pub fn new(workspace_id: &str, agent_id: &str, session_id: &str) -> Result<Self, SandboxError> {
        Ok(Self {
            workspace: TenantIdentifier::new("workspace_id", workspace_id)?,
            agent: TenantIdentifier::new("agent_id", agent_id)?,
            session: TenantIdentifier::new("session_id", session_id)?,
        })
    }

    /// `root/workspace/agent/session`, without touching the filesystem.
    pub fn session_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.workspace)
            .join(&self.agent)
            .join(&self.session)
    }
}

impl fmt::Display for TenantPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.workspace, self.agent, self.session)
    }
}
