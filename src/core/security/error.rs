//! Sandbox resolution errors.
//!
//! Every failure of the resolution pipeline is one of four tagged variants so
//! callers can tell a malformed request apart from an escape attempt. Messages
//! carry the identifier name or the caller-supplied path, never the real path a
//! rejected request resolved to.

use std::io;

/// Errors that can occur while resolving a sandboxed path.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// An identifier is empty or whitespace-only.
    #[error("{name} cannot be empty or whitespace")]
    InvalidIdentifier { name: &'static str },

    /// An identifier contains a traversal-indicative substring.
    #[error("{name} contains invalid characters. Path traversal attempts are not allowed.")]
    ForbiddenCharacter { name: &'static str },

    /// The session directory could not be created or resolved.
    #[error("Failed to provision session directory: {source}")]
    Provision {
        #[source]
        source: io::Error,
    },

    /// The resolved path lies outside the session directory.
    #[error("Access denied: Path '{requested}' is outside the session sandbox.")]
    BoundaryViolation { requested: String },
}

/// Discriminant of a [`SandboxError`], for logging and alert routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SandboxErrorKind {
    InvalidIdentifier,
    ForbiddenCharacter,
    Provision,
    BoundaryViolation,
}

impl SandboxError {
    pub(crate) fn boundary_violation(requested: impl Into<String>) -> Self {
        Self::BoundaryViolation {
            requested: requested.into(),
        }
    }

    /// The tag of this error.
    pub fn kind(&self) -> SandboxErrorKind {
        match self {
            Self::InvalidIdentifier { .. } => SandboxErrorKind::InvalidIdentifier,
            Self::ForbiddenCharacter { .. } => SandboxErrorKind::ForbiddenCharacter,
            Self::Provision { .. } => SandboxErrorKind::Provision,
            Self::BoundaryViolation { .. } => SandboxErrorKind::BoundaryViolation,
        }
    }

    /// Whether the error indicates an attempt to leave the sandbox rather than
    /// a configuration mistake or an I/O failure.
    pub fn is_attack(&self) -> bool {
        matches!(
            self.kind(),
            SandboxErrorKind::ForbiddenCharacter | SandboxErrorKind::BoundaryViolation
        )
    }

    /// Whether the error was raised while validating tenant identifiers.
    pub fn is_identifier_error(&self) -> bool {
        matches!(
            self.kind(),
            SandboxErrorKind::InvalidIdentifier | SandboxErrorKind::ForbiddenCharacter
        )
    }
}
