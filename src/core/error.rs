//! Crate-wide error type.
//!
//! Layer errors (sandbox, tools, transport) convert into [`Error`] via `From`
//! so `?` works across module boundaries.

use thiserror::Error;

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Sandbox path resolution failure.
    #[error("Sandbox error: {0}")]
    Sandbox(#[from] super::security::SandboxError),

    /// Error raised by a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from file operations or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error is a sandbox escape attempt.
    pub fn is_sandbox_violation(&self) -> bool {
        matches!(self, Self::Sandbox(e) if e.is_attack())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::security::SandboxError;

    #[test]
    fn test_sandbox_violation_detection() {
        let escape: Error = SandboxError::BoundaryViolation {
            requested: "../x".to_string(),
        }
        .into();
        assert!(escape.is_sandbox_violation());
        assert!(escape.to_string().starts_with("Sandbox error: Access denied"));

        let empty: Error = SandboxError::InvalidIdentifier { name: "agent_id" }.into();
        assert!(!empty.is_sandbox_violation());
        assert!(!Error::config("bad").is_sandbox_violation());
    }
}
