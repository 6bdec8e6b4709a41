//! Core module containing shared infrastructure components.
//!
//! Configuration, error handling, the sandbox security pipeline, server
//! lifecycle and the transport layer live here. Tool definitions sit in
//! `domains` and call into [`security`] for every path they touch.

pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod transport;

pub use config::{Config, LimitsConfig, SandboxConfig};
pub use error::{Error, Result};
pub use security::{SandboxError, SecurePathResolver, TenantPath, resolve_secure_path};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
