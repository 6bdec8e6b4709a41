//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables over defaults. The configuration is read once at
//! startup and shared immutably afterwards.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use path_clean::PathClean;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// Sandbox root below the user's home directory.
const DEFAULT_SANDBOX_SUBDIR: &str = ".hive/workdir/workspaces";

/// Maximum file size for reading (bytes) - 10MB.
pub const DEFAULT_MAX_FILE_READ_SIZE: u64 = 10 * 1024 * 1024;

/// Buffer size used when reading files.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 8192;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Sandbox root configuration.
    pub sandbox: SandboxConfig,

    /// File operation limits.
    pub limits: LimitsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the session sandbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Absolute directory under which every session directory is created,
    /// laid out as `root/<workspace_id>/<agent_id>/<session_id>`.
    pub root: PathBuf,
}

/// Limits applied by the file tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Files larger than this many bytes are not read.
    pub max_file_read_size: u64,

    /// Buffer size in bytes for file reads.
    pub read_chunk_size: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            root: default_sandbox_root(dirs::home_dir()),
        }
    }
}

/// `home/.hive/workdir/workspaces`, or the same below the current directory
/// when no home directory is known.
fn default_sandbox_root(home: Option<PathBuf>) -> PathBuf {
    let base = home.unwrap_or_else(|| absolutize(PathBuf::from(".")));
    base.join(DEFAULT_SANDBOX_SUBDIR)
}

/// Make `path` absolute against the current directory.
fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path).clean(),
        Err(e) => {
            warn!("Cannot determine current directory for {:?}: {}", path, e);
            path
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_read_size: DEFAULT_MAX_FILE_READ_SIZE,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "sandbox-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            sandbox: SandboxConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_SANDBOX_ROOT`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(with_timestamps) = parse_env("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = with_timestamps;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(root) = std::env::var("MCP_SANDBOX_ROOT") {
            config.sandbox.root = absolutize(PathBuf::from(root));
        }

        if let Some(size) = parse_env("MCP_MAX_FILE_READ_SIZE") {
            config.limits.max_file_read_size = size;
        }

        if let Some(size) = parse_env("MCP_READ_CHUNK_SIZE") {
            config.limits.read_chunk_size = size;
        }

        config
    }
}

/// Read and parse an override, keeping the default when it is malformed.
fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}
