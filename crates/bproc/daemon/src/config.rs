//! Configuration for bproc-daemon

use bproc_toolchain::{ToolchainConfig, WorkspaceConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{DaemonError, DaemonResult};

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// External toolchain
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    /// Scratch storage for submitted programs
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Example programs served by `/example`
    #[serde(default)]
    pub examples: ExamplesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Path segment every API route lives under
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Allowed cross-origin source, `*` for any
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Directory of static web assets served outside the API prefix
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            api_prefix: default_api_prefix(),
            cors_origin: default_cors_origin(),
            static_dir: None,
            max_body_size: default_max_body_size(),
        }
    }
}

impl ServerConfig {
    /// API prefix as an absolute path without trailing slash, e.g. `/api`
    pub fn api_base(&self) -> String {
        format!("/{}", self.api_prefix.trim_matches('/'))
    }
}

/// Example program directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamplesConfig {
    #[serde(default = "default_examples_dir")]
    pub dir: PathBuf,
}

impl Default for ExamplesConfig {
    fn default() -> Self {
        Self {
            dir: default_examples_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8998))
}

fn default_api_prefix() -> String {
    "api".to_string()
}

fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_max_body_size() -> usize {
    1024 * 1024
}

fn default_examples_dir() -> PathBuf {
    PathBuf::from("samples")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration from defaults, an optional file, then `BPROC_*` env vars.
    ///
    /// Nested keys use a double underscore: `BPROC_TOOLCHAIN__TIMEOUT_SECS=60`.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&DaemonConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("BPROC")
                .prefix_separator("_")
                .separator("__")
                .list_separator(" ")
                .with_list_parse_key("toolchain.launcher_args")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Reject settings the daemon cannot start with.
    pub fn validate(&self) -> DaemonResult<()> {
        if self.server.api_prefix.trim_matches('/').is_empty() {
            return Err(DaemonError::Config("api_prefix must not be empty".to_string()));
        }
        if self.server.cors_origin != "*"
            && axum::http::HeaderValue::from_str(&self.server.cors_origin).is_err()
        {
            return Err(DaemonError::Config(format!(
                "invalid cors_origin: {}",
                self.server.cors_origin
            )));
        }
        if self.toolchain.program.trim().is_empty() {
            return Err(DaemonError::Config(
                "toolchain.program must not be empty".to_string(),
            ));
        }
        if self.toolchain.timeout_secs == 0 {
            return Err(DaemonError::Config(
                "toolchain.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
