//! Toolchain and workspace configuration.
//!
//! Values are built once at startup and shared immutably; nothing here is
//! read from the environment directly.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How a toolchain run that exits non-zero is reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonzeroExit {
    /// Report as an `error` envelope carrying the toolchain output.
    #[default]
    Error,
    /// Report as an `info` envelope, the way the first web frontend did.
    Info,
}

/// External toolchain settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Executable to launch
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the entry point (e.g. `-jar`)
    #[serde(default = "default_launcher_args")]
    pub launcher_args: Vec<String>,

    /// Entry point handed to the launcher
    #[serde(default = "default_entry_point")]
    pub entry_point: String,

    /// Upper bound on a single toolchain run, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Classification of non-zero exits
    #[serde(default)]
    pub nonzero_exit: NonzeroExit,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            launcher_args: default_launcher_args(),
            entry_point: default_entry_point(),
            timeout_secs: default_timeout_secs(),
            nonzero_exit: NonzeroExit::default(),
        }
    }
}

impl ToolchainConfig {
    /// Invocation timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Scratch storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Directory under which every run gets its own subdirectory
    #[serde(default = "default_workspace_root")]
    pub root: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_workspace_root(),
        }
    }
}

fn default_program() -> String {
    "java".to_string()
}

fn default_launcher_args() -> Vec<String> {
    vec!["-jar".to_string()]
}

fn default_entry_point() -> String {
    "libs/bproc-cli-v1_0.jar".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_workspace_root() -> PathBuf {
    std::env::temp_dir().join("bproc-web")
}
