//! Argument vectors for the toolchain command line.

use crate::config::ToolchainConfig;
use crate::submission::TargetFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Informational queries that need no artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InfoAction {
    Help,
    InstructionSet,
    Version,
}

impl InfoAction {
    pub fn flag(&self) -> &'static str {
        match self {
            InfoAction::Help => "--help",
            InfoAction::InstructionSet => "--instruction-set",
            InfoAction::Version => "--version",
        }
    }
}

impl FromStr for InfoAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(InfoAction::Help),
            "instruction-set" | "is" => Ok(InfoAction::InstructionSet),
            "version" => Ok(InfoAction::Version),
            other => Err(format!("unknown info action: {}", other)),
        }
    }
}

/// What a single toolchain run is asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    Info(InfoAction),
    Verify,
    Compile(TargetFormat),
}

impl fmt::Display for ToolAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolAction::Info(action) => write!(f, "info({})", action.flag().trim_start_matches('-')),
            ToolAction::Verify => f.write_str("verify"),
            ToolAction::Compile(format) => write!(f, "compile({})", format),
        }
    }
}

/// Fully resolved command line for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    action: ToolAction,
    program: String,
    arguments: Vec<String>,
    target: Option<PathBuf>,
}

impl ToolInvocation {
    pub fn info(config: &ToolchainConfig, action: InfoAction) -> Self {
        Self::build(
            config,
            ToolAction::Info(action),
            None,
            vec![action.flag().to_string()],
        )
    }

    pub fn verify(config: &ToolchainConfig, artifact: &Path) -> Self {
        Self::build(
            config,
            ToolAction::Verify,
            Some(artifact),
            vec![
                "--verify".to_string(),
                artifact.to_string_lossy().into_owned(),
            ],
        )
    }

    pub fn compile(config: &ToolchainConfig, artifact: &Path, format: TargetFormat) -> Self {
        Self::build(
            config,
            ToolAction::Compile(format),
            Some(artifact),
            vec![
                "--compile".to_string(),
                artifact.to_string_lossy().into_owned(),
                format.flag(),
            ],
        )
    }

    fn build(
        config: &ToolchainConfig,
        action: ToolAction,
        target: Option<&Path>,
        flags: Vec<String>,
    ) -> Self {
        let mut arguments = config.launcher_args.clone();
        arguments.push(config.entry_point.clone());
        arguments.extend(flags);

        Self {
            action,
            program: config.program.clone(),
            arguments,
            target: target.map(Path::to_path_buf),
        }
    }

    pub fn action(&self) -> ToolAction {
        self.action
    }

    /// Executable to launch
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments after the executable, in order
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Artifact consumed by this run, if any
    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }
}
