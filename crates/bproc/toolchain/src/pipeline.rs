//! Submission-to-toolchain pipeline.
//!
//! validate -> write artifact -> invoke -> classify. Validation failures are
//! returned as `Err` before anything touches the disk; every later failure is
//! folded into the returned [`Envelope`].

use crate::classifier::{Classifier, Envelope};
use crate::config::{ToolchainConfig, WorkspaceConfig};
use crate::error::ValidationResult;
use crate::invocation::{InfoAction, ToolInvocation};
use crate::invoker::Invoker;
use crate::submission::{ProgramSubmission, TargetFormat};
use crate::workspace::Workspace;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{instrument, warn};

/// Orchestrates toolchain runs for incoming requests
#[derive(Debug, Clone)]
pub struct Pipeline {
    toolchain: Arc<ToolchainConfig>,
    workspace: Arc<WorkspaceConfig>,
    invoker: Invoker,
    classifier: Classifier,
    cancel: watch::Receiver<bool>,
}

impl Pipeline {
    /// `cancel` is shared by every run; flipping it to `true` kills them all.
    pub fn new(
        toolchain: ToolchainConfig,
        workspace: WorkspaceConfig,
        cancel: watch::Receiver<bool>,
    ) -> Self {
        let invoker = Invoker::new(toolchain.timeout());
        let classifier = Classifier::new(toolchain.nonzero_exit);
        Self {
            toolchain: Arc::new(toolchain),
            workspace: Arc::new(workspace),
            invoker,
            classifier,
            cancel,
        }
    }

    /// Forward an informational flag to the toolchain.
    #[instrument(skip(self))]
    pub async fn info(&self, action: InfoAction) -> Envelope {
        let invocation = ToolInvocation::info(&self.toolchain, action);
        let outcome = self.invoker.run(&invocation, self.cancel.clone()).await;
        self.classifier.classify(outcome)
    }

    /// Syntax-check a submission. `type` is ignored.
    #[instrument(skip_all, fields(program_len = submission.program.len()))]
    pub async fn verify(&self, submission: &ProgramSubmission) -> ValidationResult<Envelope> {
        submission.validate_for_verify()?;
        Ok(self.run_with_artifact(&submission.program, None).await)
    }

    /// Compile a submission to its requested `type`.
    #[instrument(skip_all, fields(program_len = submission.program.len()))]
    pub async fn compile(&self, submission: &ProgramSubmission) -> ValidationResult<Envelope> {
        let format = submission.validate_for_compile()?;
        Ok(self
            .run_with_artifact(&submission.program, Some(format))
            .await)
    }

    async fn run_with_artifact(&self, source: &str, format: Option<TargetFormat>) -> Envelope {
        let workspace = match Workspace::prepare(&self.workspace.root).await {
            Ok(workspace) => workspace,
            Err(e) => {
                warn!("workspace unavailable: {}", e);
                return Envelope::error(e.to_string());
            }
        };
        self.run_in(workspace, source, format).await
    }

    /// The workspace is removed on every path out, including a dropped future.
    async fn run_in(
        &self,
        workspace: Workspace,
        source: &str,
        format: Option<TargetFormat>,
    ) -> Envelope {
        if let Err(e) = workspace.write_artifact(source.as_bytes()).await {
            warn!(run_id = %workspace.run_id(), "artifact write failed: {}", e);
            workspace.discard().await;
            return Envelope::error(e.to_string());
        }

        let artifact = workspace.artifact_path();
        let invocation = match format {
            Some(format) => ToolInvocation::compile(&self.toolchain, artifact, format),
            None => ToolInvocation::verify(&self.toolchain, artifact),
        };
        let outcome = self.invoker.run(&invocation, self.cancel.clone()).await;
        workspace.discard().await;

        self.classifier.classify(outcome)
    }
}
