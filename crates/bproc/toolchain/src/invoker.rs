//! Launching the toolchain and collecting what it prints.

use crate::invocation::ToolInvocation;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

/// How a single toolchain run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// The process could not be started.
    NotLaunched { error: String },

    /// The process started but its output could not be collected.
    WaitFailed { error: String },

    /// The process outlived the timeout and was killed.
    TimedOut { after: Duration },

    /// Cancellation fired before the process finished; it was killed.
    Cancelled,

    /// The process exited on its own. `output` is stdout followed by stderr.
    Exited {
        code: Option<i32>,
        success: bool,
        output: Vec<u8>,
    },
}

/// Runs toolchain invocations with a deadline and a cancellation signal.
#[derive(Debug, Clone)]
pub struct Invoker {
    timeout: Duration,
}

impl Invoker {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run `invocation` once. `cancel` flipping to `true` kills the child.
    ///
    /// Never retries; every failure mode is reported in the outcome.
    #[instrument(skip_all, fields(action = %invocation.action(), program = invocation.program()))]
    pub async fn run(
        &self,
        invocation: &ToolInvocation,
        mut cancel: watch::Receiver<bool>,
    ) -> InvocationOutcome {
        if *cancel.borrow_and_update() {
            return InvocationOutcome::Cancelled;
        }

        let mut command = Command::new(invocation.program());
        command
            .args(invocation.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("failed to launch toolchain: {}", e);
                return InvocationOutcome::NotLaunched {
                    error: e.to_string(),
                };
            }
        };

        let started = Instant::now();
        // Dropping the wait future drops the child, and kill_on_drop reaps it
        let wait = tokio::time::timeout(self.timeout, child.wait_with_output());

        tokio::select! {
            result = wait => match result {
                Ok(Ok(output)) => {
                    debug!(
                        status = %output.status,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "toolchain exited"
                    );
                    let mut combined = output.stdout;
                    combined.extend_from_slice(&output.stderr);
                    InvocationOutcome::Exited {
                        code: output.status.code(),
                        success: output.status.success(),
                        output: combined,
                    }
                }
                Ok(Err(e)) => {
                    warn!("failed to collect toolchain output: {}", e);
                    InvocationOutcome::WaitFailed { error: e.to_string() }
                }
                Err(_) => {
                    warn!(timeout_ms = self.timeout.as_millis() as u64, "toolchain timed out");
                    InvocationOutcome::TimedOut { after: self.timeout }
                }
            },
            _ = cancelled(&mut cancel) => {
                warn!("toolchain run cancelled");
                InvocationOutcome::Cancelled
            }
        }
    }
}

/// Resolves once the watched flag becomes `true`.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            // Sender gone: nobody can cancel any more
            std::future::pending::<()>().await;
        }
    }
}
