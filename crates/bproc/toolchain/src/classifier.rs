//! Mapping invocation outcomes onto the response envelope.

use crate::config::NonzeroExit;
use crate::invoker::InvocationOutcome;
use serde::{Deserialize, Serialize};

/// Envelope `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeKind {
    Info,
    Error,
}

/// Body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: EnvelopeKind,
}

impl Envelope {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: EnvelopeKind::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: EnvelopeKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == EnvelopeKind::Error
    }
}

/// Turns invocation outcomes into envelopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    nonzero_exit: NonzeroExit,
}

impl Classifier {
    pub fn new(nonzero_exit: NonzeroExit) -> Self {
        Self { nonzero_exit }
    }

    pub fn classify(&self, outcome: InvocationOutcome) -> Envelope {
        match outcome {
            InvocationOutcome::Exited {
                success: true,
                output,
                ..
            } => Envelope::info(String::from_utf8_lossy(&output)),
            InvocationOutcome::Exited { code, output, .. } => {
                let message = if output.is_empty() {
                    match code {
                        Some(code) => format!("toolchain exited with status {}", code),
                        None => "toolchain terminated by signal".to_string(),
                    }
                } else {
                    String::from_utf8_lossy(&output).into_owned()
                };
                match self.nonzero_exit {
                    NonzeroExit::Error => Envelope::error(message),
                    NonzeroExit::Info => Envelope::info(message),
                }
            }
            InvocationOutcome::NotLaunched { error } | InvocationOutcome::WaitFailed { error } => {
                Envelope::error(error)
            }
            InvocationOutcome::TimedOut { after } => {
                Envelope::error(format!("toolchain timed out after {}s", after.as_secs_f64()))
            }
            InvocationOutcome::Cancelled => Envelope::error("toolchain invocation cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn exited(code: i32, output: &[u8]) -> InvocationOutcome {
        InvocationOutcome::Exited {
            code: Some(code),
            success: code == 0,
            output: output.to_vec(),
        }
    }

    #[test]
    fn test_success_is_info_with_output() {
        let envelope = Classifier::default().classify(exited(0, b"OK: 1 instruction\n"));
        assert_eq!(envelope, Envelope::info("OK: 1 instruction\n"));
    }

    #[test]
    fn test_nonzero_exit_follows_policy() {
        let outcome = exited(1, b"line 1: unknown mnemonic FOO");

        let strict = Classifier::new(NonzeroExit::Error).classify(outcome.clone());
        assert_eq!(strict, Envelope::error("line 1: unknown mnemonic FOO"));

        let legacy = Classifier::new(NonzeroExit::Info).classify(outcome);
        assert_eq!(legacy, Envelope::info("line 1: unknown mnemonic FOO"));
    }

    #[test]
    fn test_silent_nonzero_exit_mentions_status() {
        let envelope = Classifier::default().classify(exited(2, b""));
        assert_eq!(envelope, Envelope::error("toolchain exited with status 2"));
    }

    #[test]
    fn test_launch_failure_is_error() {
        let envelope = Classifier::new(NonzeroExit::Info).classify(InvocationOutcome::NotLaunched {
            error: "No such file or directory (os error 2)".to_string(),
        });
        assert!(envelope.is_error());
        assert!(envelope.message.contains("No such file"));
    }

    #[test]
    fn test_timeout_and_cancel_are_errors() {
        let timed_out = Classifier::default().classify(InvocationOutcome::TimedOut {
            after: Duration::from_secs(30),
        });
        assert_eq!(timed_out, Envelope::error("toolchain timed out after 30s"));

        let cancelled = Classifier::default().classify(InvocationOutcome::Cancelled);
        assert!(cancelled.is_error());
    }

    #[test]
    fn test_envelope_wire_shape() {
        let json = serde_json::to_value(Envelope::info("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"message": "hi", "type": "info"}));
    }
}
