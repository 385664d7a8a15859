//! # BProC Toolchain - orchestration core for bpasm submissions
//!
//! Takes program source submitted over the web API and runs it through the
//! external bpasm toolchain:
//!
//! - [`submission`]: request payloads and their validation
//! - [`workspace`]: run-scoped scratch directories holding the artifact
//! - [`invocation`]: command lines for info, verify and compile runs
//! - [`invoker`]: process execution with timeout and cancellation
//! - [`classifier`]: outcome to `{"message", "type"}` envelope
//! - [`pipeline`]: the four steps chained together
//!
//! ## Example
//!
//! ```rust,no_run
//! use bproc_toolchain::{Pipeline, ProgramSubmission, ToolchainConfig, WorkspaceConfig};
//! use tokio::sync::watch;
//!
//! # async fn example() {
//! let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//! let pipeline = Pipeline::new(
//!     ToolchainConfig::default(),
//!     WorkspaceConfig::default(),
//!     shutdown_rx,
//! );
//!
//! let submission = ProgramSubmission::new("NOP").with_format("hex");
//! match pipeline.compile(&submission).await {
//!     Ok(envelope) => println!("{:?}: {}", envelope.kind, envelope.message),
//!     Err(rejected) => eprintln!("rejected: {}", rejected),
//! }
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod invocation;
pub mod invoker;
pub mod pipeline;
pub mod submission;
pub mod workspace;

pub use classifier::{Classifier, Envelope, EnvelopeKind};
pub use config::{NonzeroExit, ToolchainConfig, WorkspaceConfig};
pub use error::{ValidationError, ValidationResult, WorkspaceError, WorkspaceResult};
pub use invocation::{InfoAction, ToolAction, ToolInvocation};
pub use invoker::{InvocationOutcome, Invoker};
pub use pipeline::Pipeline;
pub use submission::{ProgramSubmission, TargetFormat};
pub use workspace::Workspace;
