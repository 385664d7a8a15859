//! BProC Daemon library
//!
//! HTTP front end for the bpasm toolchain:
//! - REST API handlers (info passthroughs, verify, compile, examples)
//! - Configuration loading
//! - Example program library
//! - Server lifecycle management
//!
//! The submission pipeline itself lives in `bproc-toolchain`.

pub mod api;
pub mod config;
pub mod error;
pub mod library;
pub mod server;

pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError, LibraryError};
pub use library::ExampleLibrary;
pub use server::Server;
