//! BProC Daemon - web front end for the bpasm toolchain
//!
//! The daemon provides:
//! - REST API to verify and compile bpasm programs
//! - Passthroughs for the toolchain's help, instruction set and version
//! - Random example programs
//! - Static hosting for the web editor

use bproc_daemon::error::{DaemonError, DaemonResult};
use bproc_daemon::{DaemonConfig, Server};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// BProC Daemon CLI
#[derive(Parser)]
#[command(name = "bprocd")]
#[command(about = "BProC Daemon - web front end for the bpasm toolchain", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "BPROC_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(short, long, env = "BPROC_LISTEN_ADDR")]
    listen: Option<String>,

    /// API path prefix
    #[arg(long, env = "BPROC_API_PREFIX")]
    api_prefix: Option<String>,

    /// Allowed cross-origin source (`*` for any)
    #[arg(long, env = "BPROC_CORS_ORIGIN")]
    cors_origin: Option<String>,

    /// Directory of static web assets
    #[arg(long, env = "BPROC_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Toolchain entry point (e.g. the bproc-cli jar)
    #[arg(long, env = "BPROC_ENTRY_POINT")]
    entry_point: Option<String>,

    /// Directory of example programs
    #[arg(long, env = "BPROC_EXAMPLES_DIR")]
    examples_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "BPROC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "BPROC_LOG_JSON")]
    json: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply(self, config: &mut DaemonConfig) -> DaemonResult<()> {
        if let Some(listen) = self.listen {
            config.server.listen_addr = listen
                .parse()
                .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
        }
        if let Some(prefix) = self.api_prefix {
            config.server.api_prefix = prefix;
        }
        if let Some(origin) = self.cors_origin {
            config.server.cors_origin = origin;
        }
        if let Some(dir) = self.static_dir {
            config.server.static_dir = Some(dir);
        }
        if let Some(entry_point) = self.entry_point {
            config.toolchain.entry_point = entry_point;
        }
        if let Some(dir) = self.examples_dir {
            config.examples.dir = dir;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if self.json {
            config.logging.json = true;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    cli.apply(&mut config)?;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    println!(
        r#"
  BProC-WEB - bpasm toolchain daemon
  Version: {}
  Listening: {}
  API: {}
"#,
        env!("CARGO_PKG_VERSION"),
        config.server.listen_addr,
        config.server.api_base()
    );

    // Create and run server
    let server = Server::new(config)?;
    server.run().await
}
