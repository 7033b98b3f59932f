//! jbd: the junkboy anchor server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ cors ─▶ request id ─▶ logging ─▶ regex router ─┬─▶ 404 / 405
//!                                                                   │
//!                                                                   ▼
//!                                                            anchor handler
//!                                                                   │
//!                                                                   ▼
//!                                                            anchor service
//!                                                                   │
//!                                                                   ▼
//!                                                    repository (SQLite / memory)
//! ```
//!
//! Configuration comes from an optional TOML file, overridden by flags.

use std::path::PathBuf;

use clap::Parser;

use junkboy::config::{read_config, validate_config, ConfigError, ServiceConfig, StorageBackend};
use junkboy::lifecycle::{self, Shutdown};
use junkboy::observability::logging;

#[derive(Parser)]
#[command(name = "jbd")]
#[command(about = "Anchor bookmark service", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:8080
    #[arg(short, long)]
    bind: Option<String>,

    /// SQLite database path or URL
    #[arg(long)]
    dsn: Option<String>,

    /// Keep anchors in memory instead of SQLite
    #[arg(long)]
    memory: bool,
}

impl Cli {
    fn into_config(self) -> Result<ServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(dsn) = self.dsn {
            config.storage.dsn = dsn;
        }
        if self.memory {
            config.storage.backend = StorageBackend::Memory;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(&config.observability.log_level);

    tracing::info!("jbd v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = ?config.storage.backend,
        prefix = %config.api.path_prefix,
        "Configuration loaded"
    );

    let ready = lifecycle::start(config).await?;
    tracing::info!(address = %ready.listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    ready.server.run(ready.listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
