//! support-desk - help-desk ticket tracker server
//!
//! Entry point for the support-desk HTTP server: parses flags, loads the
//! layered configuration, wires storage and notification dispatch, and
//! serves the REST API.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use support_desk::error::Result;

/// Command-line flags for the server
#[derive(Parser)]
#[command(name = "support-desk", version, about)]
struct Cli {
    /// Path to a configuration file
    #[arg(short, long, env = "SUPPORT_DESK_CONFIG")]
    config: Option<PathBuf>,

    /// Override the storage data directory
    #[arg(long)]
    data_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("Fatal: {e}");
        process::exit(1);
    }
}

#[cfg(feature = "api")]
async fn run(cli: Cli) -> Result<()> {
    use std::sync::Arc;
    use support_desk::api;
    use support_desk::config::AppConfig;
    use support_desk::notify::{self, LogSink, NotificationDispatcher};
    use support_desk::storage::FileStorage;

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    let store = Arc::new(FileStorage::new(config.storage.data_dir.clone()));

    let (dispatcher, events) = NotificationDispatcher::channel();
    let _worker = notify::spawn_worker(events, Arc::new(LogSink));

    let state = api::AppState::new(store, dispatcher);
    api::serve(&config, state).await
}

#[cfg(not(feature = "api"))]
async fn run(_cli: Cli) -> Result<()> {
    Err(support_desk::SupportDeskError::custom(
        "This binary was built without the 'api' feature; nothing to serve",
    ))
}
