//! Task tracking HTTP service.
//!
//! A small file-backed task API: create, list/search, patch, and delete
//! task records over plain HTTP, persisted as a single JSON snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use task_tracker::config::{load_config, ServerConfig};
use task_tracker::http::HttpServer;
use task_tracker::lifecycle::Shutdown;
use task_tracker::observability::init_logging;
use task_tracker::storage::Database;

#[derive(Parser)]
#[command(name = "task-tracker")]
#[command(about = "File-backed task tracking HTTP service", long_about = None)]
struct Args {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        db_path = %config.storage.db_path,
        "configuration loaded"
    );

    let store = Arc::new(Database::open(&config.storage.db_path).await?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let shutdown = Shutdown::new();
    shutdown.spawn_ctrl_c_listener();

    let server = HttpServer::new(Arc::clone(&store));
    server.run(listener, shutdown.subscribe()).await?;

    store.flush().await?;
    tracing::info!("final snapshot written, shutdown complete");
    Ok(())
}
