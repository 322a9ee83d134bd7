// src/main.rs
mod analysis;
mod cli;
mod commands;
mod config;
mod constants;
mod data_fetcher;
mod error;
mod logging;
mod report;
mod server;

use clap::Parser;
use cli::Args;
use error::AppError;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Config-only commands skip log setup so they stay quiet
    if args.list_config {
        return commands::handle_list_config_command().await;
    }

    let (log_file_path, _guard) = logging::setup_logging(&args).await?;
    info!("Logging to {log_file_path}");

    if args.clear_cache {
        return commands::handle_clear_cache_command().await;
    }

    commands::handle_serve_command(&args).await
}
