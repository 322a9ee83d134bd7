use crate::cli::Args;
use crate::config::Config;
use crate::data_fetcher::cache::DiskCache;
use crate::error::AppError;
use crate::server;
use tracing::info;

/// Handles the --list-config command.
///
/// Displays current configuration settings, with credentials reported
/// only as set or unset.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await?;
    Ok(())
}

/// Handles the --clear-cache command.
///
/// Deletes all cached season tables from the configured cache
/// directory. The next request that needs a table refetches it from
/// the league API.
pub async fn handle_clear_cache_command() -> Result<(), AppError> {
    let config = Config::load().await?;
    let cache = DiskCache::new(config.cache_dir());
    let removed = cache.clear().await?;
    info!("Cleared {removed} cached table(s) from {}", cache.dir().display());
    println!("Removed {removed} cached table(s).");
    Ok(())
}

/// Starts the report server on the address given by the arguments.
///
/// Runs until interrupted.
pub async fn handle_serve_command(args: &Args) -> Result<(), AppError> {
    let config = Config::load().await?;
    server::serve(config, &args.host, args.port).await
}
