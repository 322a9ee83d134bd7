//! Fantasy Football League Dashboard Library
//!
//! This library provides functionality for fetching fantasy football
//! league data, caching it on disk, computing league records and
//! head-to-head standings, and rendering HTML report pages.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ffl_dashboard::config::Config;
//! use ffl_dashboard::error::AppError;
//! use ffl_dashboard::server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!
//!     // Serve the report pages until interrupted
//!     server::serve(config, "127.0.0.1", 8080).await
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod logging;
pub mod report;
pub mod server;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::LeagueClient;
pub use data_fetcher::cache::DiskCache;
pub use data_fetcher::models::{DraftPickRow, MatchupRow, TeamSeasonRow};
pub use error::AppError;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
