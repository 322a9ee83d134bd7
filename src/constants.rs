//! Application-wide constants and configuration defaults
//!
//! This module centralizes magic numbers and fixed policy values so the
//! rest of the codebase stays free of inline literals.

#![allow(dead_code)]

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// First season covered by the default report window
pub const DEFAULT_FIRST_SEASON: i32 = 2019;

/// Last season covered by the default report window
pub const DEFAULT_LAST_SEASON: i32 = 2023;

/// First scoring week of a season
pub const FIRST_WEEK: u32 = 1;

/// Last scoring week of a season (17-game era plus one bye-adjusted week)
pub const LAST_WEEK: u32 = 18;

/// Default listen address for the report server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port for the report server
pub const DEFAULT_PORT: u16 = 8080;

/// Disk cache data kinds. Filenames are `{kind}_{year}.json`, so these
/// must stay stable across releases or existing cache entries become
/// unreachable.
pub mod cache_kind {
    /// Per-week matchup results for one season
    pub const BOX_SCORES: &str = "box_scores";

    /// Per-team season statistics for one season
    pub const TEAMS: &str = "teams";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for league id override
    pub const LEAGUE_ID: &str = "FFL_LEAGUE_ID";

    /// Environment variable for the SWID session cookie
    pub const SWID: &str = "FFL_SWID";

    /// Environment variable for the espn_s2 session cookie
    pub const ESPN_S2: &str = "FFL_ESPN_S2";

    /// Environment variable for API domain override
    pub const API_DOMAIN: &str = "FFL_API_DOMAIN";

    /// Environment variable for cache directory override
    pub const CACHE_DIR: &str = "FFL_CACHE_DIR";

    /// Environment variable for draft CSV directory override
    pub const DRAFT_DIR: &str = "FFL_DRAFT_DIR";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "FFL_LOG_FILE";

    /// Environment variable for HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "FFL_HTTP_TIMEOUT";
}

/// Retry configuration for league API calls
pub mod retry {
    /// Maximum number of retry attempts for API calls
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 250;
}
