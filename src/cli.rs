use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Fantasy Football League Dashboard
///
/// Serves HTML reports for a fantasy football league: weekly box
/// scores, team season records, all-time league records, head-to-head
/// standings between owners, and draft history loaded from CSV files.
///
/// With no command flags the report server starts on the configured
/// address. Season data is fetched from the league API on first use
/// and cached on disk; delete the cache (or run --clear-cache) to
/// force a refetch.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Address to bind the report server to.
    #[arg(long = "host", default_value = DEFAULT_HOST, help_heading = "Server")]
    pub host: String,

    /// Port to bind the report server to.
    #[arg(short = 'p', long = "port", default_value_t = DEFAULT_PORT, help_heading = "Server")]
    pub port: u16,

    /// List current configuration settings and exit.
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Delete all cached season tables and exit. Entries are refetched
    /// from the league API on the next request that needs them.
    #[arg(long = "clear-cache", help_heading = "Configuration")]
    pub clear_cache: bool,

    /// Mirror logs to stdout even for quick commands that normally
    /// log only to file.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs go to the
    /// default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
