//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;
use crate::scan::{ReportFormat, ResolverKind};

/// Bulk reputation checker for AbuseIPDB
///
/// Reads hosts from a list, resolves each one to IPv4, asks AbuseIPDB about
/// it and writes every host with reported abuse to a report file.
/// Running without a command scans `ip.txt` into `res.txt`.
///
/// Get your API key at: https://www.abuseipdb.com/account/api
#[derive(Parser, Debug)]
#[command(name = "abusescan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// AbuseIPDB API key (or set ABUSEIPDB_API_KEY env var)
    #[arg(short = 'k', long, env = "ABUSEIPDB_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, env = "ABUSESCAN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override the API base URL
    #[arg(long, env = "ABUSEIPDB_API_URL", global = true, hide = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every host in a list and report the abusive ones
    Scan(ScanArgs),

    /// Resolve and check a single host
    Check(CheckArgs),

    /// Show which IPv4 address each target resolves to
    Resolve(ResolveArgs),

    /// Read back a report file
    Report(ReportArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Scan command
// ============================================================================

#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Host list, one hostname or IP per line [default: ip.txt]
    #[arg(short, long)]
    pub input: Option<String>,

    /// Report file, truncated on start [default: res.txt]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Resolver backend
    #[arg(long, value_enum)]
    pub resolver: Option<ResolverKind>,

    /// Report file format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Count failed checks and continue instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Throttle requests to this many per minute
    #[arg(long, value_name = "PER_MIN")]
    pub rate_limit: Option<u32>,
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Hostname or IPv4 address
    pub target: String,

    /// Resolver backend
    #[arg(long, value_enum)]
    pub resolver: Option<ResolverKind>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub output_format: Option<OutputFormat>,
}

// ============================================================================
// Resolve command
// ============================================================================

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Hostnames or addresses
    #[arg(required = true)]
    pub targets: Vec<String>,

    /// Resolver backend
    #[arg(long, value_enum)]
    pub resolver: Option<ResolverKind>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub output_format: Option<OutputFormat>,
}

// ============================================================================
// Report command
// ============================================================================

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Report file written by `scan`
    pub file: String,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub output_format: Option<OutputFormat>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
