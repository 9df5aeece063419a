//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CINS_LIST_URL, DEFAULT_MAX_CONCURRENCY, DNS_TIMEOUT_SECS, DOWNLOAD_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How check results are written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Result table followed by a per-category summary
    Table,
    /// A single JSON document
    Json,
}

/// Upstream resolver used for blocklist queries.
///
/// Several DNSBLs (Spamhaus in particular) refuse queries relayed through
/// large public resolvers, so the system configuration is the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResolverChoice {
    /// Nameservers from the operating system configuration
    System,
    /// Google Public DNS
    Google,
    /// Cloudflare 1.1.1.1
    Cloudflare,
    /// Quad9
    Quad9,
}

/// Command-line options and library configuration.
///
/// # Examples
///
/// ```bash
/// # Check an address against every list
/// reputation_check 192.0.2.10
///
/// # Only spam lists, JSON output
/// reputation_check example.com --category spam --output json
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "reputation_check",
    about = "Checks whether an IP address or domain is listed on DNS blocklists and reputation lists."
)]
pub struct Config {
    /// IPv4 address or domain name to check
    #[arg(required_unless_present = "list_services")]
    pub target: Option<String>,

    /// Only check services in this category (e.g. spam, botnet, reputation)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Output format: table|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Per-query DNS timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Timeout for bulk list downloads in seconds
    #[arg(long, default_value_t = DOWNLOAD_TIMEOUT_SECS)]
    pub download_timeout_seconds: u64,

    /// Maximum number of services checked at once (1 = sequential)
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Upstream resolver: system|google|cloudflare|quad9
    #[arg(long, value_enum, default_value_t = ResolverChoice::System)]
    pub resolver: ResolverChoice,

    /// Directory for downloaded lists (defaults to the OS cache directory)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Source of the CINSscore bad-guys list
    #[arg(long, default_value = CINS_LIST_URL)]
    pub cins_list_url: String,

    /// Print the configured services and exit
    #[arg(long)]
    pub list_services: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: None,
            category: None,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            output: OutputFormat::Table,
            timeout_seconds: DNS_TIMEOUT_SECS,
            download_timeout_seconds: DOWNLOAD_TIMEOUT_SECS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            resolver: ResolverChoice::System,
            cache_dir: None,
            cins_list_url: CINS_LIST_URL.to_string(),
            list_services: false,
        }
    }
}
