//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fastly configuration API CLI
#[derive(Parser, Debug)]
#[command(name = "fastly-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Service authorizations
    #[command(subcommand)]
    ServiceAuthorizations(ServiceAuthorizationCommands),

    /// Web application firewalls
    #[command(subcommand)]
    Wafs(WafCommands),

    /// Rule statuses of a firewall
    WafRuleStatuses {
        /// Service id
        #[arg(long)]
        service: String,

        /// Firewall id
        #[arg(long)]
        waf: String,

        /// Only rules in this status (log, block, disabled)
        #[arg(long)]
        status: Option<String>,
    },

    /// Gzip rules
    #[command(subcommand)]
    Gzips(GzipCommands),
}

/// `service-authorizations` subcommands
#[derive(Subcommand, Debug)]
pub enum ServiceAuthorizationCommands {
    /// List service authorizations
    List {
        /// Page size (capped at 100)
        #[arg(long, default_value = "0")]
        per_page: u32,

        /// Page to start from
        #[arg(long, default_value = "0")]
        page: u32,

        /// Walk every remaining page
        #[arg(long)]
        all: bool,
    },

    /// Show one service authorization
    Get {
        /// Service authorization id
        id: String,
    },
}

/// `wafs` subcommands
#[derive(Subcommand, Debug)]
pub enum WafCommands {
    /// List the firewalls of a service version
    List {
        /// Service id
        #[arg(long)]
        service: String,

        /// Service version
        #[arg(long)]
        version: u32,
    },
}

/// `gzips` subcommands
#[derive(Subcommand, Debug)]
pub enum GzipCommands {
    /// List the gzip rules of a service version
    List {
        /// Service id
        #[arg(long)]
        service: String,

        /// Service version
        #[arg(long)]
        version: u32,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}
