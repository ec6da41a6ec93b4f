//! CLI module
//!
//! Command-line interface over the API client.
//!
//! # Commands
//!
//! - `service-authorizations list|get` - Service authorizations, optionally every page
//! - `wafs list` - Firewalls of a service version
//! - `waf-rule-statuses` - Rule statuses of a firewall
//! - `gzips list` - Gzip rules of a service version

mod commands;
mod runner;

pub use commands::{
    Cli, Commands, GzipCommands, OutputFormat, ServiceAuthorizationCommands, WafCommands,
};
pub use runner::Runner;
