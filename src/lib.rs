// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Fastly API client
//!
//! An async client for the Fastly configuration API, centred on a
//! page-number paginator for JSON:API list endpoints.
//!
//! ## Features
//!
//! - **Service authorizations**: CRUD plus a lazy paginator over every grant
//! - **Web application firewalls**: WAFs, OWASP settings, rules, rulesets and rule statuses
//! - **Gzip rules**: The older plain-JSON, form-encoded endpoints
//! - **Pluggable transport**: Paginators read pages through the [`http::Transport`] trait
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fastly_api::{Client, ListServiceAuthorizationsInput, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::from_env()?;
//!
//!     let mut pages = client.new_list_service_authorizations_paginator(
//!         &ListServiceAuthorizationsInput { per_page: 50, page: 0 },
//!     );
//!     while pages.has_next() {
//!         for sa in pages.get_next().await? {
//!             println!("{} {}", sa.id, sa.permission);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           Client                                │
//! │  service authorizations · wafs · owasp · rules · gzip           │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────┬─────────────────────┐
//! │   Paginator  │     JSON:API codec        │     HttpClient      │
//! ├──────────────┼───────────────────────────┼─────────────────────┤
//! │ page[size]   │ Document / ResourceObject │ Fastly-Key header   │
//! │ page[number] │ links first/last/next     │ JSON:API + forms    │
//! │ next / last  │ typed models              │ Transport trait     │
//! └──────────────┴───────────────────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and constants
pub mod types;

/// Client configuration
pub mod config;

/// HTTP transport
pub mod http;

/// JSON:API codec
pub mod decode;

/// Page-number pagination
pub mod pagination;

/// The API client
pub mod client;

/// API resources and their operations
pub mod resources;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::Client;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use pagination::{LinkPolicy, PageOptions, Paginator};
pub use resources::*;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
