//! HTTP client module
//!
//! Provides the HTTP transport used by every API operation.
//!
//! # Features
//!
//! - **Endpoint handling**: Paths are joined onto the configured endpoint
//! - **Authentication**: The API token is sent as `Fastly-Key`
//! - **Bodies**: JSON:API documents and form-encoded fields
//! - **Transport trait**: The seam the paginator reads pages through

mod client;
mod transport;

pub use client::{HttpClient, RequestBody, RequestConfig};
pub use transport::Transport;

#[cfg(test)]
mod tests;
