//! Transport seam consumed by the paginator
//!
//! The paginator only needs "GET this path with these params and give me
//! the body". Keeping that behind a trait lets tests drive pagination
//! from canned pages without a socket.

use super::client::RequestConfig;
use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Minimal read-only HTTP transport
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET and return the full response body.
    ///
    /// Non-2xx responses and connection failures come back as errors.
    async fn get(&self, path: &str, config: RequestConfig) -> Result<Bytes>;
}
