//! HTTP client for the Fastly API
//!
//! Thin wrapper over `reqwest` that handles:
//! - Endpoint joining and default headers (including `Fastly-Key`)
//! - JSON:API and form-encoded request bodies
//! - Mapping non-2xx responses to [`Error::HttpStatus`]

use super::transport::Transport;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{API_KEY_HEADER, JSONAPI_MEDIA_TYPE};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Request body variants
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// JSON:API document
    JsonApi(Value),
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body
    pub body: Option<RequestBody>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Merge a set of query parameters
    #[must_use]
    pub fn queries(mut self, params: HashMap<String, String>) -> Self {
        self.query.extend(params);
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Ask for a JSON:API response
    #[must_use]
    pub fn accept_jsonapi(self) -> Self {
        self.header(ACCEPT.as_str(), JSONAPI_MEDIA_TYPE)
    }

    /// Set a JSON:API body
    #[must_use]
    pub fn jsonapi(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::JsonApi(body));
        self
    }

    /// Set a form-encoded body
    #[must_use]
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(fields));
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP client bound to one API endpoint
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// The active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Make a GET request with config
    pub async fn get(&self, path: &str, config: RequestConfig) -> Result<Response> {
        self.request(Method::GET, path, config).await
    }

    /// POST a JSON:API document
    pub async fn post_jsonapi(&self, path: &str, body: Value) -> Result<Response> {
        let config = RequestConfig::new().accept_jsonapi().jsonapi(body);
        self.request(Method::POST, path, config).await
    }

    /// PATCH a JSON:API document
    pub async fn patch_jsonapi(&self, path: &str, body: Value) -> Result<Response> {
        let config = RequestConfig::new().accept_jsonapi().jsonapi(body);
        self.request(Method::PATCH, path, config).await
    }

    /// POST form fields
    pub async fn post_form(&self, path: &str, fields: Vec<(String, String)>) -> Result<Response> {
        self.request(Method::POST, path, RequestConfig::new().form(fields))
            .await
    }

    /// PUT form fields
    pub async fn put_form(&self, path: &str, fields: Vec<(String, String)>) -> Result<Response> {
        self.request(Method::PUT, path, RequestConfig::new().form(fields))
            .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.request(Method::DELETE, path, RequestConfig::default())
            .await
    }

    /// Make a request and read the whole body
    pub async fn request_bytes(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<Bytes> {
        let response = self.request(method, path, config).await?;
        Ok(response.bytes().await?)
    }

    /// Make a generic request
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let full_url = self.build_url(path);
        debug!("{} {}", method, full_url);

        let mut req = self.client.request(method.clone(), &full_url);

        if let Some(ref key) = self.config.api_key {
            req = req.header(API_KEY_HEADER, key.as_str());
        }

        // Per-request headers replace defaults of the same name.
        for (key, value) in &self.config.default_headers {
            let overridden = config.headers.keys().any(|k| k.eq_ignore_ascii_case(key));
            if !overridden {
                req = req.header(key.as_str(), value.as_str());
            }
        }

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        match config.body {
            Some(RequestBody::JsonApi(ref body)) => {
                req = req
                    .header(CONTENT_TYPE, JSONAPI_MEDIA_TYPE)
                    .body(serde_json::to_vec(body)?);
            }
            Some(RequestBody::Form(ref fields)) => {
                req = req.form(fields);
            }
            None => {}
        }

        if let Some(timeout) = config.timeout {
            req = req.timeout(timeout);
        }

        let response = req.send().await?;
        let status = response.status();
        debug!("Response status: {} for {} {}", status.as_u16(), method, full_url);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        Ok(response)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, path: &str, config: RequestConfig) -> Result<Bytes> {
        self.request_bytes(Method::GET, path, config).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
