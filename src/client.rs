//! API client
//!
//! [`Client`] owns the HTTP transport and provides the shared request and
//! decode plumbing used by the resource modules, which add their
//! operations through `impl Client` blocks.

use crate::config::ClientConfig;
use crate::decode::{decode_many, decode_one, encode_one, JsonApiResource, ToResource};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig, Transport};
use crate::types::JsonValue;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Client for the Fastly configuration API
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Create a client from an explicit configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.endpoint)?;
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Create a client from `FASTLY_API_KEY` / `FASTLY_API_URL`
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Resolve a server-supplied link against the endpoint
    ///
    /// Links to any other origin are refused, since every request carries
    /// the API key.
    pub(crate) fn resolve_link(&self, link: &str) -> Result<String> {
        let base = Url::parse(&self.http.config().endpoint)?;
        let url = base
            .join(link)
            .map_err(|e| Error::pagination_link(link, e.to_string()))?;

        if url.origin() != base.origin() {
            return Err(Error::pagination_link(
                link,
                format!(
                    "origin differs from endpoint {}",
                    base.origin().ascii_serialization()
                ),
            ));
        }
        Ok(url.into())
    }

    /// The transport handed to paginators
    pub(crate) fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.http.clone())
    }

    // ------------------------------------------------------------------------
    // JSON:API helpers
    // ------------------------------------------------------------------------

    pub(crate) async fn jsonapi_get_one<T: JsonApiResource>(&self, path: &str) -> Result<T> {
        let body = Transport::get(&self.http, path, RequestConfig::new().accept_jsonapi()).await?;
        decode_one(&body)
    }

    pub(crate) async fn jsonapi_get_many<T: JsonApiResource>(
        &self,
        path: &str,
        config: RequestConfig,
    ) -> Result<Vec<T>> {
        let body = Transport::get(&self.http, path, config.accept_jsonapi()).await?;
        let items: Vec<T> = decode_many(&body)?;
        debug!(path, count = items.len(), "Decoded {}", T::RESOURCE_TYPE);
        Ok(items)
    }

    pub(crate) async fn jsonapi_post<T, I>(&self, path: &str, input: &I) -> Result<T>
    where
        T: JsonApiResource,
        I: ToResource,
    {
        let response = self.http.post_jsonapi(path, encode_one(input)?).await?;
        decode_one(&response.bytes().await?)
    }

    pub(crate) async fn jsonapi_patch<T, I>(&self, path: &str, input: &I) -> Result<T>
    where
        T: JsonApiResource,
        I: ToResource,
    {
        let response = self.http.patch_jsonapi(path, encode_one(input)?).await?;
        decode_one(&response.bytes().await?)
    }

    // ------------------------------------------------------------------------
    // Plain JSON helpers
    // ------------------------------------------------------------------------

    pub(crate) async fn json_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = Transport::get(&self.http, path, RequestConfig::new()).await?;
        parse_json(&body)
    }

    pub(crate) async fn json_post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
    ) -> Result<T> {
        let response = self.http.post_form(path, fields).await?;
        parse_json(&response.bytes().await?)
    }

    pub(crate) async fn json_put_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
    ) -> Result<T> {
        let response = self.http.put_form(path, fields).await?;
        parse_json(&response.bytes().await?)
    }

    /// DELETE that expects `{"status": "ok"}` back
    pub(crate) async fn json_delete_expect_ok(&self, path: &str) -> Result<()> {
        let response = self.http.delete(path).await?;
        let body: JsonValue = parse_json(&response.bytes().await?)?;
        match body.get("status").and_then(JsonValue::as_str) {
            Some("ok") => Ok(()),
            other => Err(Error::NotOk {
                status: other.unwrap_or_default().to_string(),
            }),
        }
    }

    /// DELETE whose body, if any, is ignored
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.http.delete(path).await?;
        Ok(())
    }
}

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::Decode {
        message: format!("Failed to parse JSON: {e}"),
    })
}

/// Join path segments, percent-encoding each one
pub(crate) fn api_path(segments: &[&str]) -> String {
    let mut url = match Url::parse("http://localhost/") {
        Ok(url) => url,
        Err(_) => return format!("/{}", segments.join("/")),
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url.path().to_string()
}
