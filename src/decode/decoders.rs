//! JSON:API decoding and encoding
//!
//! All decoders take the complete response body. Callers that need both
//! the links and the primary data read the body once and pass the same
//! buffer to each decoder.

use super::types::{
    Document, JsonApiResource, Links, LinksEnvelope, ResourceObject, ToResource,
};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::Decode {
        message: format!("Failed to parse JSON:API payload: {e}"),
    })
}

fn convert<T: JsonApiResource>(resource: ResourceObject) -> Result<T> {
    resource.expect_type(T::RESOURCE_TYPE)?;
    T::from_resource(resource)
}

/// Decode a single-resource payload (`{"data": {...}}`)
pub fn decode_one<T: JsonApiResource>(body: &[u8]) -> Result<T> {
    let doc: Document<Option<ResourceObject>> = parse(body)?;
    let resource = doc
        .data
        .ok_or_else(|| Error::decode("payload has no primary data"))?;
    convert(resource)
}

/// Decode a many-resource payload (`{"data": [...]}`)
///
/// `null` or absent data decodes as an empty list.
pub fn decode_many<T: JsonApiResource>(body: &[u8]) -> Result<Vec<T>> {
    let doc: Document<Option<Vec<ResourceObject>>> = parse(body)?;
    doc.data.unwrap_or_default().into_iter().map(convert).collect()
}

/// Read only the top-level `links` member
///
/// Absent `links`, or absent members inside it, decode as `None`.
pub fn decode_links(body: &[u8]) -> Result<Links> {
    let envelope: LinksEnvelope = parse(body)?;
    Ok(envelope.links.unwrap_or_default())
}

/// Wrap an input as `{"data": {...}}`
pub fn encode_one<T: ToResource>(input: &T) -> Result<Value> {
    let resource = input.to_resource()?;
    Ok(serde_json::json!({ "data": resource }))
}
