//! JSON:API document types
//!
//! Only the parts of the format the Fastly API actually uses are modelled:
//! primary data (one or many resource objects), relationship linkage, and
//! top-level pagination links.

use crate::error::{Error, Result};
use crate::types::JsonObject;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level JSON:API document
#[derive(Debug, Clone, Deserialize)]
pub struct Document<D> {
    /// Primary data
    pub data: D,
    /// Top-level links
    #[serde(default)]
    pub links: Option<Links>,
    /// Compound document members
    #[serde(default)]
    pub included: Vec<ResourceObject>,
}

/// Pagination links
///
/// Every member is optional. Members that are not strings (or `{"href"}`
/// objects) are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, deserialize_with = "lenient_link", skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, deserialize_with = "lenient_link", skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    #[serde(default, deserialize_with = "lenient_link", skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, deserialize_with = "lenient_link", skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// Envelope used to read only the `links` member of a response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LinksEnvelope {
    #[serde(default)]
    pub links: Option<Links>,
}

/// Identifies a single resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

impl ResourceIdentifier {
    /// Create an identifier
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// Resource linkage of a relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    /// To-one relationship
    One(ResourceIdentifier),
    /// To-many relationship
    Many(Vec<ResourceIdentifier>),
}

/// A relationship member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Linkage>,
}

/// A JSON:API resource object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(
        default,
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "JsonObject::is_empty")]
    pub attributes: JsonObject,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
}

impl ResourceObject {
    /// Create an empty resource of the given type
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            attributes: JsonObject::new(),
            relationships: BTreeMap::new(),
        }
    }

    /// Set the id; empty ids are left out
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.id = if id.is_empty() { None } else { Some(id) };
        self
    }

    /// Serialize `attrs` into the attribute map
    ///
    /// `attrs` must serialize to a JSON object.
    pub fn with_attributes<A: Serialize>(mut self, attrs: &A) -> Result<Self> {
        match serde_json::to_value(attrs)? {
            Value::Object(map) => {
                self.attributes = map;
                Ok(self)
            }
            other => Err(Error::decode(format!(
                "attributes must serialize to an object, got {other}"
            ))),
        }
    }

    /// Add a to-one relationship
    #[must_use]
    pub fn with_relationship(
        mut self,
        name: impl Into<String>,
        kind: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        self.relationships.insert(
            name.into(),
            Relationship {
                data: Some(Linkage::One(ResourceIdentifier::new(kind, id))),
            },
        );
        self
    }

    /// Fail unless this resource has the expected type
    pub fn expect_type(&self, expected: &str) -> Result<()> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(Error::unexpected_type(expected, self.kind.clone()))
        }
    }

    /// The id, or an empty string when absent
    pub fn id_or_default(&self) -> String {
        self.id.clone().unwrap_or_default()
    }

    /// Deserialize the attribute map into `A`
    pub fn attributes_as<A: DeserializeOwned>(&self) -> Result<A> {
        serde_json::from_value(Value::Object(self.attributes.clone())).map_err(|e| {
            Error::decode(format!("invalid attributes for '{}': {e}", self.kind))
        })
    }

    /// The id of a to-one relationship, if linked
    pub fn related_id(&self, name: &str) -> Option<&str> {
        match self.relationships.get(name)?.data.as_ref()? {
            Linkage::One(ident) => Some(ident.id.as_str()),
            Linkage::Many(_) => None,
        }
    }

    /// The ids of a to-many relationship; empty when unlinked
    pub fn related_ids(&self, name: &str) -> Vec<&str> {
        match self.relationships.get(name).and_then(|r| r.data.as_ref()) {
            Some(Linkage::Many(idents)) => idents.iter().map(|i| i.id.as_str()).collect(),
            Some(Linkage::One(ident)) => vec![ident.id.as_str()],
            None => Vec::new(),
        }
    }
}

/// A type that can be built from a JSON:API resource object
pub trait JsonApiResource: Sized {
    /// The JSON:API `type` member this model maps to
    const RESOURCE_TYPE: &'static str;

    /// Build the model from a resource whose type has already been checked
    fn from_resource(resource: ResourceObject) -> Result<Self>;
}

/// A request input that serializes to a JSON:API resource object
pub trait ToResource {
    /// Convert into the resource object sent as primary data
    fn to_resource(&self) -> Result<ResourceObject>;
}

// ============================================================================
// Serde helpers
// ============================================================================

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

fn optional_string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

fn lenient_link<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Object(map) => map
            .get("href")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    })
}
