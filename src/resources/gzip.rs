//! Gzip rules of a service version
//!
//! These endpoints predate JSON:API: responses are plain JSON and writes
//! are form-encoded.

use crate::client::{api_path, Client};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A gzip rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gzip {
    #[serde(default)]
    pub service_id: String,
    #[serde(default, deserialize_with = "version_number")]
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content_types: String,
    #[serde(default)]
    pub extensions: String,
    #[serde(default)]
    pub cache_condition: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Writable gzip fields; `None` fields are not sent
#[derive(Debug, Clone, Default)]
pub struct GzipSettings {
    pub content_types: Option<String>,
    pub extensions: Option<String>,
    pub cache_condition: Option<String>,
}

impl GzipSettings {
    fn push_fields(&self, fields: &mut Vec<(String, String)>) {
        let optional = [
            ("content_types", &self.content_types),
            ("extensions", &self.extensions),
            ("cache_condition", &self.cache_condition),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                fields.push((key.to_string(), value.clone()));
            }
        }
    }
}

/// Input to [`Client::list_gzips`]
#[derive(Debug, Clone, Default)]
pub struct ListGzipsInput {
    pub service_id: String,
    pub service_version: u32,
}

/// Input to [`Client::create_gzip`]
#[derive(Debug, Clone, Default)]
pub struct CreateGzipInput {
    pub service_id: String,
    pub service_version: u32,
    pub name: String,
    pub settings: GzipSettings,
}

/// Input to [`Client::get_gzip`] and [`Client::delete_gzip`]
#[derive(Debug, Clone, Default)]
pub struct GzipInput {
    pub service_id: String,
    pub service_version: u32,
    /// Name of the existing rule
    pub name: String,
}

/// Input to [`Client::update_gzip`]
#[derive(Debug, Clone, Default)]
pub struct UpdateGzipInput {
    pub service_id: String,
    pub service_version: u32,
    /// Name of the existing rule
    pub name: String,
    /// Rename the rule
    pub new_name: Option<String>,
    pub settings: GzipSettings,
}

fn validate_version(service_id: &str, service_version: u32) -> Result<()> {
    if service_id.is_empty() {
        return Err(Error::MissingServiceId);
    }
    if service_version == 0 {
        return Err(Error::MissingServiceVersion);
    }
    Ok(())
}

fn validate_named(service_id: &str, service_version: u32, name: &str) -> Result<()> {
    validate_version(service_id, service_version)?;
    if name.is_empty() {
        return Err(Error::MissingName);
    }
    Ok(())
}

fn collection_path(service_id: &str, service_version: u32) -> String {
    api_path(&[
        "service",
        service_id,
        "version",
        &service_version.to_string(),
        "gzip",
    ])
}

fn item_path(service_id: &str, service_version: u32, name: &str) -> String {
    api_path(&[
        "service",
        service_id,
        "version",
        &service_version.to_string(),
        "gzip",
        name,
    ])
}

impl Client {
    /// List the gzip rules of a service version
    pub async fn list_gzips(&self, input: &ListGzipsInput) -> Result<Vec<Gzip>> {
        validate_version(&input.service_id, input.service_version)?;
        self.json_get(&collection_path(&input.service_id, input.service_version))
            .await
    }

    /// Create a gzip rule
    pub async fn create_gzip(&self, input: &CreateGzipInput) -> Result<Gzip> {
        validate_version(&input.service_id, input.service_version)?;

        let mut fields = Vec::new();
        if !input.name.is_empty() {
            fields.push(("name".to_string(), input.name.clone()));
        }
        input.settings.push_fields(&mut fields);

        self.json_post_form(
            &collection_path(&input.service_id, input.service_version),
            fields,
        )
        .await
    }

    /// Fetch one gzip rule by name
    pub async fn get_gzip(&self, input: &GzipInput) -> Result<Gzip> {
        validate_named(&input.service_id, input.service_version, &input.name)?;
        self.json_get(&item_path(
            &input.service_id,
            input.service_version,
            &input.name,
        ))
        .await
    }

    /// Update or rename a gzip rule
    pub async fn update_gzip(&self, input: &UpdateGzipInput) -> Result<Gzip> {
        validate_named(&input.service_id, input.service_version, &input.name)?;

        let mut fields = Vec::new();
        if let Some(new_name) = &input.new_name {
            fields.push(("name".to_string(), new_name.clone()));
        }
        input.settings.push_fields(&mut fields);

        self.json_put_form(
            &item_path(&input.service_id, input.service_version, &input.name),
            fields,
        )
        .await
    }

    /// Delete a gzip rule
    pub async fn delete_gzip(&self, input: &GzipInput) -> Result<()> {
        validate_named(&input.service_id, input.service_version, &input.name)?;
        self.json_delete_expect_ok(&item_path(
            &input.service_id,
            input.service_version,
            &input.name,
        ))
        .await
    }
}

/// Accept `"version": 3` as well as `"version": "3"`
fn version_number<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| de::Error::custom(format!("invalid version {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid version '{s}'"))),
        other => Err(de::Error::custom(format!("invalid version {other}"))),
    }
}
