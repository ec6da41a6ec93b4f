//! Web application firewall objects attached to a service version

use crate::client::{api_path, Client};
use crate::decode::{JsonApiResource, ResourceObject, ToResource};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use serde::{Deserialize, Serialize};

/// A firewall object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Waf {
    pub id: String,
    pub version: u32,
    pub prefetch_condition: String,
    pub response: String,
    pub last_push: String,
    /// Id of the related `configuration_set`
    pub configuration_set_id: Option<String>,
}

#[derive(Deserialize)]
struct Attributes {
    #[serde(default)]
    version: Option<u32>,
    #[serde(default)]
    prefetch_condition: Option<String>,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    last_push: Option<String>,
}

impl JsonApiResource for Waf {
    const RESOURCE_TYPE: &'static str = "waf";

    fn from_resource(resource: ResourceObject) -> Result<Self> {
        let attrs: Attributes = resource.attributes_as()?;
        Ok(Self {
            id: resource.id_or_default(),
            version: attrs.version.unwrap_or_default(),
            prefetch_condition: attrs.prefetch_condition.unwrap_or_default(),
            response: attrs.response.unwrap_or_default(),
            last_push: attrs.last_push.unwrap_or_default(),
            configuration_set_id: resource.related_id("configuration_set").map(str::to_string),
        })
    }
}

/// Writable WAF attributes; empty values are left out of the request
#[derive(Debug, Clone, Default, Serialize)]
pub struct WafSettings {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefetch_condition: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub response: String,
}

/// Input to [`Client::list_wafs`]
#[derive(Debug, Clone, Default)]
pub struct ListWafsInput {
    pub service_id: String,
    pub service_version: u32,
}

/// Input to [`Client::create_waf`]
#[derive(Debug, Clone, Default)]
pub struct CreateWafInput {
    pub service_id: String,
    pub service_version: u32,
    /// Optional client-chosen id
    pub id: String,
    pub settings: WafSettings,
}

impl ToResource for CreateWafInput {
    fn to_resource(&self) -> Result<ResourceObject> {
        ResourceObject::new(Waf::RESOURCE_TYPE)
            .with_id(self.id.clone())
            .with_attributes(&self.settings)
    }
}

/// Input to [`Client::get_waf`] and [`Client::delete_waf`]
#[derive(Debug, Clone, Default)]
pub struct WafInput {
    pub service_id: String,
    pub service_version: u32,
    pub id: String,
}

/// Input to [`Client::update_waf`]
#[derive(Debug, Clone, Default)]
pub struct UpdateWafInput {
    pub service_id: String,
    pub service_version: u32,
    pub id: String,
    pub settings: WafSettings,
}

impl ToResource for UpdateWafInput {
    fn to_resource(&self) -> Result<ResourceObject> {
        ResourceObject::new(Waf::RESOURCE_TYPE)
            .with_id(self.id.clone())
            .with_attributes(&self.settings)
    }
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

fn validate_waf(service_id: &str, service_version: u32, id: &str) -> Result<()> {
    validate_version(service_id, service_version)?;
    if id.is_empty() {
        return Err(Error::MissingWafId);
    }
    Ok(())
}

fn collection_path(service_id: &str, service_version: u32) -> String {
    api_path(&[
        "service",
        service_id,
        "version",
        &service_version.to_string(),
        "wafs",
    ])
}

fn item_path(service_id: &str, service_version: u32, id: &str) -> String {
    api_path(&[
        "service",
        service_id,
        "version",
        &service_version.to_string(),
        "wafs",
        id,
    ])
}

impl Client {
    /// List the firewalls of a service version
    pub async fn list_wafs(&self, input: &ListWafsInput) -> Result<Vec<Waf>> {
        validate_version(&input.service_id, input.service_version)?;

        self.jsonapi_get_many(
            &collection_path(&input.service_id, input.service_version),
            RequestConfig::new(),
        )
        .await
    }

    /// Create a firewall on a service version
    pub async fn create_waf(&self, input: &CreateWafInput) -> Result<Waf> {
        validate_version(&input.service_id, input.service_version)?;

        self.jsonapi_post(
            &collection_path(&input.service_id, input.service_version),
            input,
        )
        .await
    }

    /// Fetch one firewall
    pub async fn get_waf(&self, input: &WafInput) -> Result<Waf> {
        validate_waf(&input.service_id, input.service_version, &input.id)?;

        self.jsonapi_get_one(&item_path(
            &input.service_id,
            input.service_version,
            &input.id,
        ))
        .await
    }

    /// Update a firewall's settings
    pub async fn update_waf(&self, input: &UpdateWafInput) -> Result<Waf> {
        validate_waf(&input.service_id, input.service_version, &input.id)?;

        self.jsonapi_patch(
            &item_path(&input.service_id, input.service_version, &input.id),
            input,
        )
        .await
    }

    /// Delete a firewall
    pub async fn delete_waf(&self, input: &WafInput) -> Result<()> {
        validate_waf(&input.service_id, input.service_version, &input.id)?;

        self.delete(&item_path(
            &input.service_id,
            input.service_version,
            &input.id,
        ))
        .await
    }
}
