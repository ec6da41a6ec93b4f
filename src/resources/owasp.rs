//! OWASP rule-set tuning for a firewall

use crate::client::{api_path, Client};
use crate::decode::{JsonApiResource, ResourceObject, ToResource};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// OWASP settings of a firewall
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owasp {
    #[serde(skip_deserializing)]
    pub id: String,
    pub allowed_http_versions: String,
    pub allowed_methods: String,
    pub allowed_request_content_type: String,
    pub arg_length: u32,
    pub arg_name_length: u32,
    pub combined_file_sizes: u32,
    pub created_at: String,
    pub critical_anomaly_score: u32,
    pub crs_validate_utf8_encoding: bool,
    pub error_anomaly_score: u32,
    pub high_risk_country_codes: String,
    pub http_violation_score_threshold: u32,
    pub inbound_anomaly_score_threshold: u32,
    pub lfi_score_threshold: u32,
    pub max_file_size: u32,
    pub max_num_args: u32,
    pub notice_anomaly_score: u32,
    pub paranoia_level: u32,
    pub php_injection_score_threshold: u32,
    pub rce_score_threshold: u32,
    pub restricted_extensions: String,
    pub restricted_headers: String,
    pub rfi_score_threshold: u32,
    pub session_fixation_score_threshold: u32,
    pub sql_injection_score_threshold: u32,
    pub total_arg_length: u32,
    pub updated_at: String,
    pub warning_anomaly_score: u32,
    pub xss_score_threshold: u32,
}

impl JsonApiResource for Owasp {
    const RESOURCE_TYPE: &'static str = "owasp";

    fn from_resource(resource: ResourceObject) -> Result<Self> {
        let mut owasp: Owasp = resource.attributes_as()?;
        owasp.id = resource.id_or_default();
        Ok(owasp)
    }
}

/// Settings sent by [`Client::update_owasp`]; unset fields are left alone
#[derive(Debug, Clone, Default, Serialize)]
pub struct OwaspSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_http_versions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_methods: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_request_content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg_name_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_file_sizes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_anomaly_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs_validate_utf8_encoding: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_anomaly_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_risk_country_codes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_violation_score_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_anomaly_score_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lfi_score_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_num_args: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_anomaly_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paranoia_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub php_injection_score_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rce_score_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricted_extensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricted_headers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfi_score_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_fixation_score_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_injection_score_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_arg_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_anomaly_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xss_score_threshold: Option<u32>,
}

/// Input to [`Client::get_owasp`] and [`Client::create_owasp`]
#[derive(Debug, Clone, Default)]
pub struct OwaspInput {
    pub service_id: String,
    pub waf_id: String,
}

impl ToResource for OwaspInput {
    fn to_resource(&self) -> Result<ResourceObject> {
        Ok(ResourceObject::new(Owasp::RESOURCE_TYPE).with_id(self.waf_id.clone()))
    }
}

/// Input to [`Client::update_owasp`]
#[derive(Debug, Clone, Default)]
pub struct UpdateOwaspInput {
    pub service_id: String,
    pub waf_id: String,
    pub owasp_id: String,
    pub settings: OwaspSettings,
}

impl ToResource for UpdateOwaspInput {
    fn to_resource(&self) -> Result<ResourceObject> {
        ResourceObject::new(Owasp::RESOURCE_TYPE)
            .with_id(self.owasp_id.clone())
            .with_attributes(&self.settings)
    }
}

fn validate(service_id: &str, waf_id: &str) -> Result<()> {
    if service_id.is_empty() {
        return Err(Error::MissingServiceId);
    }
    if waf_id.is_empty() {
        return Err(Error::MissingWafId);
    }
    Ok(())
}

fn owasp_path(service_id: &str, waf_id: &str) -> String {
    api_path(&["service", service_id, "wafs", waf_id, "owasp"])
}

impl Client {
    /// Fetch the OWASP settings of a firewall
    pub async fn get_owasp(&self, input: &OwaspInput) -> Result<Owasp> {
        validate(&input.service_id, &input.waf_id)?;
        self.jsonapi_get_one(&owasp_path(&input.service_id, &input.waf_id))
            .await
    }

    /// Create the OWASP settings object of a firewall
    pub async fn create_owasp(&self, input: &OwaspInput) -> Result<Owasp> {
        validate(&input.service_id, &input.waf_id)?;
        self.jsonapi_post(&owasp_path(&input.service_id, &input.waf_id), input)
            .await
    }

    /// Change selected OWASP settings of a firewall
    pub async fn update_owasp(&self, input: &UpdateOwaspInput) -> Result<Owasp> {
        validate(&input.service_id, &input.waf_id)?;
        if input.owasp_id.is_empty() {
            return Err(Error::MissingOwaspId);
        }

        self.jsonapi_patch(&owasp_path(&input.service_id, &input.waf_id), input)
            .await
    }
}
