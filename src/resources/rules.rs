//! WAF rules, their VCL, and a firewall's compiled ruleset

use crate::client::{api_path, Client};
use crate::decode::{JsonApiResource, ResourceObject, ToResource};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use serde::{Deserialize, Serialize};

/// A WAF rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    #[serde(skip_deserializing)]
    pub id: String,
    pub rule_id: String,
    pub severity: u32,
    pub message: String,
}

impl JsonApiResource for Rule {
    const RESOURCE_TYPE: &'static str = "rule";

    fn from_resource(resource: ResourceObject) -> Result<Self> {
        let mut rule: Rule = resource.attributes_as()?;
        rule.id = resource.id_or_default();
        Ok(rule)
    }
}

/// VCL generated for a rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleVcl {
    #[serde(skip_deserializing)]
    pub id: String,
    pub vcl: String,
}

impl JsonApiResource for RuleVcl {
    const RESOURCE_TYPE: &'static str = "rule_vcl";

    fn from_resource(resource: ResourceObject) -> Result<Self> {
        let mut vcl: RuleVcl = resource.attributes_as()?;
        vcl.id = resource.id_or_default();
        Ok(vcl)
    }
}

/// The VCL ruleset compiled for a firewall
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ruleset {
    #[serde(skip_deserializing)]
    pub id: String,
    pub vcl: String,
    pub last_push: String,
}

impl JsonApiResource for Ruleset {
    const RESOURCE_TYPE: &'static str = "ruleset";

    fn from_resource(resource: ResourceObject) -> Result<Self> {
        let mut ruleset: Ruleset = resource.attributes_as()?;
        ruleset.id = resource.id_or_default();
        Ok(ruleset)
    }
}

/// Input to [`Client::get_rule`] and [`Client::get_rule_vcl`]
#[derive(Debug, Clone, Default)]
pub struct GetRuleInput {
    pub rule_id: String,
}

/// Input to [`Client::get_waf_rule_vcl`]
#[derive(Debug, Clone, Default)]
pub struct GetWafRuleVclInput {
    pub waf_id: String,
    pub rule_id: String,
}

/// Input to [`Client::get_waf_ruleset`] and [`Client::update_waf_ruleset`]
#[derive(Debug, Clone, Default)]
pub struct WafRulesetInput {
    pub service_id: String,
    pub waf_id: String,
}

impl ToResource for WafRulesetInput {
    fn to_resource(&self) -> Result<ResourceObject> {
        Ok(ResourceObject::new(Ruleset::RESOURCE_TYPE).with_id(self.waf_id.clone()))
    }
}

impl WafRulesetInput {
    fn validate(&self) -> Result<()> {
        if self.service_id.is_empty() {
            return Err(Error::MissingServiceId);
        }
        if self.waf_id.is_empty() {
            return Err(Error::MissingWafId);
        }
        Ok(())
    }

    fn path(&self) -> String {
        api_path(&["service", &self.service_id, "wafs", &self.waf_id, "ruleset"])
    }
}

impl Client {
    /// List every WAF rule
    pub async fn get_rules(&self) -> Result<Vec<Rule>> {
        self.jsonapi_get_many(&api_path(&["wafs", "rules"]), RequestConfig::new())
            .await
    }

    /// Fetch one rule
    pub async fn get_rule(&self, input: &GetRuleInput) -> Result<Rule> {
        if input.rule_id.is_empty() {
            return Err(Error::MissingRuleId);
        }
        self.jsonapi_get_one(&api_path(&["wafs", "rules", &input.rule_id]))
            .await
    }

    /// Fetch the VCL of a rule
    pub async fn get_rule_vcl(&self, input: &GetRuleInput) -> Result<RuleVcl> {
        if input.rule_id.is_empty() {
            return Err(Error::MissingRuleId);
        }
        self.jsonapi_get_one(&api_path(&["wafs", "rules", &input.rule_id, "vcl"]))
            .await
    }

    /// Fetch the VCL of a rule as configured on a firewall
    pub async fn get_waf_rule_vcl(&self, input: &GetWafRuleVclInput) -> Result<RuleVcl> {
        if input.waf_id.is_empty() {
            return Err(Error::MissingWafId);
        }
        if input.rule_id.is_empty() {
            return Err(Error::MissingRuleId);
        }
        self.jsonapi_get_one(&api_path(&[
            "wafs",
            &input.waf_id,
            "rules",
            &input.rule_id,
            "vcl",
        ]))
        .await
    }

    /// Fetch the compiled ruleset of a firewall
    pub async fn get_waf_ruleset(&self, input: &WafRulesetInput) -> Result<Ruleset> {
        input.validate()?;
        self.jsonapi_get_one(&input.path()).await
    }

    /// Recompile and push the ruleset of a firewall
    pub async fn update_waf_ruleset(&self, input: &WafRulesetInput) -> Result<Ruleset> {
        input.validate()?;
        self.jsonapi_patch(&input.path(), input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serde_json::json;

    fn client() -> Client {
        Client::new(ClientConfig::builder().endpoint("http://127.0.0.1:9").build()).unwrap()
    }

    #[tokio::test]
    async fn test_rule_validation() {
        let client = client();

        let err = client.get_rule(&GetRuleInput::default()).await.unwrap_err();
        assert!(matches!(err, Error::MissingRuleId));

        let err = client
            .get_rule_vcl(&GetRuleInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingRuleId));

        let err = client
            .get_waf_rule_vcl(&GetWafRuleVclInput {
                waf_id: String::new(),
                rule_id: "r".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingWafId));

        let err = client
            .get_waf_rule_vcl(&GetWafRuleVclInput {
                waf_id: "w".to_string(),
                rule_id: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingRuleId));
    }

    #[tokio::test]
    async fn test_ruleset_validation() {
        let client = client();

        let err = client
            .get_waf_ruleset(&WafRulesetInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingServiceId));

        let err = client
            .update_waf_ruleset(&WafRulesetInput {
                service_id: "s".to_string(),
                waf_id: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingWafId));
    }

    #[test]
    fn test_decode_rules() {
        let body = json!({
            "data": [
                {"id": "r1", "type": "rule", "attributes": {"rule_id": "931100", "severity": 2, "message": "RFI"}},
                {"id": "r2", "type": "rule", "attributes": {"rule_id": "941100"}}
            ]
        })
        .to_string();

        let rules: Vec<Rule> = crate::decode::decode_many(body.as_bytes()).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, "r1");
        assert_eq!(rules[0].severity, 2);
        assert_eq!(rules[1].message, "");
    }

    #[test]
    fn test_ruleset_patch_body() {
        let doc = crate::decode::encode_one(&WafRulesetInput {
            service_id: "s".to_string(),
            waf_id: "w".to_string(),
        })
        .unwrap();
        assert_eq!(doc, json!({"data": {"type": "ruleset", "id": "w"}}));
    }
}
