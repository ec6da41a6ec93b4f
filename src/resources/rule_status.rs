//! Rule statuses of a firewall
//!
//! Unlike the service authorization listing, this endpoint is walked by
//! following `links.next` until the server stops sending one. Links must
//! stay on the configured endpoint.

use crate::client::{api_path, Client};
use crate::decode::{decode_links, decode_many, JsonApiResource, Links, ResourceObject};
use crate::error::{Error, Result};
use crate::http::{RequestConfig, Transport};
use crate::pagination::{PAGE_NUMBER_PARAM, PAGE_SIZE_PARAM};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Flattened status of one rule on one firewall
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WafRuleStatus {
    /// Numeric id of the related `rule`
    pub rule_id: u64,
    /// Id of the related `waf`
    pub waf_id: String,
    /// Id of the status object itself
    pub status_id: String,
    /// `log`, `block` or `disabled`
    pub status: String,
}

#[derive(Deserialize)]
struct Attributes {
    #[serde(default)]
    status: Option<String>,
}

impl JsonApiResource for WafRuleStatus {
    const RESOURCE_TYPE: &'static str = "rule_status";

    fn from_resource(resource: ResourceObject) -> Result<Self> {
        let attrs: Attributes = resource.attributes_as()?;
        let rule_id = match resource.related_id("rule") {
            Some(id) => id.parse::<u64>().map_err(|_| {
                Error::decode(format!("rule_status has non-numeric rule id '{id}'"))
            })?,
            None => 0,
        };

        Ok(Self {
            rule_id,
            waf_id: resource.related_id("waf").unwrap_or_default().to_string(),
            status_id: resource.id_or_default(),
            status: attrs.status.unwrap_or_default(),
        })
    }
}

/// Filters for [`Client::get_waf_rule_statuses`]
///
/// Zero numbers and empty strings are not sent.
#[derive(Debug, Clone, Default)]
pub struct WafRuleStatusFilters {
    pub status: String,
    pub accuracy: u32,
    pub maturity: u32,
    pub message: String,
    pub revision: u32,
    pub rule_id: String,
    /// Single tag id
    pub tag_id: u32,
    /// Single tag name
    pub tag_name: String,
    pub version: String,
    /// Rules carrying any of these tag ids
    pub tags: Vec<u32>,
    /// Page size of the first request
    pub max_results: u32,
    /// First page to request, starting at 1
    pub page: u32,
}

impl WafRuleStatusFilters {
    /// Render the filters as query parameters
    pub fn to_query(&self) -> StringMap {
        let mut query = StringMap::new();

        let strings = [
            ("filter[status]", &self.status),
            ("filter[rule][message]", &self.message),
            ("filter[rule][rule_id]", &self.rule_id),
            ("filter[rule][tags][name]", &self.tag_name),
            ("filter[rule][version]", &self.version),
        ];
        for (key, value) in strings {
            if !value.is_empty() {
                query.insert(key.to_string(), value.clone());
            }
        }

        let numbers = [
            ("filter[rule][accuracy]", self.accuracy),
            ("filter[rule][maturity]", self.maturity),
            ("filter[rule][revision]", self.revision),
            ("filter[rule][tags]", self.tag_id),
            (PAGE_SIZE_PARAM, self.max_results),
            (PAGE_NUMBER_PARAM, self.page),
        ];
        for (key, value) in numbers {
            if value != 0 {
                query.insert(key.to_string(), value.to_string());
            }
        }

        if !self.tags.is_empty() {
            let joined = self
                .tags
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");
            query.insert("include".to_string(), joined);
        }

        query
    }
}

/// Input to [`Client::get_waf_rule_statuses`]
#[derive(Debug, Clone, Default)]
pub struct GetWafRuleStatusesInput {
    pub service_id: String,
    pub waf_id: String,
    pub filters: WafRuleStatusFilters,
}

/// Every rule status reachable from the first page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WafRuleStatusesResponse {
    pub rules: Vec<WafRuleStatus>,
    /// Links of the last page fetched
    pub links: Links,
}

impl Client {
    /// Fetch rule statuses of a firewall, following `next` links
    ///
    /// Filters go on the first request only; follow-up requests use the
    /// `next` link as sent by the server, which must stay on the configured
    /// endpoint. Any failing page fails the call.
    pub async fn get_waf_rule_statuses(
        &self,
        input: &GetWafRuleStatusesInput,
    ) -> Result<WafRuleStatusesResponse> {
        if input.service_id.is_empty() {
            return Err(Error::MissingServiceId);
        }
        if input.waf_id.is_empty() {
            return Err(Error::MissingWafId);
        }

        let mut response = WafRuleStatusesResponse::default();
        let mut seen = HashSet::new();
        let mut path = api_path(&[
            "service",
            &input.service_id,
            "wafs",
            &input.waf_id,
            "rule_statuses",
        ]);
        let mut config = RequestConfig::new()
            .queries(input.filters.to_query())
            .accept_jsonapi();

        loop {
            let body = Transport::get(self.http(), &path, config).await?;
            let links = decode_links(&body)?;
            let page: Vec<WafRuleStatus> = decode_many(&body)?;
            debug!(path = %path, count = page.len(), "Fetched rule statuses");
            response.rules.extend(page);

            let next = links.next.clone();
            response.links = links;

            match next {
                Some(next) if seen.insert(next.clone()) => {
                    path = self.resolve_link(&next)?;
                    config = RequestConfig::new().accept_jsonapi();
                }
                Some(next) => {
                    warn!(link = %next, "Stopping at repeated next link");
                    break;
                }
                None => break,
            }
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_filters_send_nothing() {
        assert!(WafRuleStatusFilters::default().to_query().is_empty());
    }

    #[test]
    fn test_filters_to_query() {
        let filters = WafRuleStatusFilters {
            status: "log".to_string(),
            accuracy: 5,
            tag_name: "language-php".to_string(),
            tags: vec![1, 22, 333],
            max_results: 50,
            page: 2,
            ..Default::default()
        };

        let query = filters.to_query();
        let mut expected = StringMap::new();
        expected.insert("filter[status]".to_string(), "log".to_string());
        expected.insert("filter[rule][accuracy]".to_string(), "5".to_string());
        expected.insert("filter[rule][tags][name]".to_string(), "language-php".to_string());
        expected.insert("include".to_string(), "1,22,333".to_string());
        expected.insert("page[size]".to_string(), "50".to_string());
        expected.insert("page[number]".to_string(), "2".to_string());
        assert_eq!(query, expected);
    }

    #[test]
    fn test_decode_rule_status() {
        let body = json!({
            "data": [{
                "id": "status-1",
                "type": "rule_status",
                "attributes": {"status": "block"},
                "relationships": {
                    "rule": {"data": {"id": 931100, "type": "rule"}},
                    "waf": {"data": {"id": "waf-1", "type": "waf"}}
                }
            }]
        })
        .to_string();

        let statuses: Vec<WafRuleStatus> = decode_many(body.as_bytes()).unwrap();
        assert_eq!(
            statuses,
            vec![WafRuleStatus {
                rule_id: 931100,
                waf_id: "waf-1".to_string(),
                status_id: "status-1".to_string(),
                status: "block".to_string(),
            }]
        );
    }

    #[test]
    fn test_non_numeric_rule_id_is_decode_error() {
        let body = json!({
            "data": [{
                "id": "status-1",
                "type": "rule_status",
                "relationships": {"rule": {"data": {"id": "abc", "type": "rule"}}}
            }]
        })
        .to_string();

        let err = decode_many::<WafRuleStatus>(body.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn test_validation() {
        let client =
            Client::new(ClientConfig::builder().endpoint("http://127.0.0.1:9").build()).unwrap();

        let err = client
            .get_waf_rule_statuses(&GetWafRuleStatusesInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingServiceId));

        let err = client
            .get_waf_rule_statuses(&GetWafRuleStatusesInput {
                service_id: "s".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingWafId));
    }
}
