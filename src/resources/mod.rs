//! API resources
//!
//! Each submodule defines the models and inputs for one family of
//! endpoints and adds its operations to [`Client`](crate::Client).
//! Inputs are validated locally, in field order, before any request is
//! made.

pub mod gzip;
pub mod owasp;
pub mod rule_status;
pub mod rules;
pub mod service_authorization;
pub mod waf;

pub use gzip::{CreateGzipInput, Gzip, GzipInput, GzipSettings, ListGzipsInput, UpdateGzipInput};
pub use owasp::{Owasp, OwaspInput, OwaspSettings, UpdateOwaspInput};
pub use rule_status::{
    GetWafRuleStatusesInput, WafRuleStatus, WafRuleStatusFilters, WafRuleStatusesResponse,
};
pub use rules::{GetRuleInput, GetWafRuleVclInput, Rule, RuleVcl, Ruleset, WafRulesetInput};
pub use service_authorization::{
    CreateServiceAuthorizationInput, DeleteServiceAuthorizationInput,
    GetServiceAuthorizationInput, ListServiceAuthorizationsInput, ServiceAuthorization,
    UpdateServiceAuthorizationInput,
};
pub use waf::{CreateWafInput, ListWafsInput, UpdateWafInput, Waf, WafInput, WafSettings};
