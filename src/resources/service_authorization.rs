//! Service authorizations
//!
//! Grants a user a permission level on a single service.

use crate::client::{api_path, Client};
use crate::decode::{JsonApiResource, ResourceObject, ToResource};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::pagination::{PageOptions, Paginator, PAGE_NUMBER_PARAM, PAGE_SIZE_PARAM};
use crate::types::Permission;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const COLLECTION: &str = "service-authorizations";

/// A user's permission on a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceAuthorization {
    pub id: String,
    pub permission: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    /// Id of the related `user`
    pub user_id: Option<String>,
    /// Id of the related `service`
    pub service_id: Option<String>,
}

#[derive(Deserialize)]
struct Attributes {
    #[serde(default)]
    permission: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    deleted_at: Option<DateTime<Utc>>,
}

impl JsonApiResource for ServiceAuthorization {
    const RESOURCE_TYPE: &'static str = "service_authorization";

    fn from_resource(resource: ResourceObject) -> Result<Self> {
        let attrs: Attributes = resource.attributes_as()?;
        Ok(Self {
            id: resource.id_or_default(),
            permission: attrs.permission.unwrap_or_default(),
            created_at: attrs.created_at,
            updated_at: attrs.updated_at,
            deleted_at: attrs.deleted_at,
            user_id: resource.related_id("user").map(str::to_string),
            service_id: resource.related_id("service").map(str::to_string),
        })
    }
}

#[derive(Serialize)]
struct PermissionAttr {
    #[serde(skip_serializing_if = "Option::is_none")]
    permission: Option<Permission>,
}

/// Input to [`Client::get_service_authorization`]
#[derive(Debug, Clone, Default)]
pub struct GetServiceAuthorizationInput {
    pub id: String,
}

/// Input to [`Client::create_service_authorization`]
#[derive(Debug, Clone, Default)]
pub struct CreateServiceAuthorizationInput {
    /// Service to grant access to (required)
    pub service_id: String,
    /// User receiving the grant (required)
    pub user_id: String,
    pub permission: Option<Permission>,
}

impl ToResource for CreateServiceAuthorizationInput {
    fn to_resource(&self) -> Result<ResourceObject> {
        Ok(ResourceObject::new(ServiceAuthorization::RESOURCE_TYPE)
            .with_attributes(&PermissionAttr {
                permission: self.permission,
            })?
            .with_relationship("service", "service", self.service_id.clone())
            .with_relationship("user", "user", self.user_id.clone()))
    }
}

/// Input to [`Client::update_service_authorization`]
#[derive(Debug, Clone, Default)]
pub struct UpdateServiceAuthorizationInput {
    pub id: String,
    pub permission: Option<Permission>,
}

impl ToResource for UpdateServiceAuthorizationInput {
    fn to_resource(&self) -> Result<ResourceObject> {
        ResourceObject::new(ServiceAuthorization::RESOURCE_TYPE)
            .with_id(self.id.clone())
            .with_attributes(&PermissionAttr {
                permission: self.permission,
            })
    }
}

/// Input to [`Client::delete_service_authorization`]
#[derive(Debug, Clone, Default)]
pub struct DeleteServiceAuthorizationInput {
    pub id: String,
}

/// Input to the service authorization list operations
#[derive(Debug, Clone, Copy, Default)]
pub struct ListServiceAuthorizationsInput {
    /// Page size; 0 selects the default
    pub per_page: u32,
    /// Starting page; 0 starts from the first
    pub page: u32,
}

impl From<ListServiceAuthorizationsInput> for PageOptions {
    fn from(input: ListServiceAuthorizationsInput) -> Self {
        PageOptions::new()
            .with_per_page(input.per_page)
            .with_page(input.page)
    }
}

impl Client {
    /// Fetch one service authorization
    pub async fn get_service_authorization(
        &self,
        input: &GetServiceAuthorizationInput,
    ) -> Result<ServiceAuthorization> {
        if input.id.is_empty() {
            return Err(Error::MissingId);
        }

        self.jsonapi_get_one(&api_path(&[COLLECTION, &input.id]))
            .await
    }

    /// Grant a user a permission on a service
    pub async fn create_service_authorization(
        &self,
        input: &CreateServiceAuthorizationInput,
    ) -> Result<ServiceAuthorization> {
        if input.service_id.is_empty() {
            return Err(Error::MissingAuthorizationService);
        }
        if input.user_id.is_empty() {
            return Err(Error::MissingAuthorizationUser);
        }

        self.jsonapi_post(&api_path(&[COLLECTION]), input).await
    }

    /// Change the permission of an existing grant
    pub async fn update_service_authorization(
        &self,
        input: &UpdateServiceAuthorizationInput,
    ) -> Result<ServiceAuthorization> {
        if input.id.is_empty() {
            return Err(Error::MissingId);
        }
        if input.permission.is_none() {
            return Err(Error::MissingPermissions);
        }

        self.jsonapi_patch(&api_path(&[COLLECTION, &input.id]), input)
            .await
    }

    /// Revoke a grant
    pub async fn delete_service_authorization(
        &self,
        input: &DeleteServiceAuthorizationInput,
    ) -> Result<()> {
        if input.id.is_empty() {
            return Err(Error::MissingId);
        }

        self.delete(&api_path(&[COLLECTION, &input.id])).await
    }

    /// Fetch a single page of service authorizations
    ///
    /// Page parameters are only sent when set.
    pub async fn list_service_authorizations(
        &self,
        input: &ListServiceAuthorizationsInput,
    ) -> Result<Vec<ServiceAuthorization>> {
        let mut config = RequestConfig::new();
        if input.per_page > 0 {
            config = config.query(
                PAGE_SIZE_PARAM,
                PageOptions::from(*input).effective_per_page().to_string(),
            );
        }
        if input.page > 0 {
            config = config.query(PAGE_NUMBER_PARAM, input.page.to_string());
        }

        self.jsonapi_get_many(&api_path(&[COLLECTION]), config)
            .await
    }

    /// Paginator over every service authorization visible to the token
    pub fn new_list_service_authorizations_paginator(
        &self,
        input: &ListServiceAuthorizationsInput,
    ) -> Paginator<ServiceAuthorization> {
        Paginator::new(self.transport(), api_path(&[COLLECTION]), (*input).into())
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
    async fn test_get_validation() {
        let err = client()
            .get_service_authorization(&GetServiceAuthorizationInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingId));
    }

    #[tokio::test]
    async fn test_create_validation_order() {
        let err = client()
            .create_service_authorization(&CreateServiceAuthorizationInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingAuthorizationService));

        let err = client()
            .create_service_authorization(&CreateServiceAuthorizationInput {
                service_id: "my-service-id".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingAuthorizationUser));
    }

    #[tokio::test]
    async fn test_update_validation_order() {
        let err = client()
            .update_service_authorization(&UpdateServiceAuthorizationInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingId));

        let err = client()
            .update_service_authorization(&UpdateServiceAuthorizationInput {
                id: "my-service-authorization-id".to_string(),
                permission: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingPermissions));
    }

    #[tokio::test]
    async fn test_delete_validation() {
        let err = client()
            .delete_service_authorization(&DeleteServiceAuthorizationInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingId));
    }

    #[test]
    fn test_create_input_encoding() {
        let doc = crate::decode::encode_one(&CreateServiceAuthorizationInput {
            service_id: "svc".to_string(),
            user_id: "usr".to_string(),
            permission: Some(Permission::Full),
        })
        .unwrap();

        assert_eq!(
            doc,
            json!({
                "data": {
                    "type": "service_authorization",
                    "attributes": {"permission": "full"},
                    "relationships": {
                        "service": {"data": {"type": "service", "id": "svc"}},
                        "user": {"data": {"type": "user", "id": "usr"}}
                    }
                }
            })
        );
    }

    #[test]
    fn test_update_input_encoding() {
        let doc = crate::decode::encode_one(&UpdateServiceAuthorizationInput {
            id: "sa1".to_string(),
            permission: Some(Permission::PurgeSelect),
        })
        .unwrap();

        assert_eq!(doc["data"]["id"], "sa1");
        assert_eq!(doc["data"]["attributes"]["permission"], "purge_select");
        assert!(doc["data"].get("relationships").is_none());
    }

    #[test]
    fn test_decode_service_authorization() {
        let body = json!({
            "data": {
                "id": "3krg2uUGZzb2W9Euo4moOY",
                "type": "service_authorization",
                "attributes": {
                    "permission": "full",
                    "created_at": "2020-04-09T18:14:30Z",
                    "updated_at": "2020-04-09T18:14:30Z",
                    "deleted_at": null
                },
                "relationships": {
                    "user": {"data": {"id": "4tKBSuFhNEiIpNDxmmVydt", "type": "user"}},
                    "service": {"data": {"id": "7i6HN3TK9wS159v2gPAZ8A", "type": "service"}}
                }
            }
        })
        .to_string();

        let sa: ServiceAuthorization = crate::decode::decode_one(body.as_bytes()).unwrap();
        assert_eq!(sa.id, "3krg2uUGZzb2W9Euo4moOY");
        assert_eq!(sa.permission, "full");
        assert_eq!(sa.user_id.as_deref(), Some("4tKBSuFhNEiIpNDxmmVydt"));
        assert_eq!(sa.service_id.as_deref(), Some("7i6HN3TK9wS159v2gPAZ8A"));
        assert!(sa.created_at.is_some());
        assert!(sa.deleted_at.is_none());
    }
}
