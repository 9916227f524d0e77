//! `zitadel.org.v2.OrganizationService`.

use crate::client::ZitadelClient;
use crate::enums::{OrganizationState, TextQueryMethod};
use crate::error::ZitadelResult;
use serde::{Deserialize, Serialize};

const LIST_ORGANIZATIONS: &str = "zitadel.org.v2.OrganizationService/ListOrganizations";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationNameQuery {
    pub name: String,
    pub method: TextQueryMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationIdQuery {
    pub id: String,
}

/// One search criterion; serialized as the protobuf `oneof`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchQuery {
    NameQuery(OrganizationNameQuery),
    IdQuery(OrganizationIdQuery),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrganizationsRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<SearchQuery>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub state: OrganizationState,
    pub primary_domain: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListOrganizationsResponse {
    pub result: Vec<Organization>,
}

impl ZitadelClient {
    pub async fn list_organizations(
        &self,
        request: &ListOrganizationsRequest,
    ) -> ZitadelResult<ListOrganizationsResponse> {
        self.unary(LIST_ORGANIZATIONS, request).await
    }

    /// Organizations whose name matches `name` under `method`.
    pub async fn find_organizations_by_name(
        &self,
        name: &str,
        method: TextQueryMethod,
    ) -> ZitadelResult<Vec<Organization>> {
        let request = ListOrganizationsRequest {
            queries: vec![SearchQuery::NameQuery(OrganizationNameQuery {
                name: name.to_string(),
                method,
            })],
        };
        Ok(self.list_organizations(&request).await?.result)
    }

    /// Returns true if an organization with this ID is visible to the caller.
    pub async fn organization_exists(&self, id: &str) -> ZitadelResult<bool> {
        let request = ListOrganizationsRequest {
            queries: vec![SearchQuery::IdQuery(OrganizationIdQuery { id: id.to_string() })],
        };
        let response = self.list_organizations(&request).await?;
        Ok(response.result.iter().any(|org| org.id == id))
    }
}
