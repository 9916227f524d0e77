//! `zitadel.project.v2beta.ProjectService`.

use crate::client::ZitadelClient;
use crate::enums::{PrivateLabelingSetting, ProjectState};
use crate::error::ZitadelResult;
use serde::{Deserialize, Serialize};

const SERVICE: &str = "zitadel.project.v2beta.ProjectService";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub organization_id: String,
    pub name: String,
    pub project_role_assertion: bool,
    pub authorization_required: bool,
    pub project_access_required: bool,
    pub private_labeling_setting: PrivateLabelingSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProjectResponse {
    pub id: String,
    pub creation_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub state: ProjectState,
    pub project_role_assertion: bool,
    pub authorization_required: bool,
    pub project_access_required: bool,
    pub private_labeling_setting: PrivateLabelingSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetProjectResponse {
    pub project: Option<Project>,
}

/// Fields left as `None` are not changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_role_assertion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_role_check: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_project_check: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_labeling_setting: Option<PrivateLabelingSetting>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeResponse {
    pub change_date: Option<String>,
}

impl ZitadelClient {
    pub async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> ZitadelResult<CreateProjectResponse> {
        self.unary(&format!("{SERVICE}/CreateProject"), request).await
    }

    pub async fn get_project(&self, id: &str) -> ZitadelResult<GetProjectResponse> {
        let request = GetProjectRequest { id: id.to_string() };
        self.unary(&format!("{SERVICE}/GetProject"), &request).await
    }

    pub async fn update_project(&self, request: &UpdateProjectRequest) -> ZitadelResult<ChangeResponse> {
        self.unary(&format!("{SERVICE}/UpdateProject"), request).await
    }

    pub async fn delete_project(&self, id: &str) -> ZitadelResult<ChangeResponse> {
        let request = DeleteProjectRequest { id: id.to_string() };
        self.unary(&format!("{SERVICE}/DeleteProject"), &request).await
    }
}
