//! `zitadel.app.v2beta.AppService`, OIDC applications only.

use crate::client::ZitadelClient;
use crate::enums::{
    AppState, OidcAppType, OidcAuthMethodType, OidcGrantType, OidcResponseType, OidcTokenType,
    OidcVersion,
};
use crate::error::ZitadelResult;
use crate::project::ChangeResponse;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SERVICE: &str = "zitadel.app.v2beta.AppService";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOidcApplicationRequest {
    pub redirect_uris: Vec<String>,
    pub response_types: Vec<OidcResponseType>,
    pub grant_types: Vec<OidcGrantType>,
    pub app_type: OidcAppType,
    pub auth_method_type: OidcAuthMethodType,
    pub post_logout_redirect_uris: Vec<String>,
    pub version: OidcVersion,
    pub dev_mode: bool,
    pub access_token_type: OidcTokenType,
    pub access_token_role_assertion: bool,
    pub id_token_role_assertion: bool,
    pub id_token_userinfo_assertion: bool,
    #[serde(with = "crate::duration", skip_serializing_if = "Option::is_none")]
    pub clock_skew: Option<Duration>,
    pub additional_origins: Vec<String>,
    pub skip_native_app_success_page: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub project_id: String,
    pub name: String,
    pub oidc_request: CreateOidcApplicationRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOidcApplicationResponse {
    pub client_id: String,
    pub client_secret: String,
    pub none_compliant: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateApplicationResponse {
    pub app_id: String,
    pub creation_date: Option<String>,
    pub oidc_response: Option<CreateOidcApplicationResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetApplicationRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OidcConfig {
    pub redirect_uris: Vec<String>,
    pub response_types: Vec<OidcResponseType>,
    pub grant_types: Vec<OidcGrantType>,
    pub app_type: OidcAppType,
    pub client_id: String,
    pub auth_method_type: OidcAuthMethodType,
    pub post_logout_redirect_uris: Vec<String>,
    pub version: OidcVersion,
    pub none_compliant: bool,
    pub dev_mode: bool,
    pub access_token_type: OidcTokenType,
    pub access_token_role_assertion: bool,
    pub id_token_role_assertion: bool,
    pub id_token_userinfo_assertion: bool,
    #[serde(with = "crate::duration")]
    pub clock_skew: Option<Duration>,
    pub additional_origins: Vec<String>,
    pub allowed_origins: Vec<String>,
    pub skip_native_app_success_page: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub state: AppState,
    pub oidc_config: Option<OidcConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetApplicationResponse {
    pub app: Option<Application>,
}

/// OIDC configuration changes; `None` and empty lists are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOidcApplicationConfigurationRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub redirect_uris: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_types: Vec<OidcResponseType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub grant_types: Vec<OidcGrantType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_type: Option<OidcAppType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_method_type: Option<OidcAuthMethodType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub post_logout_redirect_uris: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<OidcVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_type: Option<OidcTokenType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_role_assertion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token_role_assertion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token_userinfo_assertion: Option<bool>,
    #[serde(with = "crate::duration", skip_serializing_if = "Option::is_none")]
    pub clock_skew: Option<Duration>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_origins: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_native_app_success_page: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    pub id: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oidc_configuration_request: Option<UpdateOidcApplicationConfigurationRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteApplicationRequest {
    pub id: String,
    pub project_id: String,
}

impl ZitadelClient {
    pub async fn create_application(
        &self,
        request: &CreateApplicationRequest,
    ) -> ZitadelResult<CreateApplicationResponse> {
        self.unary(&format!("{SERVICE}/CreateApplication"), request).await
    }

    pub async fn get_application(&self, id: &str) -> ZitadelResult<GetApplicationResponse> {
        let request = GetApplicationRequest { id: id.to_string() };
        self.unary(&format!("{SERVICE}/GetApplication"), &request).await
    }

    pub async fn update_application(
        &self,
        request: &UpdateApplicationRequest,
    ) -> ZitadelResult<ChangeResponse> {
        self.unary(&format!("{SERVICE}/UpdateApplication"), request).await
    }

    pub async fn delete_application(&self, id: &str, project_id: &str) -> ZitadelResult<ChangeResponse> {
        let request = DeleteApplicationRequest {
            id: id.to_string(),
            project_id: project_id.to_string(),
        };
        self.unary(&format!("{SERVICE}/DeleteApplication"), &request).await
    }
}
