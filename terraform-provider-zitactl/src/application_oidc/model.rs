use crate::error::{ProviderError, ProviderResult};
use crate::helper::{
    StringList, bool_or_default, enum_list_value, format_duration, list_value, non_empty_str, parse_duration,
    parse_enum, parse_enum_list, string_list, string_or_default, string_value,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tf_provider::value::Value;
use zitactl_client::app::{
    Application, CreateApplicationRequest, CreateOidcApplicationRequest, UpdateApplicationRequest,
    UpdateOidcApplicationConfigurationRequest,
};
use zitactl_client::{
    OidcAppType, OidcAuthMethodType, OidcGrantType, OidcResponseType, OidcTokenType, OidcVersion, ProtoEnum,
};

/// State of one `zitactl_application_oidc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationOidcState {
    pub name: Value<String>,
    pub project_id: Value<String>,
    pub grant_types: StringList,
    pub redirect_uris: StringList,
    pub response_types: StringList,

    pub access_token_role_assertion: Value<bool>,
    pub access_token_type: Value<String>,
    pub app_type: Value<String>,
    pub auth_method_type: Value<String>,
    pub clock_skew: Value<String>,
    pub id_token_role_assertion: Value<bool>,
    pub id_token_userinfo_assertion: Value<bool>,
    pub skip_native_app_success_page: Value<bool>,
    pub version: Value<String>,
    pub dev_mode: Value<bool>,

    pub additional_origins: StringList,
    pub post_logout_redirect_uris: StringList,

    pub id: Value<String>,
    pub client_id: Value<String>,
    pub client_secret: Value<String>,
}

impl ApplicationOidcState {
    /// Checks every known enum name and `clock_skew`.
    pub fn validate(&self) -> Vec<ProviderError> {
        let checks = [
            parse_enum_list::<OidcGrantType>("grant_types", &self.grant_types).err(),
            parse_enum_list::<OidcResponseType>("response_types", &self.response_types).err(),
            parse_enum::<OidcTokenType>("access_token_type", &self.access_token_type).err(),
            parse_enum::<OidcAppType>("app_type", &self.app_type).err(),
            parse_enum::<OidcAuthMethodType>("auth_method_type", &self.auth_method_type).err(),
            parse_enum::<OidcVersion>("version", &self.version).err(),
            self.clock_skew().err(),
        ];
        checks.into_iter().flatten().collect()
    }

    fn clock_skew(&self) -> ProviderResult<Option<Duration>> {
        let Some(text) = non_empty_str(&self.clock_skew) else {
            return Ok(None);
        };
        parse_duration(text).map(Some).map_err(|e| {
            ProviderError::new("Invalid ClockSkew", format!("Could not parse clock_skew duration: {e}"))
                .at("clock_skew")
        })
    }

    pub fn to_create_request(&self) -> ProviderResult<CreateApplicationRequest> {
        Ok(CreateApplicationRequest {
            project_id: string_or_default(&self.project_id),
            name: string_or_default(&self.name),
            oidc_request: CreateOidcApplicationRequest {
                redirect_uris: string_list(&self.redirect_uris),
                response_types: parse_enum_list("response_types", &self.response_types)?,
                grant_types: parse_enum_list("grant_types", &self.grant_types)?,
                app_type: parse_enum("app_type", &self.app_type)?.unwrap_or_default(),
                auth_method_type: parse_enum("auth_method_type", &self.auth_method_type)?.unwrap_or_default(),
                post_logout_redirect_uris: string_list(&self.post_logout_redirect_uris),
                version: parse_enum("version", &self.version)?.unwrap_or_default(),
                dev_mode: bool_or_default(&self.dev_mode),
                access_token_type: parse_enum("access_token_type", &self.access_token_type)?.unwrap_or_default(),
                access_token_role_assertion: bool_or_default(&self.access_token_role_assertion),
                id_token_role_assertion: bool_or_default(&self.id_token_role_assertion),
                id_token_userinfo_assertion: bool_or_default(&self.id_token_userinfo_assertion),
                clock_skew: self.clock_skew()?,
                additional_origins: string_list(&self.additional_origins),
                skip_native_app_success_page: bool_or_default(&self.skip_native_app_success_page),
            },
        })
    }

    /// True if any attribute of the OIDC configuration differs from `prior`.
    pub fn oidc_config_changed(&self, prior: &Self) -> bool {
        self.dev_mode != prior.dev_mode
            || self.grant_types != prior.grant_types
            || self.response_types != prior.response_types
            || self.redirect_uris != prior.redirect_uris
            || self.access_token_role_assertion != prior.access_token_role_assertion
            || self.id_token_role_assertion != prior.id_token_role_assertion
            || self.id_token_userinfo_assertion != prior.id_token_userinfo_assertion
            || self.skip_native_app_success_page != prior.skip_native_app_success_page
            || self.access_token_type != prior.access_token_type
            || self.app_type != prior.app_type
            || self.auth_method_type != prior.auth_method_type
            || self.version != prior.version
            || self.post_logout_redirect_uris != prior.post_logout_redirect_uris
            || self.additional_origins != prior.additional_origins
            || self.clock_skew != prior.clock_skew
    }

    pub fn name_changed(&self, prior: &Self) -> bool {
        string_or_default(&self.name) != string_or_default(&prior.name)
    }

    /// The update moving `prior` to `self`, or `None` if nothing changed.
    /// Only the changed parts are sent.
    pub fn to_update_request(&self, prior: &Self) -> ProviderResult<Option<UpdateApplicationRequest>> {
        let name_changed = self.name_changed(prior);
        let config_changed = self.oidc_config_changed(prior);
        if !name_changed && !config_changed {
            return Ok(None);
        }

        let oidc_configuration_request = if config_changed {
            Some(UpdateOidcApplicationConfigurationRequest {
                redirect_uris: string_list(&self.redirect_uris),
                response_types: parse_enum_list("response_types", &self.response_types)?,
                grant_types: parse_enum_list("grant_types", &self.grant_types)?,
                app_type: parse_enum("app_type", &self.app_type)?,
                auth_method_type: parse_enum("auth_method_type", &self.auth_method_type)?,
                post_logout_redirect_uris: string_list(&self.post_logout_redirect_uris),
                version: parse_enum("version", &self.version)?,
                dev_mode: Some(bool_or_default(&self.dev_mode)),
                access_token_type: parse_enum("access_token_type", &self.access_token_type)?,
                access_token_role_assertion: Some(bool_or_default(&self.access_token_role_assertion)),
                id_token_role_assertion: Some(bool_or_default(&self.id_token_role_assertion)),
                id_token_userinfo_assertion: Some(bool_or_default(&self.id_token_userinfo_assertion)),
                clock_skew: self.clock_skew()?,
                additional_origins: string_list(&self.additional_origins),
                skip_native_app_success_page: Some(bool_or_default(&self.skip_native_app_success_page)),
            })
        } else {
            None
        };

        Ok(Some(UpdateApplicationRequest {
            id: string_or_default(&self.id),
            project_id: string_or_default(&self.project_id),
            name: if name_changed {
                string_or_default(&self.name)
            } else {
                String::new()
            },
            oidc_configuration_request,
        }))
    }

    /// Overwrites the state with what Zitadel reports.
    ///
    /// Empty lists become null. `clock_skew` is only tracked when the state
    /// already has one, and `client_id` is only filled in when missing.
    pub fn apply_remote(&mut self, app: &Application) {
        self.name = string_value(&app.name);

        let Some(oidc) = &app.oidc_config else {
            return;
        };

        self.grant_types = enum_list_value(&oidc.grant_types);
        self.response_types = enum_list_value(&oidc.response_types);
        self.redirect_uris = list_value(&oidc.redirect_uris);
        self.post_logout_redirect_uris = list_value(&oidc.post_logout_redirect_uris);
        self.additional_origins = list_value(&oidc.additional_origins);

        self.access_token_role_assertion = Value::Value(oidc.access_token_role_assertion);
        self.id_token_role_assertion = Value::Value(oidc.id_token_role_assertion);
        self.id_token_userinfo_assertion = Value::Value(oidc.id_token_userinfo_assertion);
        self.dev_mode = Value::Value(oidc.dev_mode);
        self.skip_native_app_success_page = Value::Value(oidc.skip_native_app_success_page);
        self.access_token_type = string_value(oidc.access_token_type.as_str());
        self.app_type = string_value(oidc.app_type.as_str());
        self.auth_method_type = string_value(oidc.auth_method_type.as_str());
        self.version = string_value(oidc.version.as_str());

        self.clock_skew = match non_empty_str(&self.clock_skew) {
            Some(_) => string_value(format_duration(oidc.clock_skew.unwrap_or_default())),
            None => Value::Null,
        };

        if non_empty_str(&self.client_id).is_none() && !oidc.client_id.is_empty() {
            self.client_id = string_value(&oidc.client_id);
        }
    }
}
