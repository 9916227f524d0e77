//! `zitactl_application_oidc` resource.

mod model;

pub use model::ApplicationOidcState;

use crate::client_info::ClientInfo;
use crate::error::{ProviderError, ProviderResult, report};
use crate::helper::{known_str, string_or_default, string_value, unknown_if_unset};
use crate::schema;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tf_provider::schema::{AttributeConstraint, Block, Description, Schema};
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{AttributePath, Diagnostics, Resource};
use tracing::{debug, trace, warn};
use zitactl_client::{
    OidcAppType, OidcAuthMethodType, OidcGrantType, OidcResponseType, OidcTokenType, OidcVersion, ProtoEnum,
    ZitadelClient,
};

#[derive(Debug, Clone)]
pub struct ApplicationOidcResource {
    client_info: Arc<ClientInfo>,
}

impl ApplicationOidcResource {
    pub fn new(client_info: Arc<ClientInfo>) -> Self {
        Self { client_info }
    }

    pub fn schema_definition() -> Schema {
        use AttributeConstraint::{Computed, Optional, OptionalComputed, Required};

        let attributes = HashMap::from([
            ("name".to_string(), schema::string(Required, "Name of the application")),
            (
                "project_id".to_string(),
                schema::string(Required, "ID of the project; changing it replaces the application"),
            ),
            (
                "grant_types".to_string(),
                schema::string_list(Required, &schema::with_values("Grant types", &OidcGrantType::names())),
            ),
            ("redirect_uris".to_string(), schema::string_list(Required, "Redirect URIs")),
            (
                "response_types".to_string(),
                schema::string_list(
                    Required,
                    &schema::with_values("Response types", &OidcResponseType::names()),
                ),
            ),
            (
                "access_token_role_assertion".to_string(),
                schema::boolean(OptionalComputed, "Access token role assertion"),
            ),
            (
                "access_token_type".to_string(),
                schema::string(
                    OptionalComputed,
                    &schema::with_values("Access token type", &OidcTokenType::names()),
                ),
            ),
            (
                "app_type".to_string(),
                schema::string(OptionalComputed, &schema::with_values("App type", &OidcAppType::names())),
            ),
            (
                "auth_method_type".to_string(),
                schema::string(
                    OptionalComputed,
                    &schema::with_values("Auth method type", &OidcAuthMethodType::names()),
                ),
            ),
            (
                "clock_skew".to_string(),
                schema::string(OptionalComputed, "Clock skew, e.g. `1s` or `500ms`"),
            ),
            (
                "id_token_role_assertion".to_string(),
                schema::boolean(OptionalComputed, "ID token role assertion"),
            ),
            (
                "id_token_userinfo_assertion".to_string(),
                schema::boolean(OptionalComputed, "ID token userinfo assertion"),
            ),
            (
                "skip_native_app_success_page".to_string(),
                schema::boolean(
                    OptionalComputed,
                    "Skip the successful login page on native apps and directly redirect the user to the callback",
                ),
            ),
            (
                "version".to_string(),
                schema::string(OptionalComputed, &schema::with_values("Version", &OidcVersion::names())),
            ),
            (
                "dev_mode".to_string(),
                schema::boolean(OptionalComputed, "Dev mode, `false` unless set"),
            ),
            ("additional_origins".to_string(), schema::string_list(Optional, "Additional origins")),
            (
                "post_logout_redirect_uris".to_string(),
                schema::string_list(Optional, "Post logout redirect URIs"),
            ),
            ("id".to_string(), schema::string(Computed, "The ID of this resource")),
            (
                "client_id".to_string(),
                schema::sensitive(schema::string(Computed, "Generated client ID")),
            ),
            (
                "client_secret".to_string(),
                schema::sensitive(schema::string(Computed, "Generated client secret")),
            ),
        ]);

        Schema {
            version: 0,
            block: Block {
                attributes,
                description: Description::markdown("Manages a ZITADEL OIDC application"),
                ..Default::default()
            },
        }
    }

    /// Plan for a new application: unset computed values are unknown.
    pub fn plan_create_state(proposed: ApplicationOidcState, config: &ApplicationOidcState) -> ApplicationOidcState {
        let mut planned = proposed;
        unknown_if_unset(&mut planned.access_token_role_assertion, &config.access_token_role_assertion);
        unknown_if_unset(&mut planned.access_token_type, &config.access_token_type);
        unknown_if_unset(&mut planned.app_type, &config.app_type);
        unknown_if_unset(&mut planned.auth_method_type, &config.auth_method_type);
        unknown_if_unset(&mut planned.clock_skew, &config.clock_skew);
        unknown_if_unset(&mut planned.id_token_role_assertion, &config.id_token_role_assertion);
        unknown_if_unset(&mut planned.id_token_userinfo_assertion, &config.id_token_userinfo_assertion);
        unknown_if_unset(&mut planned.skip_native_app_success_page, &config.skip_native_app_success_page);
        unknown_if_unset(&mut planned.version, &config.version);
        unknown_if_unset(&mut planned.dev_mode, &config.dev_mode);
        planned.id = Value::Unknown;
        planned.client_id = Value::Unknown;
        planned.client_secret = Value::Unknown;
        planned
    }

    /// Plan for a change. Unset optional values keep their prior value,
    /// except `dev_mode`, which is recomputed whenever something changes.
    pub fn plan_update_state(
        prior: &ApplicationOidcState,
        proposed: ApplicationOidcState,
        config: &ApplicationOidcState,
    ) -> (ApplicationOidcState, Vec<&'static str>) {
        let mut planned = proposed;
        planned.id = prior.id.clone();
        planned.client_id = prior.client_id.clone();
        planned.client_secret = prior.client_secret.clone();

        if planned != *prior {
            unknown_if_unset(&mut planned.dev_mode, &config.dev_mode);
        }

        let mut replace = Vec::new();
        if planned.project_id != prior.project_id {
            replace.push("project_id");
        }
        (planned, replace)
    }

    pub async fn create_application(&self, planned: ApplicationOidcState) -> ProviderResult<ApplicationOidcState> {
        let client = self.client_info.client().await?;
        let request = planned.to_create_request()?;

        debug!(name = %request.name, project_id = %request.project_id, "creating OIDC application");
        let response = client.create_application(&request).await.map_err(|e| {
            ProviderError::new(
                "Error creating OIDC application",
                format!("Could not create OIDC application: {e}"),
            )
        })?;

        let mut state = planned;
        state.id = string_value(response.app_id);
        match response.oidc_response {
            Some(oidc) => {
                state.client_id = non_empty(oidc.client_id);
                state.client_secret = non_empty(oidc.client_secret);
            }
            None => {
                state.client_id = Value::Null;
                state.client_secret = Value::Null;
            }
        }
        trace!(app_id = ?known_str(&state.id), "created OIDC application");

        self.refresh(&client, state).await
    }

    /// Refreshes `state` from Zitadel. `None` means the application is gone.
    pub async fn read_application(
        &self,
        state: ApplicationOidcState,
    ) -> ProviderResult<Option<ApplicationOidcState>> {
        let client = match self.client_info.client().await {
            Ok(client) => client,
            Err(err) if err.is_unknown_configuration() => {
                warn!(
                    app_id = ?known_str(&state.id),
                    "skipping refresh due to unknown provider configuration"
                );
                return Ok(Some(state));
            }
            Err(err) => return Err(err.into()),
        };
        self.fetch(&client, state).await
    }

    pub async fn update_application(
        &self,
        prior: &ApplicationOidcState,
        planned: ApplicationOidcState,
    ) -> ProviderResult<ApplicationOidcState> {
        let client = self.client_info.client().await?;
        let app_id = string_or_default(&planned.id);

        debug!(
            app_id = %app_id,
            name_changed = planned.name_changed(prior),
            oidc_config_changed = planned.oidc_config_changed(prior),
            "updating OIDC application"
        );

        if let Some(request) = planned.to_update_request(prior)? {
            client.update_application(&request).await.map_err(|e| {
                ProviderError::new(
                    "Error updating OIDC application",
                    format!("Could not update OIDC application {app_id}: {e}"),
                )
            })?;
        }

        self.refresh(&client, planned).await
    }

    /// Deletes the application; one that is already gone counts as deleted.
    pub async fn delete_application(&self, state: &ApplicationOidcState) -> ProviderResult<()> {
        let client = self.client_info.client().await?;
        let app_id = string_or_default(&state.id);
        let project_id = string_or_default(&state.project_id);

        debug!(app_id = %app_id, project_id = %project_id, "deleting OIDC application");
        match client.delete_application(&app_id, &project_id).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                warn!(app_id = %app_id, "OIDC application already deleted or does not exist");
            }
            Err(e) => {
                return Err(ProviderError::new(
                    "Error deleting OIDC application",
                    format!("Could not delete OIDC application {app_id}: {e}"),
                ));
            }
        }

        trace!(app_id = %app_id, project_id = %project_id, "deleted OIDC application");
        Ok(())
    }

    /// Import ID format: `project_id:app_id`.
    pub fn import_application(id: &str) -> ProviderResult<ApplicationOidcState> {
        let invalid = || {
            ProviderError::new(
                "Invalid Import ID",
                format!("Expected import ID format: 'project_id:app_id', got: {id}"),
            )
        };

        let mut parts = id.split(':');
        let (Some(project_id), Some(app_id), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        if project_id.is_empty() || app_id.is_empty() {
            return Err(invalid());
        }

        Ok(ApplicationOidcState {
            project_id: string_value(project_id),
            id: string_value(app_id),
            ..Default::default()
        })
    }

    async fn fetch(
        &self,
        client: &ZitadelClient,
        mut state: ApplicationOidcState,
    ) -> ProviderResult<Option<ApplicationOidcState>> {
        let app_id = string_or_default(&state.id);
        debug!(app_id = %app_id, project_id = ?known_str(&state.project_id), "reading OIDC application");

        let response = match client.get_application(&app_id).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                warn!(app_id = %app_id, "OIDC application not found, removing from state");
                return Ok(None);
            }
            Err(e) => {
                return Err(ProviderError::new(
                    "Error reading OIDC application",
                    format!("Could not read OIDC application {app_id}: {e}"),
                ));
            }
        };

        if let Some(app) = &response.app {
            state.apply_remote(app);
        }
        Ok(Some(state))
    }

    async fn refresh(
        &self,
        client: &ZitadelClient,
        state: ApplicationOidcState,
    ) -> ProviderResult<ApplicationOidcState> {
        let app_id = string_or_default(&state.id);
        self.fetch(client, state).await?.ok_or_else(|| {
            ProviderError::new(
                "Error reading OIDC application",
                format!("OIDC application {app_id} disappeared right after it was written"),
            )
        })
    }
}

fn non_empty(s: String) -> Value<String> {
    if s.is_empty() { Value::Null } else { Value::Value(s) }
}

#[async_trait]
impl Resource for ApplicationOidcResource {
    type State<'a> = ApplicationOidcState;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Self::schema_definition())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        let errors = config.validate();
        for err in &errors {
            report(diags, err);
        }
        errors.is_empty().then_some(())
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        // No state and no diagnostics drops the resource.
        match self.read_application(state).await {
            Ok(state) => state.map(|state| (state, private_state)),
            Err(err) => {
                report(diags, &err);
                None
            }
        }
    }

    async fn plan_create<'a>(
        &self,
        _diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        Some((Self::plan_create_state(proposed_state, &config_state), Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        _diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>, Vec<AttributePath>)> {
        let (planned, replace) = Self::plan_update_state(&prior_state, proposed_state, &config_state);
        let replace = replace.into_iter().map(AttributePath::new).collect();
        Some((planned, prior_private_state, replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::PrivateState<'a>> {
        Some(prior_private_state)
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        match self.create_application(planned_state).await {
            Ok(state) => Some((state, planned_private_state)),
            Err(err) => {
                report(diags, &err);
                None
            }
        }
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        match self.update_application(&prior_state, planned_state).await {
            Ok(state) => Some((state, planned_private_state)),
            Err(err) => {
                report(diags, &err);
                None
            }
        }
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        _planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        match self.delete_application(&prior_state).await {
            Ok(()) => Some(()),
            Err(err) => {
                report(diags, &err);
                None
            }
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        match Self::import_application(&id) {
            Ok(state) => Some((state, Default::default())),
            Err(err) => {
                report(diags, &err);
                None
            }
        }
    }
}
