//! `zitactl_project` resource.

use crate::client_info::ClientInfo;
use crate::error::{ProviderError, ProviderResult, report};
use crate::helper::{bool_or_default, known_str, parse_enum, string_or_default, string_value, unknown_if_unset};
use crate::schema;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tf_provider::schema::{AttributeConstraint, Block, Description, Schema};
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{AttributePath, Diagnostics, Resource};
use tracing::{debug, trace, warn};
use zitactl_client::project::{CreateProjectRequest, Project, UpdateProjectRequest};
use zitactl_client::{PrivateLabelingSetting, ProtoEnum, ZitadelClient};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectState {
    pub name: Value<String>,
    pub org_id: Value<String>,
    pub has_project_check: Value<bool>,
    pub private_labeling_setting: Value<String>,
    pub project_role_assertion: Value<bool>,
    pub project_role_check: Value<bool>,
    pub id: Value<String>,
    pub state: Value<String>,
}

impl ProjectState {
    /// Overwrites every attribute with what Zitadel reports.
    fn apply_remote(&mut self, project: &Project) {
        self.name = string_value(&project.name);
        self.org_id = string_value(&project.organization_id);
        self.project_role_assertion = Value::Value(project.project_role_assertion);
        self.project_role_check = Value::Value(project.authorization_required);
        self.has_project_check = Value::Value(project.project_access_required);
        self.private_labeling_setting = string_value(project.private_labeling_setting.as_str());
        self.state = string_value(project.state.as_str());
    }
}

#[derive(Debug, Clone)]
pub struct ProjectResource {
    client_info: Arc<ClientInfo>,
}

impl ProjectResource {
    pub fn new(client_info: Arc<ClientInfo>) -> Self {
        Self { client_info }
    }

    pub fn schema_definition() -> Schema {
        use AttributeConstraint::{Computed, OptionalComputed, Required};

        let attributes = HashMap::from([
            ("name".to_string(), schema::string(Required, "Name of the project")),
            (
                "org_id".to_string(),
                schema::string(Required, "ID of the organization; changing it replaces the project"),
            ),
            (
                "has_project_check".to_string(),
                schema::boolean(
                    OptionalComputed,
                    "ZITADEL checks if the org of the user has permission to this project",
                ),
            ),
            (
                "private_labeling_setting".to_string(),
                schema::string(
                    OptionalComputed,
                    &schema::with_values(
                        "Defines from where the private labeling should be triggered",
                        &PrivateLabelingSetting::names(),
                    ),
                ),
            ),
            (
                "project_role_assertion".to_string(),
                schema::boolean(OptionalComputed, "Describes if roles of user should be added in token"),
            ),
            (
                "project_role_check".to_string(),
                schema::boolean(
                    OptionalComputed,
                    "ZITADEL checks if the user has at least one role on this project",
                ),
            ),
            ("id".to_string(), schema::string(Computed, "The ID of this resource")),
            ("state".to_string(), schema::string(Computed, "State of the project")),
        ]);

        Schema {
            version: 0,
            block: Block {
                attributes,
                description: Description::markdown("Manages a ZITADEL project"),
                ..Default::default()
            },
        }
    }

    pub fn validate_config(config: &ProjectState) -> ProviderResult<()> {
        parse_enum::<PrivateLabelingSetting>("private_labeling_setting", &config.private_labeling_setting)?;
        Ok(())
    }

    /// Plan for a new project: everything Zitadel fills in is unknown.
    pub fn plan_create_state(proposed: ProjectState, config: &ProjectState) -> ProjectState {
        let mut planned = proposed;
        unknown_if_unset(&mut planned.has_project_check, &config.has_project_check);
        unknown_if_unset(&mut planned.project_role_assertion, &config.project_role_assertion);
        unknown_if_unset(&mut planned.project_role_check, &config.project_role_check);
        unknown_if_unset(&mut planned.private_labeling_setting, &config.private_labeling_setting);
        planned.id = Value::Unknown;
        planned.state = Value::Unknown;
        planned
    }

    /// Plan for a change. Returns the planned state and the attributes
    /// that force a replacement.
    pub fn plan_update_state(
        prior: &ProjectState,
        proposed: ProjectState,
        config: &ProjectState,
    ) -> (ProjectState, Vec<&'static str>) {
        let mut planned = proposed;
        planned.id = prior.id.clone();

        if planned != *prior {
            unknown_if_unset(&mut planned.has_project_check, &config.has_project_check);
            unknown_if_unset(&mut planned.project_role_assertion, &config.project_role_assertion);
            unknown_if_unset(&mut planned.project_role_check, &config.project_role_check);
            unknown_if_unset(&mut planned.private_labeling_setting, &config.private_labeling_setting);
            planned.state = Value::Unknown;
        }

        let mut replace = Vec::new();
        if planned.org_id != prior.org_id {
            replace.push("org_id");
        }
        (planned, replace)
    }

    pub async fn create_project(&self, planned: ProjectState) -> ProviderResult<ProjectState> {
        let client = self.client_info.client().await?;

        let org_id = string_or_default(&planned.org_id);
        debug!(org_id = %org_id, "validating organization exists");
        match client.organization_exists(&org_id).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(ProviderError::new(
                    "Invalid Organization ID",
                    format!("Organization with ID {org_id} does not exist. Please provide a valid organization ID."),
                )
                .at("org_id"));
            }
            Err(e) => {
                return Err(ProviderError::new(
                    "Error Validating Organization",
                    format!("Could not validate organization {org_id}: {e}"),
                ));
            }
        }

        let request = CreateProjectRequest {
            organization_id: org_id.clone(),
            name: string_or_default(&planned.name),
            project_role_assertion: bool_or_default(&planned.project_role_assertion),
            authorization_required: bool_or_default(&planned.project_role_check),
            project_access_required: bool_or_default(&planned.has_project_check),
            private_labeling_setting: parse_enum("private_labeling_setting", &planned.private_labeling_setting)?
                .unwrap_or_default(),
        };

        debug!(name = %request.name, org_id = %org_id, "creating project");
        let response = client
            .create_project(&request)
            .await
            .map_err(|e| ProviderError::new("Error creating project", format!("Could not create project: {e}")))?;

        let mut state = planned;
        state.id = string_value(response.id);
        trace!(project_id = ?known_str(&state.id), "created project");

        self.refresh(&client, state).await
    }

    /// Refreshes `state` from Zitadel. `None` means the project is gone.
    pub async fn read_project(&self, state: ProjectState) -> ProviderResult<Option<ProjectState>> {
        let client = match self.client_info.client().await {
            Ok(client) => client,
            Err(err) if err.is_unknown_configuration() => {
                warn!(
                    project_id = ?known_str(&state.id),
                    "skipping refresh due to unknown provider configuration"
                );
                return Ok(Some(state));
            }
            Err(err) => return Err(err.into()),
        };
        self.fetch(&client, state).await
    }

    pub async fn update_project(&self, planned: ProjectState) -> ProviderResult<ProjectState> {
        let client = self.client_info.client().await?;
        let project_id = string_or_default(&planned.id);

        let request = UpdateProjectRequest {
            id: project_id.clone(),
            name: Some(string_or_default(&planned.name)),
            project_role_assertion: Some(bool_or_default(&planned.project_role_assertion)),
            project_role_check: Some(bool_or_default(&planned.project_role_check)),
            has_project_check: Some(bool_or_default(&planned.has_project_check)),
            private_labeling_setting: parse_enum("private_labeling_setting", &planned.private_labeling_setting)?,
        };

        debug!(project_id = %project_id, "updating project");
        client.update_project(&request).await.map_err(|e| {
            ProviderError::new(
                "Error updating project",
                format!("Could not update project {project_id}: {e}"),
            )
        })?;

        self.refresh(&client, planned).await
    }

    /// Deletes the project; one that is already gone counts as deleted.
    pub async fn delete_project(&self, state: &ProjectState) -> ProviderResult<()> {
        let client = self.client_info.client().await?;
        let project_id = string_or_default(&state.id);

        debug!(project_id = %project_id, "deleting project");
        match client.delete_project(&project_id).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                warn!(project_id = %project_id, "project already deleted or does not exist");
            }
            Err(e) => {
                return Err(ProviderError::new(
                    "Error deleting project",
                    format!("Could not delete project {project_id}: {e}"),
                ));
            }
        }

        trace!(project_id = %project_id, "deleted project");
        Ok(())
    }

    /// Import by project ID; the read that follows fills in the rest.
    pub fn import_project(id: &str) -> ProviderResult<ProjectState> {
        if id.trim().is_empty() {
            return Err(ProviderError::new(
                "Invalid Import ID",
                "Expected the ID of an existing project",
            ));
        }
        Ok(ProjectState {
            id: string_value(id),
            ..Default::default()
        })
    }

    async fn fetch(&self, client: &ZitadelClient, mut state: ProjectState) -> ProviderResult<Option<ProjectState>> {
        let project_id = string_or_default(&state.id);
        debug!(project_id = %project_id, org_id = ?known_str(&state.org_id), "reading project");

        let response = match client.get_project(&project_id).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                warn!(project_id = %project_id, "project not found, removing from state");
                return Ok(None);
            }
            Err(e) => {
                return Err(ProviderError::new(
                    "Error reading project",
                    format!("Could not read project {project_id}: {e}"),
                ));
            }
        };

        if let Some(project) = &response.project {
            state.apply_remote(project);
        }
        Ok(Some(state))
    }

    /// Read-back after a write; the project must still exist.
    async fn refresh(&self, client: &ZitadelClient, state: ProjectState) -> ProviderResult<ProjectState> {
        let project_id = string_or_default(&state.id);
        self.fetch(client, state).await?.ok_or_else(|| {
            ProviderError::new(
                "Error reading project",
                format!("Project {project_id} disappeared right after it was written"),
            )
        })
    }
}

#[async_trait]
impl Resource for ProjectResource {
    type State<'a> = ProjectState;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Self::schema_definition())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        match Self::validate_config(&config) {
            Ok(()) => Some(()),
            Err(err) => {
                report(diags, &err);
                None
            }
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        // No state and no diagnostics drops the resource.
        match self.read_project(state).await {
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
        match self.create_project(planned_state).await {
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
        _prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        match self.update_project(planned_state).await {
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
        match self.delete_project(&prior_state).await {
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
        match Self::import_project(&id) {
            Ok(state) => Some((state, Default::default())),
            Err(err) => {
                report(diags, &err);
                None
            }
        }
    }
}
