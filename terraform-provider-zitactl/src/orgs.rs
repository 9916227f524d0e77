//! `zitactl_orgs` data source.

use crate::client_info::ClientInfo;
use crate::error::{ProviderError, ProviderResult, report};
use crate::helper::{StringList, parse_enum, string_or_default, string_value};
use crate::schema;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tf_provider::schema::{AttributeConstraint, Block, Description, Schema};
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{DataSource, Diagnostics};
use tracing::{debug, trace};
use zitactl_client::{ProtoEnum, TextQueryMethod};

pub const DEFAULT_NAME_METHOD: TextQueryMethod = TextQueryMethod::EqualsIgnoreCase;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgsState {
    pub name: Value<String>,
    pub name_method: Value<String>,
    pub ids: StringList,
}

#[derive(Debug, Clone)]
pub struct OrgsDataSource {
    client_info: Arc<ClientInfo>,
}

impl OrgsDataSource {
    pub fn new(client_info: Arc<ClientInfo>) -> Self {
        Self { client_info }
    }

    pub fn schema_definition() -> Schema {
        let attributes = HashMap::from([
            (
                "name".to_string(),
                schema::string(AttributeConstraint::Required, "Name of the organization"),
            ),
            (
                "name_method".to_string(),
                schema::string(
                    AttributeConstraint::Optional,
                    &schema::with_values(
                        "Method for querying organizations by name, defaults to `TEXT_QUERY_METHOD_EQUALS_IGNORE_CASE`",
                        &TextQueryMethod::names(),
                    ),
                ),
            ),
            (
                "ids".to_string(),
                schema::string_list(AttributeConstraint::Computed, "A list of all organization IDs"),
            ),
        ]);

        Schema {
            version: 0,
            block: Block {
                attributes,
                description: Description::markdown("Lists the IDs of ZITADEL organizations matching a name"),
                ..Default::default()
            },
        }
    }

    /// Checks `name_method` when it is known.
    pub fn validate_config(config: &OrgsState) -> ProviderResult<()> {
        parse_enum::<TextQueryMethod>("name_method", &config.name_method)?;
        Ok(())
    }

    /// Looks up the organizations whose name matches and fills `ids`.
    pub async fn read_orgs(&self, config: OrgsState) -> ProviderResult<OrgsState> {
        let client = self.client_info.client().await?;

        let name = string_or_default(&config.name);
        let method = parse_enum::<TextQueryMethod>("name_method", &config.name_method)?
            .unwrap_or(DEFAULT_NAME_METHOD);

        debug!(name = %name, name_method = %method, "searching for organizations");

        let orgs = client
            .find_organizations_by_name(&name, method)
            .await
            .map_err(|e| {
                ProviderError::new(
                    "Failed to list organizations",
                    format!("Unable to search for organizations with name '{name}': {e}"),
                )
            })?;

        let ids = orgs.into_iter().map(|org| string_value(org.id)).collect();

        trace!(name = %name, "read organization data");

        Ok(OrgsState {
            ids: Value::Value(ids),
            ..config
        })
    }
}

#[async_trait]
impl DataSource for OrgsDataSource {
    type State<'a> = OrgsState;
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
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        match self.read_orgs(config).await {
            Ok(state) => Some(state),
            Err(err) => {
                report(diags, &err);
                None
            }
        }
    }
}
