//! The `zitactl` provider.

use crate::application_oidc::ApplicationOidcResource;
use crate::client_info::ClientInfo;
use crate::config::ProviderModel;
use crate::orgs::OrgsDataSource;
use crate::project::ProjectResource;
use crate::schema;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tf_provider::schema::{AttributeConstraint, Block, Description, Schema};
use tf_provider::value::ValueEmpty;
use tf_provider::{Diagnostics, DynamicDataSource, DynamicResource, Provider, map};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ZitactlProvider {
    client_info: Arc<ClientInfo>,
}

impl ZitactlProvider {
    pub fn new(client_info: Arc<ClientInfo>) -> Self {
        Self { client_info }
    }

    pub fn client_info(&self) -> &Arc<ClientInfo> {
        &self.client_info
    }

    pub fn schema_definition() -> Schema {
        let attributes = HashMap::from([
            (
                "domain".to_string(),
                schema::string(
                    AttributeConstraint::Optional,
                    "Domain of the ZITADEL instance, e.g. `zitadel.example.com`. Falls back to `ZITACTL_DOMAIN`",
                ),
            ),
            (
                "skip_tls_verification".to_string(),
                schema::boolean(
                    AttributeConstraint::Optional,
                    "Accept invalid TLS certificates. Falls back to `ZITACTL_SKIP_TLS_VERIFICATION`",
                ),
            ),
            (
                "service_account_key".to_string(),
                schema::sensitive(schema::string(
                    AttributeConstraint::Optional,
                    "Service account key file (JSON). Falls back to `ZITACTL_SERVICE_ACCOUNT_KEY`",
                )),
            ),
        ]);

        Schema {
            version: 0,
            block: Block {
                attributes,
                description: Description::markdown("Manages ZITADEL projects and OIDC applications"),
                ..Default::default()
            },
        }
    }
}

#[async_trait]
impl Provider for ZitactlProvider {
    type Config<'a> = ProviderModel;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Self::schema_definition())
    }

    async fn validate<'a>(&self, _diags: &mut Diagnostics, _config: Self::Config<'a>) -> Option<()> {
        // Values may be unknown here; they are checked on first client use.
        Some(())
    }

    async fn configure<'a>(
        &self,
        _diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        info!(terraform_version = %terraform_version, "configuring zitactl provider");
        self.client_info.configure(config).await;
        Some(())
    }

    fn get_resources(&self, _diags: &mut Diagnostics) -> Option<HashMap<String, Box<dyn DynamicResource>>> {
        Some(map! {
            "project" => ProjectResource::new(Arc::clone(&self.client_info)),
            "application_oidc" => ApplicationOidcResource::new(Arc::clone(&self.client_info)),
        })
    }

    fn get_data_sources(&self, _diags: &mut Diagnostics) -> Option<HashMap<String, Box<dyn DynamicDataSource>>> {
        Some(map! {
            "orgs" => OrgsDataSource::new(Arc::clone(&self.client_info)),
        })
    }
}
