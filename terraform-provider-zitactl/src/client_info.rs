//! Deferred construction of the Zitadel client.
//!
//! Terraform calls `ConfigureProvider` before every operation, even when some
//! provider values are still unknown. [`ClientInfo::configure`] only records
//! the block; [`ClientInfo::client`] resolves it, builds the client on first
//! use and caches it for the lifetime of the provider instance.

use crate::config::{ClientSettings, ProviderModel};
use crate::error::ClientInfoError;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use zitactl_client::{ClientConfig, ZitadelClient, ZitadelResult};

/// Builds a client from resolved settings.
pub trait ClientFactory: fmt::Debug + Send + Sync {
    fn create(&self, settings: &ClientSettings) -> ZitadelResult<ZitadelClient>;
}

/// Authenticates with a service account (or application) key file.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServiceAccountClientFactory;

impl ClientFactory for ServiceAccountClientFactory {
    fn create(&self, settings: &ClientSettings) -> ZitadelResult<ZitadelClient> {
        let mut config = ClientConfig::new(&settings.domain, &settings.service_account_key);
        config.skip_tls_verification = settings.skip_tls_verification;
        config.user_agent = concat!("terraform-provider-zitactl/", env!("CARGO_PKG_VERSION")).to_string();
        ZitadelClient::new(config)
    }
}

/// Shared by the provider and every resource and data source.
pub struct ClientInfo {
    factory: Box<dyn ClientFactory>,
    config: RwLock<Option<ProviderModel>>,
    client: Mutex<Option<Arc<ZitadelClient>>>,
}

impl fmt::Debug for ClientInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientInfo")
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientInfo {
    pub fn new() -> Self {
        Self::with_factory(ServiceAccountClientFactory)
    }

    pub fn with_factory(factory: impl ClientFactory + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            config: RwLock::new(None),
            client: Mutex::new(None),
        }
    }

    /// Stores the provider block as-is and drops any cached client.
    pub async fn configure(&self, model: ProviderModel) {
        debug!(unknown = ?model.unknown_fields(), "storing provider configuration");
        *self.config.write().await = Some(model);
        *self.client.lock().await = None;
    }

    pub async fn config(&self) -> Option<ProviderModel> {
        self.config.read().await.clone()
    }

    /// Returns the client, building it on first use.
    pub async fn client(&self) -> Result<Arc<ZitadelClient>, ClientInfoError> {
        // Cache lock first; configure clears the cache after writing the config.
        let mut cached = self.client.lock().await;
        let model = self.config().await.ok_or(ClientInfoError::NotConfigured)?;
        if let Some(client) = cached.as_ref() {
            return Ok(Arc::clone(client));
        }

        let settings = model.resolve()?;
        debug!(
            domain = %settings.domain,
            skip_tls_verification = settings.skip_tls_verification,
            "creating Zitadel client"
        );

        let client = self
            .factory
            .create(&settings)
            .map(Arc::new)
            .map_err(ClientInfoError::Factory)?;
        *cached = Some(Arc::clone(&client));
        Ok(client)
    }
}
