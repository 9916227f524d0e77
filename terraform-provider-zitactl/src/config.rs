//! Provider block model and resolution of its settings.

use crate::error::ClientInfoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tf_provider::value::Value;

pub const DOMAIN_ENV: &str = "ZITACTL_DOMAIN";
pub const SKIP_TLS_VERIFICATION_ENV: &str = "ZITACTL_SKIP_TLS_VERIFICATION";
pub const SERVICE_ACCOUNT_KEY_ENV: &str = "ZITACTL_SERVICE_ACCOUNT_KEY";

/// Raw `provider "zitactl"` block. Values may be null or still unknown.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderModel {
    pub domain: Value<String>,
    pub skip_tls_verification: Value<bool>,
    pub service_account_key: Value<String>,
}

impl fmt::Debug for ProviderModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match &self.service_account_key {
            Value::Value(_) => "[REDACTED]",
            Value::Null => "null",
            Value::Unknown => "unknown",
        };
        f.debug_struct("ProviderModel")
            .field("domain", &self.domain)
            .field("skip_tls_verification", &self.skip_tls_verification)
            .field("service_account_key", &key)
            .finish()
    }
}

/// Settings after config and environment have been merged.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub domain: String,
    pub skip_tls_verification: bool,
    pub service_account_key: String,
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("domain", &self.domain)
            .field("skip_tls_verification", &self.skip_tls_verification)
            .field("service_account_key", &"[REDACTED]")
            .finish()
    }
}

impl ProviderModel {
    pub fn new(domain: impl Into<String>, service_account_key: impl Into<String>) -> Self {
        Self {
            domain: Value::Value(domain.into()),
            skip_tls_verification: Value::Null,
            service_account_key: Value::Value(service_account_key.into()),
        }
    }

    /// Names of the attributes Terraform has not computed yet, in schema order.
    pub fn unknown_fields(&self) -> Vec<&'static str> {
        let mut unknown = Vec::new();
        if matches!(self.domain, Value::Unknown) {
            unknown.push("domain");
        }
        if matches!(self.skip_tls_verification, Value::Unknown) {
            unknown.push("skip_tls_verification");
        }
        if matches!(self.service_account_key, Value::Unknown) {
            unknown.push("service_account_key");
        }
        unknown
    }

    /// Resolves against the process environment.
    pub fn resolve(&self) -> Result<ClientSettings, ClientInfoError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolves with `lookup` standing in for the environment. Explicit
    /// configuration wins over the environment.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<ClientSettings, ClientInfoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let unknown = self.unknown_fields();
        if !unknown.is_empty() {
            return Err(ClientInfoError::UnknownValues(unknown));
        }

        let domain = match &self.domain {
            Value::Value(domain) if !domain.is_empty() => domain.clone(),
            _ => lookup(DOMAIN_ENV).unwrap_or_default(),
        };
        if domain.is_empty() {
            return Err(ClientInfoError::MissingAttribute("domain"));
        }

        let skip_tls_verification = match self.skip_tls_verification {
            Value::Value(skip) => skip,
            _ => lookup(SKIP_TLS_VERIFICATION_ENV)
                .map(|v| env_flag(&v))
                .unwrap_or(false),
        };

        let service_account_key = match &self.service_account_key {
            Value::Value(key) if !key.is_empty() => key.clone(),
            _ => lookup(SERVICE_ACCOUNT_KEY_ENV).unwrap_or_default(),
        };
        if service_account_key.is_empty() {
            return Err(ClientInfoError::MissingAttribute("service_account_key"));
        }

        Ok(ClientSettings {
            domain,
            skip_tls_verification,
            service_account_key,
        })
    }
}

fn env_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}
