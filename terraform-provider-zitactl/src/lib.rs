//! Terraform provider for Zitadel.
//!
//! Exposes three types to Terraform, all prefixed with `zitactl_`:
//! - `zitactl_orgs` data source: organization IDs looked up by name
//! - `zitactl_project` resource
//! - `zitactl_application_oidc` resource
//!
//! Provider settings may still be unknown when Terraform configures the
//! provider (for example when the Zitadel domain comes from another resource).
//! [`ClientInfo`] therefore only stores them; the API client is built the
//! first time a resource or data source needs it and reused afterwards.
//!
//! Every resource exposes plain async operations returning
//! [`ProviderResult`]; the `tf_provider` trait impls only translate results
//! into diagnostics.

pub mod application_oidc;
pub mod client_info;
pub mod config;
mod error;
pub mod helper;
pub mod orgs;
pub mod project;
pub mod provider;
mod schema;

pub use client_info::{ClientFactory, ClientInfo, ServiceAccountClientFactory};
pub use config::{ClientSettings, ProviderModel};
pub use error::{ClientInfoError, ProviderError, ProviderResult, report};
pub use provider::ZitactlProvider;

/// Name Terraform knows this provider by.
pub const PROVIDER_NAME: &str = "zitactl";
