//! Minimal Zitadel API client.
//!
//! Covers exactly what the zitactl Terraform provider needs:
//! - Key file parsing and JWT profile authentication
//! - Organization search (`zitadel.org.v2`)
//! - Project CRUD (`zitadel.project.v2beta`)
//! - OIDC application CRUD (`zitadel.app.v2beta`)
//!
//! Calls use the Connect protocol's JSON encoding: a `POST` to
//! `/{package.Service}/{Method}` with a proto3-JSON body. Error responses are
//! decoded into [`ZitadelError::Status`] so callers can tell a missing object
//! from any other failure.
//!
//! # Example
//!
//! ```no_run
//! use zitactl_client::{ClientConfig, ZitadelClient};
//!
//! # async fn run(key_json: String) -> zitactl_client::ZitadelResult<()> {
//! let client = ZitadelClient::new(ClientConfig::new("zitadel.example.com", key_json))?;
//! let project = client.get_project("123456789").await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
mod auth;
mod client;
pub mod duration;
mod enums;
mod error;
mod key;
pub mod org;
pub mod project;

pub use auth::{API_SCOPES, JWT_BEARER_GRANT, TokenSource};
pub use client::{ClientConfig, ZitadelClient};
pub use enums::{
    AppState, OidcAppType, OidcAuthMethodType, OidcGrantType, OidcResponseType, OidcTokenType,
    OidcVersion, OrganizationState, PrivateLabelingSetting, ProjectState, ProtoEnum,
    TextQueryMethod,
};
pub use error::{StatusCode, ZitadelError, ZitadelResult};
pub use key::{ASSERTION_LIFETIME_SECS, AssertionClaims, KeyType, ServiceAccountKey};
