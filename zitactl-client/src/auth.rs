//! Access token acquisition via the JWT profile grant.

use crate::error::{ZitadelError, ZitadelResult};
use crate::key::ServiceAccountKey;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;
use tracing::debug;

pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Scopes requested for management access to the instance.
pub const API_SCOPES: &str = "openid urn:zitadel:iam:org:project:id:zitadel:aud";

/// Tokens are treated as expired this long before the server says so.
const EXPIRY_BUFFER_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Option<SystemTime>,
}

impl std::fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedToken")
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        self.expires_at.is_none_or(|exp| SystemTime::now() < exp)
    }
}

/// Fetches and caches access tokens for one key.
#[derive(Debug)]
pub struct TokenSource {
    http: Client,
    issuer: String,
    key: ServiceAccountKey,
    token: RwLock<Option<CachedToken>>,
}

impl TokenSource {
    pub fn new(http: Client, issuer: impl Into<String>, key: ServiceAccountKey) -> Self {
        Self {
            http,
            issuer: issuer.into(),
            key,
            token: RwLock::new(None),
        }
    }

    /// Returns a valid access token, exchanging a fresh assertion if needed.
    pub async fn access_token(&self) -> ZitadelResult<String> {
        if let Some(token) = self.token.read().await.as_ref().filter(|t| t.is_valid()) {
            return Ok(token.access_token.clone());
        }

        let mut guard = self.token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(token) = guard.as_ref().filter(|t| t.is_valid()) {
            return Ok(token.access_token.clone());
        }

        let fresh = self.exchange().await?;
        let access_token = fresh.access_token.clone();
        *guard = Some(fresh);
        Ok(access_token)
    }

    /// Drops the cached token so the next call fetches a new one.
    pub async fn invalidate(&self) {
        *self.token.write().await = None;
    }

    async fn exchange(&self) -> ZitadelResult<CachedToken> {
        let assertion = self.key.sign_assertion(&self.issuer)?;

        debug!(key_id = self.key.key_id(), "requesting Zitadel access token");

        let response = self
            .http
            .post(format!("{}/oauth/v2/token", self.issuer))
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("scope", API_SCOPES),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ZitadelError::AuthFailed(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ZitadelError::AuthFailed(format!("failed to parse token response: {e}")))?;

        let expires_at = token
            .expires_in
            .map(|secs| SystemTime::now() + Duration::from_secs(secs.saturating_sub(EXPIRY_BUFFER_SECS)));

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at,
        })
    }
}
