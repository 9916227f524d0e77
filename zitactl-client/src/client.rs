//! HTTP transport for Zitadel's Connect endpoints.

use crate::auth::TokenSource;
use crate::error::{StatusCode, ZitadelError, ZitadelResult};
use crate::key::ServiceAccountKey;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings needed to reach one Zitadel instance.
#[derive(Clone)]
pub struct ClientConfig {
    /// Instance domain, `zitadel.example.com` or `localhost:8080`. An explicit
    /// `http://` or `https://` prefix is honoured; otherwise HTTPS is used.
    pub domain: String,
    /// Accept invalid or self-signed TLS certificates.
    pub skip_tls_verification: bool,
    /// Decoded key file JSON.
    pub service_account_key: String,
    /// Sent as `User-Agent`.
    pub user_agent: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(domain: impl Into<String>, service_account_key: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            skip_tls_verification: false,
            service_account_key: service_account_key.into(),
            user_agent: concat!("zitactl-client/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Base URL of the instance, without trailing slash.
    pub fn base_url(&self) -> String {
        let domain = self.domain.trim().trim_end_matches('/');
        if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{domain}")
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("domain", &self.domain)
            .field("skip_tls_verification", &self.skip_tls_verification)
            .field("service_account_key", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Connect error body.
#[derive(Debug, Deserialize)]
struct ConnectError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Authenticated client for a Zitadel instance.
#[derive(Debug)]
pub struct ZitadelClient {
    http: Client,
    base_url: String,
    tokens: TokenSource,
}

impl ZitadelClient {
    /// Builds a client. Parses the key but does not contact the server.
    pub fn new(config: ClientConfig) -> ZitadelResult<Self> {
        let key = ServiceAccountKey::from_json(&config.service_account_key)?;
        let base_url = config.base_url();

        let host = base_url
            .strip_prefix("https://")
            .or_else(|| base_url.strip_prefix("http://"))
            .unwrap_or(&base_url);
        if host.is_empty() {
            return Err(ZitadelError::Config("domain is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.skip_tls_verification)
            .build()
            .map_err(|e| ZitadelError::Config(format!("failed to create HTTP client: {e}")))?;

        let tokens = TokenSource::new(http.clone(), base_url.clone(), key);

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenSource {
        &self.tokens
    }

    /// Invokes a unary RPC, e.g. `zitadel.project.v2beta.ProjectService/GetProject`.
    pub async fn unary<Req, Resp>(&self, procedure: &str, request: &Req) -> ZitadelResult<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let access_token = self.tokens.access_token().await?;

        debug!(procedure, "calling Zitadel");

        let response = self
            .http
            .post(format!("{}/{}", self.base_url, procedure))
            .bearer_auth(&access_token)
            .header("Connect-Protocol-Version", "1")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            if status.as_u16() == 401 {
                self.tokens.invalidate().await;
            }
            return Err(status_error(status.as_u16(), &body));
        }

        trace!(procedure, bytes = body.len(), "Zitadel call succeeded");

        // Empty messages may come back as an empty body.
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_slice(b"{}")?);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

fn status_error(http_status: u16, body: &[u8]) -> ZitadelError {
    let parsed: Option<ConnectError> = serde_json::from_slice(body).ok();
    let (code, message) = match parsed {
        Some(ConnectError {
            code: Some(code),
            message,
        }) => (StatusCode::from_connect(&code), message.unwrap_or_default()),
        Some(ConnectError {
            code: None,
            message: Some(message),
        }) => (StatusCode::from_http(http_status), message),
        _ => (
            StatusCode::from_http(http_status),
            String::from_utf8_lossy(body).trim().to_string(),
        ),
    };
    ZitadelError::Status { code, message }
}
