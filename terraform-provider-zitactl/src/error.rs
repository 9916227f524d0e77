use thiserror::Error;
use tf_provider::{AttributePath, Diagnostics};
use zitactl_client::ZitadelError;

/// Why the lazy client accessor could not hand out a client.
#[derive(Debug, Error)]
pub enum ClientInfoError {
    #[error("provider is not configured")]
    NotConfigured,

    #[error("provider configuration contains unknown values: {}", .0.join(", "))]
    UnknownValues(Vec<&'static str>),

    #[error("the '{0}' attribute must be set")]
    MissingAttribute(&'static str),

    #[error("failed to create Zitadel client: {0}")]
    Factory(#[source] ZitadelError),
}

impl ClientInfoError {
    /// True when the only problem is provider values Terraform has not
    /// computed yet.
    pub fn is_unknown_configuration(&self) -> bool {
        matches!(self, Self::UnknownValues(_))
    }
}

/// A failed provider operation, shaped like a Terraform diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{summary}: {detail}")]
pub struct ProviderError {
    pub summary: String,
    pub detail: String,
    /// Top-level attribute the error points at, if any.
    pub attribute: Option<String>,
}

pub type ProviderResult<T> = Result<T, ProviderError>;

pub(crate) const CLIENT_CONFIGURATION_SUMMARY: &str = "Client configuration not possible!";

impl ProviderError {
    pub fn new(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    /// Attaches the error to a top-level attribute.
    pub fn at(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn is_client_configuration(&self) -> bool {
        self.summary == CLIENT_CONFIGURATION_SUMMARY
    }
}

impl From<ClientInfoError> for ProviderError {
    fn from(err: ClientInfoError) -> Self {
        Self::new(CLIENT_CONFIGURATION_SUMMARY, err.to_string())
    }
}

/// Adds `err` to `diags` as an error diagnostic.
pub fn report(diags: &mut Diagnostics, err: &ProviderError) {
    match &err.attribute {
        Some(attribute) => diags.error(
            err.summary.clone(),
            err.detail.clone(),
            AttributePath::new(attribute.clone()),
        ),
        None => diags.root_error(err.summary.clone(), err.detail.clone()),
    }
}
