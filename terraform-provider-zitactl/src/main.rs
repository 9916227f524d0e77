//! terraform-provider-zitactl
//!
//! Started by Terraform, never by hand. Logs go to stderr, which Terraform
//! captures; set `ZITACTL_LOG` (e.g. `debug`) to change the filter.

use anyhow::Result;
use terraform_provider_zitactl::{PROVIDER_NAME, ZitactlProvider};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ZITACTL_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tf_provider::serve(PROVIDER_NAME, ZitactlProvider::default()).await
}
