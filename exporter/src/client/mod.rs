//! Transport clients

mod dry_run;
mod http;

use std::sync::Arc;

use anyhow::{Context, Result};
use cwsink::MetricsClient;

pub use dry_run::DryRunClient;
pub use http::HttpMetricsClient;

use crate::core::config::ClientConfig;

/// Build the client selected by the configuration
pub fn connect(config: &ClientConfig) -> Result<Arc<dyn MetricsClient>> {
    if config.dry_run {
        tracing::info!("Dry run: submissions are printed to stdout");
        return Ok(Arc::new(DryRunClient::stdout()));
    }

    let endpoint = config
        .endpoint_url
        .as_deref()
        .context("client.endpoint_url is required unless dry_run is set")?;
    let client = HttpMetricsClient::new(endpoint, config.timeout)
        .context("Failed to create metrics client")?;
    tracing::debug!(endpoint = client.endpoint(), "Connected metrics client");
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(endpoint_url: Option<&str>, dry_run: bool) -> ClientConfig {
        ClientConfig {
            endpoint_url: endpoint_url.map(str::to_string),
            timeout: Duration::from_secs(5),
            dry_run,
        }
    }

    #[test]
    fn test_connect_selects_client() {
        let endpoint = Some("http://localhost:4566");
        assert_eq!(connect(&config(endpoint, true)).unwrap().name(), "dry-run");
        assert_eq!(connect(&config(endpoint, false)).unwrap().name(), "http");
        assert_eq!(connect(&config(None, true)).unwrap().name(), "dry-run");
    }

    #[test]
    fn test_connect_requires_endpoint() {
        assert!(connect(&config(None, false)).is_err());
    }
}
