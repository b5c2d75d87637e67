//! HTTP client for the metrics API JSON protocol
//!
//! Requests are sent unsigned: point `endpoint_url` at a local emulator or at
//! a proxy that adds credentials.

use std::time::Duration;

use async_trait::async_trait;
use cwsink::{Datum, MetricsClient, PutMetricDataRequest, TransportError};
use reqwest::header::CONTENT_TYPE;

use crate::core::constants::{API_CONTENT_TYPE, API_TARGET_PUT_METRIC_DATA};

const TARGET_HEADER: &str = "X-Amz-Target";

pub struct HttpMetricsClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMetricsClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!(
            endpoint,
            timeout_secs = timeout.as_secs(),
            "HTTP metrics client initialized"
        );

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MetricsClient for HttpMetricsClient {
    async fn put_metric_data(
        &self,
        namespace: &str,
        datums: &[Datum],
    ) -> Result<(), TransportError> {
        let body = PutMetricDataRequest::new(namespace, datums).to_json()?;

        let response = self
            .client
            .post(format!("{}/", self.endpoint))
            .header(CONTENT_TYPE, API_CONTENT_TYPE)
            .header(TARGET_HEADER, API_TARGET_PUT_METRIC_DATA)
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(
                        error = %e,
                        status = status.as_u16(),
                        "Failed to read error response body"
                    );
                    format!("<unreadable body: {}>", e)
                }
            };
            return Err(TransportError::Http {
                status: status.as_u16(),
                body,
            });
        }

        tracing::trace!(namespace, datums = datums.len(), "PutMetricData accepted");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
