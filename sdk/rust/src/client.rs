//! Transport seam
//!
//! The write driver hands each partition to a `MetricsClient`. Implementations
//! own credentials, endpoints and timeouts; none of that leaks into the core.

use async_trait::async_trait;
use serde::Serialize;

use crate::datum::Datum;
use crate::error::TransportError;

/// Body of one submission to the ingestion API
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutMetricDataRequest<'a> {
    pub namespace: &'a str,
    pub metric_data: &'a [Datum],
}

impl<'a> PutMetricDataRequest<'a> {
    pub fn new(namespace: &'a str, metric_data: &'a [Datum]) -> Self {
        Self {
            namespace,
            metric_data,
        }
    }

    pub fn to_json(&self) -> Result<String, TransportError> {
        serde_json::to_string(self).map_err(|e| TransportError::Serialization(e.to_string()))
    }
}

/// Submits one partition of datums under a namespace
#[async_trait]
pub trait MetricsClient: Send + Sync {
    async fn put_metric_data(
        &self,
        namespace: &str,
        datums: &[Datum],
    ) -> Result<(), TransportError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
