//! Write driver
//!
//! One `write` call is one write cycle: every metric is converted first, the
//! combined datum list is partitioned, then partitions are submitted in order.
//! The first failed submission ends the cycle. Partitions sent before it have
//! already been accepted remotely.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::aggregate::{DatumOptions, build_datums};
use crate::batch::{MAX_DATUMS_PER_CALL, partition};
use crate::client::MetricsClient;
use crate::error::OutputError;
use crate::metric::Metric;

/// Output settings supplied by the configuration loader
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Namespace every datum of a call is written under
    pub namespace: String,
    #[serde(default)]
    pub high_resolution_metrics: bool,
    #[serde(default)]
    pub write_statistics: bool,
}

impl OutputConfig {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            high_resolution_metrics: false,
            write_statistics: false,
        }
    }

    pub fn validate(&self) -> Result<(), OutputError> {
        if self.namespace.trim().is_empty() {
            return Err(OutputError::InvalidConfig(
                "namespace must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn datum_options(&self) -> DatumOptions {
        DatumOptions {
            write_statistics: self.write_statistics,
            high_resolution: self.high_resolution_metrics,
        }
    }
}

/// Totals for a successful write cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub metrics: usize,
    pub datums: usize,
    pub partitions: usize,
}

impl WriteSummary {
    pub fn add(&mut self, other: WriteSummary) {
        self.metrics += other.metrics;
        self.datums += other.datums;
        self.partitions += other.partitions;
    }
}

/// Converts metrics to datums and submits them through a `MetricsClient`
pub struct CloudWatchOutput {
    config: OutputConfig,
    client: Arc<dyn MetricsClient>,
}

impl CloudWatchOutput {
    pub fn new(config: OutputConfig, client: Arc<dyn MetricsClient>) -> Result<Self, OutputError> {
        config.validate()?;
        tracing::debug!(
            namespace = %config.namespace,
            client = client.name(),
            write_statistics = config.write_statistics,
            high_resolution = config.high_resolution_metrics,
            "Output initialized"
        );
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Run one write cycle over `metrics`
    pub async fn write(&self, metrics: &[Metric]) -> Result<WriteSummary, OutputError> {
        let datums = build_datums(metrics, self.config.datum_options());
        let partitions = partition(&datums, MAX_DATUMS_PER_CALL);
        let total = partitions.len();

        tracing::debug!(
            metrics = metrics.len(),
            datums = datums.len(),
            partitions = total,
            "Built datums for write cycle"
        );

        for (index, chunk) in partitions.into_iter().enumerate() {
            tracing::debug!(
                partition = index + 1,
                partitions = total,
                datums = chunk.len(),
                "Submitting partition"
            );

            if let Err(e) = self
                .client
                .put_metric_data(&self.config.namespace, chunk)
                .await
            {
                tracing::error!(
                    error = %e,
                    namespace = %self.config.namespace,
                    partition = index + 1,
                    partitions = total,
                    "Unable to write to CloudWatch"
                );
                return Err(OutputError::Transport {
                    partition: index + 1,
                    partitions: total,
                    source: e,
                });
            }
        }

        Ok(WriteSummary {
            metrics: metrics.len(),
            datums: datums.len(),
            partitions: total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::DateTime;
    use parking_lot::Mutex;

    use crate::datum::Datum;
    use crate::error::TransportError;

    /// Records submissions; fails the call with the given 1-based index
    #[derive(Default)]
    struct RecordingClient {
        calls: Mutex<Vec<(String, Vec<String>)>>,
        fail_on: Option<usize>,
    }

    #[async_trait]
    impl MetricsClient for RecordingClient {
        async fn put_metric_data(
            &self,
            namespace: &str,
            datums: &[Datum],
        ) -> Result<(), TransportError> {
            let mut calls = self.calls.lock();
            if self.fail_on == Some(calls.len() + 1) {
                return Err(TransportError::Http {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            calls.push((
                namespace.to_string(),
                datums.iter().map(|d| d.metric_name.clone()).collect(),
            ));
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn metrics(count: usize) -> Vec<Metric> {
        (0..count)
            .map(|i| Metric::named(format!("m{}", i), DateTime::UNIX_EPOCH).with_field("value", 1.0))
            .collect()
    }

    #[test]
    fn test_output_config_deserialize_defaults() {
        let config: OutputConfig = serde_json::from_str(r#"{"namespace": "App"}"#).unwrap();
        assert_eq!(config, OutputConfig::new("App"));
        assert_eq!(config.datum_options(), DatumOptions::default());
    }

    #[test]
    fn test_empty_namespace_rejected() {
        let client = Arc::new(RecordingClient::default());
        let result = CloudWatchOutput::new(OutputConfig::new("  "), client);
        assert!(matches!(result, Err(OutputError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_write_partitions_in_order() {
        let client = Arc::new(RecordingClient::default());
        let output = CloudWatchOutput::new(OutputConfig::new("App"), client.clone()).unwrap();

        let summary = output.write(&metrics(45)).await.unwrap();

        assert_eq!(
            summary,
            WriteSummary {
                metrics: 45,
                datums: 45,
                partitions: 3
            }
        );
        let calls = client.calls.lock();
        let sizes: Vec<_> = calls.iter().map(|(_, names)| names.len()).collect();
        assert_eq!(sizes, vec![20, 20, 5]);
        assert!(calls.iter().all(|(ns, _)| ns == "App"));
        assert_eq!(calls[0].1[0], "m0_value");
        assert_eq!(calls[2].1[4], "m44_value");
    }

    #[tokio::test]
    async fn test_write_nothing_makes_no_calls() {
        let client = Arc::new(RecordingClient::default());
        let output = CloudWatchOutput::new(OutputConfig::new("App"), client.clone()).unwrap();

        let summary = output.write(&[]).await.unwrap();

        assert_eq!(summary, WriteSummary::default());
        assert!(client.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_write_stops_at_first_failure() {
        let client = Arc::new(RecordingClient {
            fail_on: Some(2),
            ..Default::default()
        });
        let output = CloudWatchOutput::new(OutputConfig::new("App"), client.clone()).unwrap();

        let err = output.write(&metrics(65)).await.unwrap_err();

        match err {
            OutputError::Transport {
                partition,
                partitions,
                ..
            } => {
                assert_eq!(partition, 2);
                assert_eq!(partitions, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
        // First partition already went out; third and fourth were never tried.
        assert_eq!(client.calls.lock().len(), 1);
    }

    #[test]
    fn test_summary_add() {
        let mut total = WriteSummary::default();
        total.add(WriteSummary {
            metrics: 2,
            datums: 5,
            partitions: 1,
        });
        total.add(WriteSummary {
            metrics: 1,
            datums: 21,
            partitions: 2,
        });
        assert_eq!(
            total,
            WriteSummary {
                metrics: 3,
                datums: 26,
                partitions: 3
            }
        );
    }
}
