//! Client that prints submissions instead of sending them

use std::io::{self, Write};

use async_trait::async_trait;
use cwsink::{Datum, MetricsClient, PutMetricDataRequest, TransportError};
use parking_lot::Mutex;

/// Writes each submission body as one JSON line
pub struct DryRunClient {
    out: Mutex<Box<dyn Write + Send>>,
}

impl DryRunClient {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }
}

#[async_trait]
impl MetricsClient for DryRunClient {
    async fn put_metric_data(
        &self,
        namespace: &str,
        datums: &[Datum],
    ) -> Result<(), TransportError> {
        let body = PutMetricDataRequest::new(namespace, datums).to_json()?;
        let mut out = self.out.lock();
        writeln!(out, "{}", body).map_err(|e| TransportError::Request(e.to_string()))?;
        out.flush()
            .map_err(|e| TransportError::Request(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}
