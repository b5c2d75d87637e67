//! Metric input
//!
//! Metrics arrive as JSON lines in the agent's JSON metric format:
//!
//! ```text
//! {"name":"cpu","tags":{"host":"h1"},"fields":{"usage_idle":98.5},"timestamp":1704067200}
//! {"metrics":[{"name":"mem", ...}, {"name":"disk", ...}]}
//! ```

mod reader;

use std::collections::BTreeMap;

use cwsink::{FieldValue, Metric};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::utils::time::{parse_rfc3339, seconds_to_datetime};

pub use reader::MetricReader;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid timestamp: {0}")]
    Timestamp(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonTimestamp {
    Seconds(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct JsonMetric {
    name: String,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    #[serde(default)]
    fields: BTreeMap<String, JsonValue>,
    timestamp: JsonTimestamp,
}

/// Parse one input line into zero or more metrics.
///
/// Blank lines yield nothing. A line is either a single metric object or a
/// batch object with a `metrics` array.
pub fn parse_line(line: &str) -> Result<Vec<Metric>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let mut value: JsonValue = serde_json::from_str(line)?;

    if let Some(batch) = value.get_mut("metrics").map(JsonValue::take) {
        let metrics: Vec<JsonMetric> = serde_json::from_value(batch)?;
        return metrics.into_iter().map(into_metric).collect();
    }

    let metric: JsonMetric = serde_json::from_value(value)?;
    Ok(vec![into_metric(metric)?])
}

fn into_metric(raw: JsonMetric) -> Result<Metric, InputError> {
    let timestamp = match raw.timestamp {
        JsonTimestamp::Seconds(secs) => seconds_to_datetime(secs)
            .ok_or_else(|| InputError::Timestamp(secs.to_string()))?,
        JsonTimestamp::Text(text) => {
            parse_rfc3339(&text).ok_or(InputError::Timestamp(text))?
        }
    };

    let fields = raw
        .fields
        .into_iter()
        .filter_map(|(key, value)| match field_value(&value) {
            Some(v) => Some((key, v)),
            None => {
                tracing::trace!(metric = %raw.name, field = %key, "Skipping non-scalar field");
                None
            }
        })
        .collect();

    Ok(Metric::new(raw.name, raw.tags, fields, timestamp))
}

/// Map a JSON scalar onto a field value. Non-scalars have no mapping.
fn field_value(value: &JsonValue) -> Option<FieldValue> {
    match value {
        JsonValue::Bool(b) => Some(FieldValue::Bool(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(FieldValue::Int(i))
            } else if let Some(u) = n.as_u64() {
                Some(FieldValue::UInt(u))
            } else {
                n.as_f64().map(FieldValue::Float)
            }
        }
        JsonValue::String(s) => Some(FieldValue::String(s.clone())),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}
