//! Output datum model
//!
//! Serializes to the shape the metrics ingestion API expects for one entry of
//! `MetricData` in a `PutMetricData` call.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Maximum number of dimensions per datum
pub const MAX_DIMENSIONS: usize = 10;

/// Named tag attached to a datum. Both parts are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Pre-aggregated statistics replacing four raw datums
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatisticSet {
    pub minimum: f64,
    pub maximum: f64,
    pub sum: f64,
    pub sample_count: f64,
}

/// Payload of a datum: a plain value or a statistic set, never both
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DatumValue {
    #[serde(rename = "Value")]
    Value(f64),
    #[serde(rename = "StatisticValues")]
    Statistics(StatisticSet),
}

/// Storage granularity hint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageResolution {
    /// One-second resolution
    High,
    /// Sixty-second resolution
    #[default]
    Standard,
}

impl StorageResolution {
    pub fn from_high_resolution(high_resolution: bool) -> Self {
        if high_resolution {
            StorageResolution::High
        } else {
            StorageResolution::Standard
        }
    }

    pub fn as_secs(&self) -> u32 {
        match self {
            StorageResolution::High => 1,
            StorageResolution::Standard => 60,
        }
    }
}

impl Serialize for StorageResolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.as_secs())
    }
}

/// One emitted measurement record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Datum {
    pub metric_name: String,
    pub dimensions: Vec<Dimension>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub value: DatumValue,
    pub storage_resolution: StorageResolution,
}

impl Datum {
    /// Plain value, if this datum is not a statistic set
    pub fn scalar(&self) -> Option<f64> {
        match self.value {
            DatumValue::Value(v) => Some(v),
            DatumValue::Statistics(_) => None,
        }
    }

    /// Statistic set, if this datum carries one
    pub fn statistics(&self) -> Option<&StatisticSet> {
        match &self.value {
            DatumValue::Value(_) => None,
            DatumValue::Statistics(stats) => Some(stats),
        }
    }
}
