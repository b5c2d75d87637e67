//! Metric to datum aggregation
//!
//! Converts and classifies every field of a metric, accumulates statistic
//! components per base field and flattens the accumulators into datums.
//! Pure per metric: nothing is carried between calls.

use std::collections::BTreeMap;

use crate::accumulator::{DatumContext, FieldAccumulator};
use crate::convert::convert;
use crate::datum::{Datum, StorageResolution};
use crate::dimension::build_dimensions;
use crate::field::{StatisticKind, classify};
use crate::metric::Metric;

/// Switches that change how fields become datums
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatumOptions {
    /// Fold `_min`/`_max`/`_sum`/`_count` fields into statistic sets
    pub write_statistics: bool,
    /// Emit one-second storage resolution instead of sixty
    pub high_resolution: bool,
}

/// Build all datums for a single metric.
///
/// Fields that cannot be converted are dropped without error. Raw and
/// statistic accumulators are keyed separately, so a plain `latency` field
/// and `latency_min` .. `latency_count` fields in the same metric both survive.
/// The two resulting datums share the MetricName `<metric>_latency`: one
/// carries the plain value, the other the statistic set.
pub fn build_metric_datums(metric: &Metric, options: DatumOptions) -> Vec<Datum> {
    let mut raw: BTreeMap<&str, FieldAccumulator> = BTreeMap::new();
    let mut statistics: BTreeMap<&str, FieldAccumulator> = BTreeMap::new();

    for (field_name, field_value) in metric.fields() {
        let Some(value) = convert(field_value) else {
            tracing::trace!(
                metric = metric.name(),
                field = %field_name,
                value = %field_value,
                "Dropping field with unsupported or out-of-range value"
            );
            continue;
        };

        let (kind, base_name) = classify(field_name);

        if !options.write_statistics || kind == StatisticKind::None {
            raw.insert(field_name.as_str(), FieldAccumulator::raw(value));
            continue;
        }

        statistics
            .entry(base_name)
            .and_modify(|acc| acc.add_value(kind, value))
            .or_insert_with(|| FieldAccumulator::statistic(kind, value));
    }

    let dimensions = build_dimensions(metric.tags());
    let ctx = DatumContext {
        metric_name: metric.name(),
        dimensions: &dimensions,
        timestamp: metric.timestamp(),
        storage_resolution: StorageResolution::from_high_resolution(options.high_resolution),
    };

    raw.into_iter()
        .chain(statistics)
        .flat_map(|(field_name, acc)| acc.build_datums(field_name, &ctx))
        .collect()
}

/// Build datums for a whole write cycle, preserving metric order.
pub fn build_datums(metrics: &[Metric], options: DatumOptions) -> Vec<Datum> {
    metrics
        .iter()
        .flat_map(|metric| build_metric_datums(metric, options))
        .collect()
}
