//! Per-field accumulators and datum building
//!
//! An accumulator holds what one metric contributed for one field (raw) or one
//! base field (statistic components). It is consumed once to produce datums.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::datum::{Datum, DatumValue, Dimension, StatisticSet, StorageResolution};
use crate::field::StatisticKind;

/// Identity shared by every datum of one metric
#[derive(Debug, Clone, Copy)]
pub struct DatumContext<'a> {
    pub metric_name: &'a str,
    pub dimensions: &'a [Dimension],
    pub timestamp: DateTime<Utc>,
    pub storage_resolution: StorageResolution,
}

impl DatumContext<'_> {
    fn datum(&self, metric_name: String, value: DatumValue) -> Datum {
        Datum {
            metric_name,
            dimensions: self.dimensions.to_vec(),
            timestamp: self.timestamp,
            value,
            storage_resolution: self.storage_resolution,
        }
    }
}

/// Accumulated input for one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldAccumulator {
    Raw(f64),
    Statistic(BTreeMap<StatisticKind, f64>),
}

impl FieldAccumulator {
    pub fn raw(value: f64) -> Self {
        FieldAccumulator::Raw(value)
    }

    pub fn statistic(kind: StatisticKind, value: f64) -> Self {
        let mut acc = FieldAccumulator::Statistic(BTreeMap::new());
        acc.add_value(kind, value);
        acc
    }

    /// Record a value. Raw accumulators only take `StatisticKind::None`,
    /// statistic accumulators only take the four components. A repeated
    /// component overwrites the previous value.
    pub fn add_value(&mut self, kind: StatisticKind, value: f64) {
        match self {
            FieldAccumulator::Raw(current) => {
                if kind == StatisticKind::None {
                    *current = value;
                }
            }
            FieldAccumulator::Statistic(values) => {
                if kind != StatisticKind::None {
                    values.insert(kind, value);
                }
            }
        }
    }

    /// True when all four statistic components are present
    pub fn is_complete(&self) -> bool {
        match self {
            FieldAccumulator::Raw(_) => false,
            FieldAccumulator::Statistic(values) => complete_set(values).is_some(),
        }
    }

    /// Consume the accumulator and emit its datums.
    ///
    /// Raw: one datum named `<metric>_<field>`. Statistic: one statistic-set
    /// datum named `<metric>_<field>` when complete, otherwise one plain datum
    /// per present component named `<metric>_<field>_<kind>`.
    pub fn build_datums(self, field_name: &str, ctx: &DatumContext<'_>) -> Vec<Datum> {
        let base_name = format!("{}_{}", ctx.metric_name, field_name);

        match self {
            FieldAccumulator::Raw(value) => vec![ctx.datum(base_name, DatumValue::Value(value))],
            FieldAccumulator::Statistic(values) => {
                if let Some(stats) = complete_set(&values) {
                    return vec![ctx.datum(base_name, DatumValue::Statistics(stats))];
                }
                values
                    .into_iter()
                    .filter_map(|(kind, value)| {
                        let suffix = kind.suffix()?;
                        Some(ctx.datum(
                            format!("{}_{}", base_name, suffix),
                            DatumValue::Value(value),
                        ))
                    })
                    .collect()
            }
        }
    }
}

fn complete_set(values: &BTreeMap<StatisticKind, f64>) -> Option<StatisticSet> {
    Some(StatisticSet {
        minimum: *values.get(&StatisticKind::Minimum)?,
        maximum: *values.get(&StatisticKind::Maximum)?,
        sum: *values.get(&StatisticKind::Sum)?,
        sample_count: *values.get(&StatisticKind::Count)?,
    })
}
