//! # cwsink
//!
//! Converts tagged, multi-field metrics into CloudWatch metric datums and
//! submits them in API-sized batches.
//!
//! The conversion core is pure: [`build_metric_datums`] turns one [`Metric`]
//! into datums, [`partition`] splits datums into submissions. Transport is a
//! [`MetricsClient`] supplied by the caller; [`CloudWatchOutput`] wires the two
//! together for a write cycle.
//!
//! ## Field conventions
//!
//! With statistics enabled, fields `<base>_min`, `<base>_max`, `<base>_sum`
//! and `<base>_count` are folded into a single statistic-set datum when all
//! four are present, and written as independent datums otherwise.

pub mod accumulator;
pub mod aggregate;
pub mod batch;
pub mod client;
pub mod convert;
pub mod datum;
pub mod dimension;
pub mod error;
pub mod field;
pub mod metric;
pub mod output;

pub use aggregate::{DatumOptions, build_datums, build_metric_datums};
pub use batch::{MAX_DATUMS_PER_CALL, partition};
pub use client::{MetricsClient, PutMetricDataRequest};
pub use datum::{Datum, DatumValue, Dimension, MAX_DIMENSIONS, StatisticSet, StorageResolution};
pub use error::{OutputError, TransportError};
pub use field::StatisticKind;
pub use metric::{FieldValue, Metric};
pub use output::{CloudWatchOutput, OutputConfig, WriteSummary};
