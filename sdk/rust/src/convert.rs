//! Field value conversion
//!
//! Maps a scalar field value onto the floating-point domain accepted by the
//! ingestion API. Values outside that domain are rejected, never clamped.

use crate::metric::FieldValue;

/// Smallest strictly positive value the API accepts
pub const MIN_POSITIVE_VALUE: f64 = 8.515920e-109;

/// Largest value the API accepts
pub const MAX_VALUE: f64 = 1.174271e108;

/// Convert a field value to a datum value.
///
/// Returns `None` for unsupported types and for values outside the accepted
/// range. The lower bound only applies to positive values: zero and all
/// negative values pass.
pub fn convert(value: &FieldValue) -> Option<f64> {
    let value = match value {
        FieldValue::Int(v) => *v as f64,
        FieldValue::UInt(v) => *v as f64,
        FieldValue::Float(v) => *v,
        FieldValue::Bool(v) => {
            if *v {
                1.0
            } else {
                0.0
            }
        }
        FieldValue::Timestamp(ts) => ts.timestamp() as f64,
        FieldValue::String(_) => return None,
    };

    in_range(value).then_some(value)
}

fn in_range(value: f64) -> bool {
    if value.is_nan() || value.is_infinite() {
        return false;
    }
    if value > 0.0 && value < MIN_POSITIVE_VALUE {
        return false;
    }
    value <= MAX_VALUE
}
