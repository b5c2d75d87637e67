//! Field name classification
//!
//! Fields named `<base>_min`, `<base>_max`, `<base>_sum` and `<base>_count` are
//! components of a statistic set for `<base>`. Anything else is a plain value.

use std::fmt;

/// Statistic component a field represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatisticKind {
    None,
    Minimum,
    Maximum,
    Sum,
    Count,
}

impl StatisticKind {
    /// Name suffix used in field names and in independent datum names
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            StatisticKind::None => None,
            StatisticKind::Minimum => Some("min"),
            StatisticKind::Maximum => Some("max"),
            StatisticKind::Sum => Some("sum"),
            StatisticKind::Count => Some("count"),
        }
    }
}

impl fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix().unwrap_or("none"))
    }
}

/// Checked in order; the first matching suffix wins.
const SUFFIXES: [(&str, StatisticKind); 4] = [
    ("_max", StatisticKind::Maximum),
    ("_min", StatisticKind::Minimum),
    ("_sum", StatisticKind::Sum),
    ("_count", StatisticKind::Count),
];

/// Classify a field name, returning its statistic kind and base name.
///
/// Matching is purely syntactic. An unmatched name is returned unchanged with
/// `StatisticKind::None`.
pub fn classify(field_name: &str) -> (StatisticKind, &str) {
    SUFFIXES
        .iter()
        .find_map(|(suffix, kind)| field_name.strip_suffix(*suffix).map(|base| (*kind, base)))
        .unwrap_or((StatisticKind::None, field_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_statistic_suffixes() {
        assert_eq!(classify("latency_max"), (StatisticKind::Maximum, "latency"));
        assert_eq!(classify("latency_min"), (StatisticKind::Minimum, "latency"));
        assert_eq!(classify("latency_sum"), (StatisticKind::Sum, "latency"));
        assert_eq!(classify("latency_count"), (StatisticKind::Count, "latency"));
    }

    #[test]
    fn test_classify_plain_field() {
        assert_eq!(classify("latency"), (StatisticKind::None, "latency"));
        assert_eq!(classify("maximum"), (StatisticKind::None, "maximum"));
        assert_eq!(classify("latency_mean"), (StatisticKind::None, "latency_mean"));
    }

    #[test]
    fn test_classify_strips_only_last_suffix() {
        assert_eq!(classify("a_min_max"), (StatisticKind::Maximum, "a_min"));
        assert_eq!(classify("bytes_sum_count"), (StatisticKind::Count, "bytes_sum"));
    }

    #[test]
    fn test_classify_bare_suffix() {
        assert_eq!(classify("_count"), (StatisticKind::Count, ""));
        assert_eq!(classify("count"), (StatisticKind::None, "count"));
    }

    #[test]
    fn test_statistic_kind_display() {
        assert_eq!(StatisticKind::Minimum.to_string(), "min");
        assert_eq!(StatisticKind::Count.to_string(), "count");
        assert_eq!(StatisticKind::None.to_string(), "none");
    }
}
