//! Dimension selection from metric tags

use std::collections::BTreeMap;

use crate::datum::{Dimension, MAX_DIMENSIONS};

/// Tag that is always placed first when present
pub const HOST_TAG: &str = "host";

/// Build the dimension list for a metric's tags.
///
/// A non-empty `host` tag comes first, followed by the remaining tags sorted
/// by key. Tags with empty values are skipped and the list is capped at
/// `MAX_DIMENSIONS` entries, host included.
pub fn build_dimensions(tags: &BTreeMap<String, String>) -> Vec<Dimension> {
    let mut dimensions = Vec::with_capacity(MAX_DIMENSIONS.min(tags.len()));

    if let Some(host) = tags.get(HOST_TAG)
        && !host.is_empty()
    {
        dimensions.push(Dimension::new(HOST_TAG, host.as_str()));
    }

    // BTreeMap iterates keys in ascending order
    for (key, value) in tags {
        if dimensions.len() >= MAX_DIMENSIONS {
            break;
        }
        if key == HOST_TAG || value.is_empty() {
            continue;
        }
        dimensions.push(Dimension::new(key.as_str(), value.as_str()));
    }

    dimensions
}
