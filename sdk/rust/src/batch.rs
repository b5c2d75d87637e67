//! Partitioning of datums into API-sized submissions

use std::num::NonZeroUsize;

/// Per-call datum limit of the ingestion API
pub const MAX_DATUMS_PER_CALL: NonZeroUsize = NonZeroUsize::new(20).unwrap();

/// Split `items` into contiguous chunks of at most `size`, preserving order.
///
/// An empty input yields no chunks.
pub fn partition<T>(items: &[T], size: NonZeroUsize) -> Vec<&[T]> {
    items.chunks(size.get()).collect()
}
