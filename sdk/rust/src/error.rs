//! Error types
//!
//! Conversion problems never show up here: unsupported and out-of-range
//! values are dropped during aggregation. Only transport failures and a
//! missing namespace surface to the caller.

use thiserror::Error;

/// Failure reported by a metrics client for one submission
#[derive(Error, Debug)]
pub enum TransportError {
    /// The endpoint answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request could not be sent or the response not read
    #[error("Request failed: {0}")]
    Request(String),

    /// The submission body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Failure of a write cycle
#[derive(Error, Debug)]
pub enum OutputError {
    /// Submission of a partition failed; later partitions were not attempted
    #[error("Failed to write partition {partition} of {partitions}: {source}")]
    Transport {
        partition: usize,
        partitions: usize,
        #[source]
        source: TransportError,
    },

    /// Output configuration is unusable
    #[error("Invalid output configuration: {0}")]
    InvalidConfig(String),
}
