//! Error types for aggregation compilation and resolution

use serde_json::Value;
use thiserror::Error;

/// Boxed error produced by a [`crate::transport::SearchTransport`]
/// implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    /// A resolved payload was asked for a key it does not contain.
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    /// An aggregation reached the compiler without a bound field.
    #[error("Unbound aggregation: {0}")]
    Unbound(String),

    /// A bucket entry carried a `doc_count` that is not an integer.
    #[error("Malformed bucket: {0}")]
    MalformedBucket(String),

    /// A search round-trip failed. Carries the request body that was
    /// attempted so callers can log or replay it.
    #[error("Search request failed: {source}")]
    Search {
        #[source]
        source: BoxError,
        request: Value,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
