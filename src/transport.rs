//! Search boundary: submitting compiled requests and reading responses
//!
//! The transport itself (HTTP client, connection pooling, retries) lives
//! outside this crate; [`SearchTransport`] is the seam it plugs into. The
//! helpers here cover the two response conventions the aggregation core
//! relies on: the label-keyed `aggregations` map and `hits.total.value`.

use crate::error::{BoxError, Error, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

/// Key the backend reports aggregation results under.
pub const AGGREGATIONS_KEY: &str = "aggregations";

/// Submits a search request body and returns the raw response.
///
/// This is the single suspension point of a round-trip. Implementations own
/// retry, timeout, and cancellation policy; the core propagates their
/// failures unchanged.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn search(&self, request: &Value) -> std::result::Result<Value, BoxError>;
}

/// Issue a search request through `transport`.
///
/// Any transport failure comes back as a single [`Error::Search`] carrying
/// the attempted request body; nothing is retried or suppressed here.
pub async fn execute<T>(transport: &T, request: Value) -> Result<Value>
where
    T: SearchTransport + ?Sized,
{
    debug!("issuing search request");
    match transport.search(&request).await {
        Ok(response) => {
            debug!("search response received");
            Ok(response)
        }
        Err(source) => Err(Error::Search { source, request }),
    }
}

/// The label-keyed aggregation payloads of a search response, if any.
///
/// Feed the result to [`crate::aggregation::resolve`] together with the
/// aggregations the request was compiled from.
pub fn aggregations_in(response: &Value) -> Option<&Map<String, Value>> {
    response.get(AGGREGATIONS_KEY).and_then(Value::as_object)
}

/// Total hit count of a search response (`hits.total.value`).
pub fn total_hits(response: &Value) -> Option<u64> {
    response.get("hits")?.get("total")?.get("value")?.as_u64()
}
