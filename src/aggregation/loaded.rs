//! Read-only view over one resolved aggregation payload

use crate::aggregation::{Aggregation, LoadedBucket};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Key bucket aggregations report their entries under.
const BUCKETS_KEY: &str = "buckets";

/// One aggregation's slice of the response, paired with the definition that
/// produced it.
///
/// The payload is read through generic accessors rather than an enumerated
/// result schema: metric outputs (`value`, `value_count`, ...) and any other
/// backend-reported field come out of [`Loaded::attribute`], bucket outputs
/// out of [`Loaded::buckets`]. Views are cheap borrows and recompute on each
/// access; callers that navigate repeatedly should memoize.
#[derive(Debug, Clone, Copy)]
pub struct Loaded<'a> {
    aggregation: &'a Aggregation,
    payload: Option<&'a Map<String, Value>>,
}

impl<'a> Loaded<'a> {
    pub(crate) fn new(aggregation: &'a Aggregation, payload: Option<&'a Map<String, Value>>) -> Self {
        Loaded { aggregation, payload }
    }

    /// The aggregation definition this payload answers.
    pub fn aggregation(&self) -> &'a Aggregation {
        self.aggregation
    }

    /// True when the backend returned nothing under this label.
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    /// True iff the payload carries a bucket list.
    pub fn has_buckets(&self) -> bool {
        self.payload
            .is_some_and(|payload| payload.contains_key(BUCKETS_KEY))
    }

    /// The resolved bucket entries, empty for metric payloads.
    ///
    /// Every bucket carries this view's aggregation so its sub-aggregations
    /// can be resolved against the bucket's own nested payload. Entries that
    /// are not objects are skipped.
    pub fn buckets(&self) -> Vec<LoadedBucket<'a>> {
        let entries = self
            .payload
            .and_then(|payload| payload.get(BUCKETS_KEY))
            .and_then(Value::as_array);

        match entries {
            Some(entries) => entries
                .iter()
                .filter_map(Value::as_object)
                .map(|bucket| LoadedBucket::new(self.aggregation, bucket))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Look up any field the backend reported for this aggregation.
    ///
    /// Fails with [`Error::UnknownAttribute`] when the key is absent; there
    /// is no default value for a field the backend did not return.
    pub fn attribute(&self, name: &str) -> Result<&'a Value> {
        self.payload
            .and_then(|payload| payload.get(name))
            .ok_or_else(|| Error::UnknownAttribute(name.to_string()))
    }
}
