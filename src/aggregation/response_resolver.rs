//! Pairs aggregation trees with the backend's nested response

use crate::aggregation::{Aggregation, Loaded};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Resolve a label-keyed response against the aggregations that produced it.
///
/// Each aggregation is paired with `response[label]` and wrapped into a
/// [`Loaded`] view. A label the backend did not echo back resolves to an
/// empty view rather than failing sibling resolution; a duplicate sibling
/// label resolves to the later aggregation, mirroring the compiler's
/// last-write-wins fragment.
///
/// Resolution is stateless and recursive: bucket views re-enter this
/// function with their owning aggregation's children against the bucket's
/// own payload, which is what makes nesting depth unbounded.
pub fn resolve<'a>(
    aggregations: &'a [Aggregation],
    response: &'a Map<String, Value>,
) -> HashMap<String, Loaded<'a>> {
    let mut resolved = HashMap::with_capacity(aggregations.len());
    for aggregation in aggregations {
        let Some(label) = aggregation.label() else {
            // Never compiled, so nothing could have come back for it.
            continue;
        };
        let payload = response.get(label).and_then(Value::as_object);
        resolved.insert(label.to_string(), Loaded::new(aggregation, payload));
    }
    resolved
}
