//! Read-only view over one bucket entry

use crate::aggregation::{resolve, Aggregation, Loaded};
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;

const KEY_KEY: &str = "key";
const DOC_COUNT_KEY: &str = "doc_count";

/// One entry of a bucket aggregation's bucket list.
///
/// Carries the owning aggregation so the same child definitions can be
/// resolved against this bucket's own nested payload. That re-entry into
/// [`resolve`] is what makes aggregation depth unbounded.
#[derive(Debug, Clone, Copy)]
pub struct LoadedBucket<'a> {
    aggregation: &'a Aggregation,
    payload: &'a Map<String, Value>,
}

impl<'a> LoadedBucket<'a> {
    pub(crate) fn new(aggregation: &'a Aggregation, payload: &'a Map<String, Value>) -> Self {
        LoadedBucket { aggregation, payload }
    }

    /// The bucket key, present in every well-formed bucket entry.
    pub fn key(&self) -> Result<&'a Value> {
        self.attribute(KEY_KEY)
    }

    /// Number of documents that fell into this bucket.
    pub fn doc_count(&self) -> Result<u64> {
        let value = self.attribute(DOC_COUNT_KEY)?;
        value.as_u64().ok_or_else(|| {
            Error::MalformedBucket(format!("doc_count is not an integer: {value}"))
        })
    }

    /// Resolve the owning aggregation's children against this bucket's own
    /// payload. Recomputed on each access.
    pub fn aggregations(&self) -> HashMap<String, Loaded<'a>> {
        resolve(self.aggregation.children(), self.payload)
    }

    /// Look up any other field the backend reported for this bucket, such
    /// as `key_as_string` or `from`/`to` on range buckets.
    pub fn attribute(&self, name: &str) -> Result<&'a Value> {
        self.payload
            .get(name)
            .ok_or_else(|| Error::UnknownAttribute(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("response fixtures must be objects"),
        }
    }

    fn terms_with_sum() -> [Aggregation; 1] {
        [Aggregation::of("terms")
            .bind("purchase_type")
            .with_child(Aggregation::of("sum").bind("purchase_price"))]
    }

    fn purchases_response() -> Map<String, Value> {
        response(json!({
            "terms_purchase_type": {
                "buckets": [
                    {
                        "key": "credit",
                        "doc_count": 2,
                        "sum_purchase_price": {"value": 300.0},
                    },
                    {
                        "key": "cash",
                        "doc_count": 3,
                        "sum_purchase_price": {"value": 200.0},
                    },
                ]
            }
        }))
    }

    #[test]
    fn test_key_and_doc_count() {
        let aggs = terms_with_sum();
        let response = purchases_response();
        let resolved = resolve(&aggs, &response);

        let buckets = resolved["terms_purchase_type"].buckets();
        assert_eq!(buckets[0].key().unwrap(), &json!("credit"));
        assert_eq!(buckets[0].doc_count().unwrap(), 2);
        assert_eq!(buckets[1].key().unwrap(), &json!("cash"));
        assert_eq!(buckets[1].doc_count().unwrap(), 3);
    }

    #[test]
    fn test_sub_aggregations_resolve_against_bucket_payload() {
        let aggs = terms_with_sum();
        let response = purchases_response();
        let resolved = resolve(&aggs, &response);

        let buckets = resolved["terms_purchase_type"].buckets();
        let credit = buckets[0].aggregations();
        let cash = buckets[1].aggregations();

        assert_eq!(credit.len(), 1);
        assert_eq!(credit["sum_purchase_price"].attribute("value").unwrap(), 300.0);
        assert_eq!(cash["sum_purchase_price"].attribute("value").unwrap(), 200.0);
    }

    #[test]
    fn test_sub_aggregations_recurse_through_nested_buckets() {
        let aggs = [Aggregation::of("terms").bind("region").with_child(
            Aggregation::of("terms")
                .bind("type")
                .with_child(Aggregation::of("max").bind("price")),
        )];
        let response = response(json!({
            "terms_region": {
                "buckets": [{
                    "key": "eu",
                    "doc_count": 4,
                    "terms_type": {
                        "buckets": [{
                            "key": "cash",
                            "doc_count": 4,
                            "max_price": {"value": 99.0},
                        }]
                    }
                }]
            }
        }));
        let resolved = resolve(&aggs, &response);

        let regions = resolved["terms_region"].buckets();
        let types = regions[0].aggregations()["terms_type"].buckets();
        let max = types[0].aggregations();
        assert_eq!(max["max_price"].attribute("value").unwrap(), 99.0);
    }

    #[test]
    fn test_missing_child_payload_resolves_to_empty_view() {
        let aggs = terms_with_sum();
        let response = response(json!({
            "terms_purchase_type": {
                "buckets": [{"key": "credit", "doc_count": 2}]
            }
        }));
        let resolved = resolve(&aggs, &response);

        let buckets = resolved["terms_purchase_type"].buckets();
        let children = buckets[0].aggregations();
        assert_eq!(children.len(), 1);
        assert!(children["sum_purchase_price"].attribute("value").is_err());
    }

    #[test]
    fn test_attribute_reads_extra_bucket_fields() {
        let aggs = [Aggregation::of("range").bind("price")];
        let response = response(json!({
            "range_price": {
                "buckets": [{"key": "*-100.0", "doc_count": 2, "to": 100.0}]
            }
        }));
        let resolved = resolve(&aggs, &response);

        let buckets = resolved["range_price"].buckets();
        assert_eq!(buckets[0].attribute("to").unwrap(), 100.0);
        assert!(matches!(
            buckets[0].attribute("from").unwrap_err(),
            Error::UnknownAttribute(ref name) if name == "from"
        ));
    }

    #[test]
    fn test_malformed_doc_count() {
        let aggs = [Aggregation::of("terms").bind("type")];
        let response = response(json!({
            "terms_type": {
                "buckets": [{"key": "credit", "doc_count": "two"}]
            }
        }));
        let resolved = resolve(&aggs, &response);

        let buckets = resolved["terms_type"].buckets();
        assert!(matches!(
            buckets[0].doc_count().unwrap_err(),
            Error::MalformedBucket(_)
        ));
    }

    #[test]
    fn test_missing_doc_count_is_unknown_attribute() {
        let aggs = [Aggregation::of("terms").bind("type")];
        let response = response(json!({
            "terms_type": {"buckets": [{"key": "credit"}]}
        }));
        let resolved = resolve(&aggs, &response);

        let buckets = resolved["terms_type"].buckets();
        assert!(matches!(
            buckets[0].doc_count().unwrap_err(),
            Error::UnknownAttribute(ref name) if name == "doc_count"
        ));
    }
}
