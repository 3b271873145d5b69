//! Compiles aggregation trees into the ES request fragment

use crate::aggregation::Aggregation;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use tracing::trace;

/// Reserved key sub-aggregations nest under in a request body.
const SUB_AGGS_KEY: &str = "aggs";

/// Compiles a forest of [`Aggregation`]s into the fragment the backend's
/// `aggs` request key expects.
///
/// Compilation is pure: one `{ label: { operator: { ...parameters, field },
/// aggs?: ... } }` entry per aggregation, recursing into children. Sibling
/// label collisions are last-write-wins; the caller merges the fragment into
/// the outer search body.
pub struct QueryResolver<'a> {
    aggregations: &'a [Aggregation],
}

impl<'a> QueryResolver<'a> {
    pub fn new(aggregations: &'a [Aggregation]) -> Self {
        QueryResolver { aggregations }
    }

    pub fn is_empty(&self) -> bool {
        self.aggregations.is_empty()
    }

    /// Build the label-keyed request fragment.
    ///
    /// Fails with [`Error::Unbound`] if any aggregation in the tree has no
    /// field bound.
    pub fn to_fragment(&self) -> Result<Map<String, Value>> {
        let mut fragment = Map::new();
        for aggregation in self.aggregations {
            let (label, entry) = Self::compile(aggregation)?;
            trace!(label = %label, operator = %aggregation.operator(), "compiled aggregation");
            fragment.insert(label, entry);
        }
        Ok(fragment)
    }

    fn compile(aggregation: &Aggregation) -> Result<(String, Value)> {
        let field = aggregation
            .field()
            .ok_or_else(|| Error::Unbound(aggregation.operator().to_string()))?;

        // The bound field always wins over a stray `field` parameter.
        let mut body = aggregation.parameters().clone();
        body.insert("field".to_string(), Value::String(field.to_string()));

        let label = match aggregation.label() {
            Some(label) => label.to_string(),
            None => format!("{}_{}", aggregation.operator(), field),
        };

        let mut entry = Map::new();
        entry.insert(aggregation.operator().to_string(), Value::Object(body));

        if !aggregation.children().is_empty() {
            let sub = QueryResolver::new(aggregation.children()).to_fragment()?;
            entry.insert(SUB_AGGS_KEY.to_string(), Value::Object(sub));
        }

        Ok((label, Value::Object(entry)))
    }
}
