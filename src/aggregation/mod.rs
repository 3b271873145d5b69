//! Aggregation definitions and the compile/resolve pair
//!
//! An [`Aggregation`] names an ES aggregation operator (`sum`, `avg`,
//! `terms`, `range`, ...), the field it targets, an optional parameter bag,
//! and an ordered list of sub-aggregations. The operator is opaque to this
//! crate and never checked against a catalog, so any operator the backend
//! understands can be expressed as name + field + parameters.
//!
//! [`QueryResolver`] compiles a slice of aggregations into the request
//! fragment; [`resolve`] walks the response back against the same slice.

mod loaded;
mod loaded_bucket;
mod query_resolver;
mod response_resolver;

pub use loaded::Loaded;
pub use loaded_bucket::LoadedBucket;
pub use query_resolver::QueryResolver;
pub use response_resolver::resolve;

use serde_json::{Map, Value};

/// A single aggregation definition.
///
/// Built with [`Aggregation::of`] and bound to a target field with
/// [`Aggregation::bind`] before compilation. Binding is what assigns the
/// result label; an unbound aggregation is rejected by the compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    operator: String,
    field: Option<String>,
    parameters: Map<String, Value>,
    label: Option<String>,
    children: Vec<Aggregation>,
}

impl Aggregation {
    /// Idempotent constructor: an operator name yields a fresh unbound
    /// aggregation, while an existing aggregation passes through unchanged.
    pub fn of(source: impl Into<Aggregation>) -> Aggregation {
        source.into()
    }

    /// Bind this aggregation to a target field.
    ///
    /// Sets the label to `"<operator>_<field>"` and clears any previously
    /// set parameters and label: re-binding replaces the whole binding
    /// rather than accumulating onto it. Returns `self` for chaining.
    pub fn bind(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        self.label = Some(format!("{}_{}", self.operator, field));
        self.field = Some(field);
        self.parameters = Map::new();
        self
    }

    /// Override the result label of the current binding.
    ///
    /// The label is kept separate from the parameter bag and never appears
    /// in the compiled operator body.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add one operator parameter to the current binding.
    ///
    /// Parameters must not define `field`; the bound field always wins.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Append a sub-aggregation if `candidate` is one.
    ///
    /// Anything that is not an [`Aggregation`] is silently ignored, so
    /// children lists can be built incrementally from mixed sources without
    /// guarding every call site.
    pub fn append(&mut self, candidate: impl Into<ChildCandidate>) {
        if let ChildCandidate::Node(child) = candidate.into() {
            self.children.push(child);
        }
    }

    /// Chainable form of [`Aggregation::append`] for building trees inline.
    pub fn with_child(mut self, child: Aggregation) -> Self {
        self.children.push(child);
        self
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// The result key this aggregation resolves under, assigned at bind
    /// time. `None` until the aggregation is bound or explicitly labeled.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn children(&self) -> &[Aggregation] {
        &self.children
    }
}

impl From<&str> for Aggregation {
    fn from(operator: &str) -> Self {
        Aggregation::from(operator.to_string())
    }
}

impl From<String> for Aggregation {
    fn from(operator: String) -> Self {
        Aggregation {
            operator,
            field: None,
            parameters: Map::new(),
            label: None,
            children: Vec::new(),
        }
    }
}

/// Candidate value for [`Aggregation::append`].
///
/// Models call sites that assemble children from heterogeneous data:
/// a proper node is appended, any other JSON value is dropped.
#[derive(Debug, Clone)]
pub enum ChildCandidate {
    Node(Aggregation),
    Other(Value),
}

impl From<Aggregation> for ChildCandidate {
    fn from(aggregation: Aggregation) -> Self {
        ChildCandidate::Node(aggregation)
    }
}

impl From<Value> for ChildCandidate {
    fn from(value: Value) -> Self {
        ChildCandidate::Other(value)
    }
}

impl From<&str> for ChildCandidate {
    fn from(value: &str) -> Self {
        ChildCandidate::Other(Value::String(value.to_string()))
    }
}
