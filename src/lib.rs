//! Client-side Elasticsearch aggregation DSL.
//!
//! This crate lets a caller describe a tree of aggregations (metric and
//! bucket operators, arbitrarily nested) declaratively, compile that tree
//! into the nested `aggs` fragment an ES request body expects, and walk the
//! backend's nested `aggregations` response back into views that mirror the
//! original tree.
//!
//! # Building aggregations
//!
//! ```
//! use esaggs::Aggregation;
//!
//! let agg = Aggregation::of("terms")
//!     .bind("purchase_type")
//!     .with_child(Aggregation::of("sum").bind("purchase_price"));
//! assert_eq!(agg.label(), Some("terms_purchase_type"));
//! ```
//!
//! # Compiling and resolving
//!
//! - [`QueryResolver`] turns a slice of aggregations into the request
//!   fragment, keyed by label.
//! - [`resolve`] pairs the same slice against the response's label-keyed
//!   payloads and yields [`Loaded`] views; bucket entries re-resolve their
//!   own nested payloads through [`LoadedBucket::aggregations`].
//!
//! Labels are the sole correlation key between request and response. They
//! default to `"<operator>_<field>"` and must be unique among siblings
//! compiled into one request; a collision is last-write-wins, not an error.
//!
//! Submitting the compiled request belongs to the [`transport`] boundary;
//! the outer query DSL, pagination, and the HTTP client itself live outside
//! this crate.

pub mod aggregation;
pub mod error;
pub mod transport;

pub use aggregation::{resolve, Aggregation, ChildCandidate, Loaded, LoadedBucket, QueryResolver};
pub use error::{Error, Result};
pub use transport::SearchTransport;
