//! # facetmap
//!
//! In-memory multi-dimensional indexing and rollup aggregation for flat
//! record collections.
//!
//! ## Features
//!
//! - **Fan-out registration**: entries are bucketed once per declared
//!   dimension at registration time; lookups never rescan the collection
//! - **Insertion-order ranges**: range queries span a dimension's
//!   first-seen value order, giving callers full control over range shape
//! - **Intersection queries**: combine exact and range filters over any
//!   number of dimensions
//! - **Rollup trees**: collapse a filtered entry set into a nested grouping
//!   tree summing a numeric measure
//! - **Ordered maps**: the underlying ordered-key dictionary is exposed as
//!   a reusable primitive
//!
//! ## Modules
//!
//! - [`ordered`]: the ordered-key dictionary primitive
//! - [`index`]: the multi-dimensional index, queries, and rollup trees
//! - [`record`]: the trait entries implement to expose their fields
//! - [`value`]: the scalar key type for dimension and grouping values
//!
//! ## Quick Start
//!
//! ```rust
//! use facetmap::{rollup, FacetIndex, FieldValue, Query};
//! use serde_json::json;
//!
//! let mut index = FacetIndex::new(["region", "month"]);
//! index.add_entries([
//!     json!({"region": "east", "month": 1, "sales": 10}),
//!     json!({"region": "east", "month": 2, "sales": 20}),
//!     json!({"region": "west", "month": 1, "sales": 5}),
//! ]);
//!
//! // Exact lookup
//! let east = index.entries_with("region", "east")?;
//! assert_eq!(east.len(), 2);
//!
//! // Intersection of several dimensions
//! let east_jan = index.subset(&Query::new().with("region", "east").with("month", 1))?;
//! assert_eq!(east_jan.len(), 1);
//!
//! // Rollup: region → month → summed sales
//! let tree = rollup(east, "sales", &["region", "month"]);
//! assert_eq!(tree.total(), 30.0);
//! # Ok::<(), facetmap::QueryError>(())
//! ```

pub mod index;
pub mod ordered;
pub mod record;
pub mod value;

// Re-export top-level types for convenience
pub use index::{rollup, FacetIndex, Filter, GroupNode, Query, QueryError, QueryResult};
pub use ordered::OrderedMap;
pub use record::Record;
pub use value::FieldValue;
