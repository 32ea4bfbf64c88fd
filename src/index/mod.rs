//! Multi-dimensional index over flat record collections
//!
//! Entries are registered once and fanned out into one bucket per declared
//! dimension; queries read the buckets back by exact value, by contiguous
//! range over a dimension's first-seen value order, or by intersecting
//! several dimensions at once. Filtered entry sets collapse into nested
//! rollup trees via [`rollup`].
//!
//! # Architecture
//!
//! ```text
//! Query: region = "east", month in 1..=2
//!        ↓
//! region bucket: "east" → [entry 0, entry 1]
//!        ↓
//! month bucket:  1, 2   → [entry 0, entry 1, entry 2]
//!        ↓
//! Intersect by occurrence count → [entry 0, entry 1]
//! ```
//!
//! Buckets hold entry ids (positions in the flat registration list), never
//! the entries themselves; query results are freshly collected snapshots,
//! not live views into internal storage.

mod error;
mod facet;
mod query;
mod rollup;

pub use error::{QueryError, QueryResult};
pub use facet::FacetIndex;
pub use query::{Filter, Query};
pub use rollup::{rollup, GroupNode};
