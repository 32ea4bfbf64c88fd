//! Query types
//!
//! A query names one filter per dimension: an exact value or a `[start, end]`
//! range over the dimension's first-seen value order. Built fluently:
//!
//! ```
//! use facetmap::Query;
//!
//! let query = Query::new()
//!     .with("region", "east")
//!     .with_range("month", 1, 3);
//! ```

use crate::value::FieldValue;

/// Constraint applied to a single dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Match the bucket for exactly this value
    Exact(FieldValue),
    /// Match the contiguous span of first-seen values from start to end,
    /// both inclusive
    Range(FieldValue, FieldValue),
}

/// A multi-dimension query: one filter per queried dimension
///
/// An entry matches when it satisfies every filter. The empty query matches
/// nothing.
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<(String, Filter)>,
}

impl Query {
    /// Start an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact-value filter on a dimension
    pub fn with(mut self, dimension: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filters.push((dimension.into(), Filter::Exact(value.into())));
        self
    }

    /// Add a range filter on a dimension (inclusive on both ends)
    pub fn with_range(
        mut self,
        dimension: impl Into<String>,
        start: impl Into<FieldValue>,
        end: impl Into<FieldValue>,
    ) -> Self {
        self.filters
            .push((dimension.into(), Filter::Range(start.into(), end.into())));
        self
    }

    /// The filters in the order they were added
    pub fn filters(&self) -> &[(String, Filter)] {
        &self.filters
    }

    /// Number of filters
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if no filters were added
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
