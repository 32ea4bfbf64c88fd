//! Facet index - fan-out registration and multi-axis querying
//!
//! One [`OrderedMap`] bucket per declared dimension, each mapping a field
//! value to the ids of entries carrying it, plus the flat registration-order
//! entry list. Range queries scan a bucket's first-seen key order, NOT a
//! sorted value order; callers wanting sorted ranges must register entries
//! in the desired order.

use crate::index::error::{QueryError, QueryResult};
use crate::index::query::{Filter, Query};
use crate::ordered::OrderedMap;
use crate::record::Record;
use crate::value::FieldValue;
use std::collections::HashMap;

/// Dimension value → ids of the entries holding it, in registration order
type Bucket = OrderedMap<FieldValue, Vec<usize>>;

/// Multi-dimensional index over a flat collection of entries
///
/// Dimensions are fixed at construction; entries are appended in bulk and
/// never removed or updated.
#[derive(Debug, Clone)]
pub struct FacetIndex<T> {
    /// All registered entries, in registration order
    entries: Vec<T>,
    /// Dimension name → bucket, in declaration order
    dimensions: OrderedMap<String, Bucket>,
}

impl<T: Record> FacetIndex<T> {
    /// Create an index with a fixed set of dimension names
    pub fn new(dimensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut buckets = OrderedMap::new();
        for name in dimensions {
            buckets.append(name.into(), Bucket::new());
        }
        Self {
            entries: Vec::new(),
            dimensions: buckets,
        }
    }

    /// Register a batch of entries
    ///
    /// Each entry is appended to the flat list and fanned out into every
    /// dimension bucket under its field value for that dimension. A value's
    /// position in a bucket's key order is fixed the first time it is seen.
    /// Entries lacking a dimension's field land in no bucket for it.
    pub fn add_entries(&mut self, batch: impl IntoIterator<Item = T>) {
        let before = self.entries.len();
        self.entries.extend(batch);

        let names: Vec<String> = self.dimensions.keys().to_vec();
        for name in &names {
            let Some(bucket) = self.dimensions.get_mut(name) else {
                continue;
            };
            for id in before..self.entries.len() {
                if let Some(value) = self.entries[id].field(name) {
                    if !bucket.has(&value) {
                        bucket.append(value.clone(), Vec::new());
                    }
                    if let Some(ids) = bucket.get_mut(&value) {
                        ids.push(id);
                    }
                }
            }
        }

        tracing::debug!(
            "Registered {} entries across {} dimensions",
            self.entries.len() - before,
            names.len()
        );
    }

    /// The full flat entry list, in registration order
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared dimension names, in declaration order
    pub fn dimensions(&self) -> &[String] {
        self.dimensions.keys()
    }

    /// A dimension's distinct values, in first-seen order
    pub fn values(&self, dimension: &str) -> QueryResult<&[FieldValue]> {
        Ok(self.bucket(dimension)?.keys())
    }

    /// All entries holding exactly this value for the dimension
    ///
    /// An unseen value yields an empty result.
    pub fn entries_with(
        &self,
        dimension: &str,
        value: impl Into<FieldValue>,
    ) -> QueryResult<Vec<&T>> {
        let bucket = self.bucket(dimension)?;
        Ok(self.collect(Self::exact_ids(bucket, &value.into())))
    }

    /// All entries in a contiguous span of the dimension's first-seen value
    /// order, from `start` through `end`, both inclusive
    ///
    /// When `start == end` this is exact lookup. If `start` was never seen
    /// the result is empty; if `end` never follows `start` the span runs to
    /// the end of the key order. This is insertion order, not value order.
    pub fn entries_in_range(
        &self,
        dimension: &str,
        start: impl Into<FieldValue>,
        end: impl Into<FieldValue>,
    ) -> QueryResult<Vec<&T>> {
        let bucket = self.bucket(dimension)?;
        Ok(self.collect(Self::range_ids(bucket, &start.into(), &end.into())))
    }

    /// Entries satisfying every filter of the query
    ///
    /// Computed by occurrence counting: each queried dimension contributes
    /// one candidate id list; ids appearing in all of them match. The result
    /// is in registration order. An empty query matches nothing.
    pub fn subset(&self, query: &Query) -> QueryResult<Vec<&T>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut appearances: HashMap<usize, usize> = HashMap::new();
        for (dimension, filter) in query.filters() {
            let bucket = self.bucket(dimension)?;
            let ids = match filter {
                Filter::Exact(value) => Self::exact_ids(bucket, value),
                Filter::Range(start, end) => Self::range_ids(bucket, start, end),
            };
            for id in ids {
                *appearances.entry(id).or_insert(0) += 1;
            }
        }

        let mut matched: Vec<usize> = appearances
            .into_iter()
            .filter(|(_, count)| *count == query.len())
            .map(|(id, _)| id)
            .collect();
        matched.sort_unstable();

        tracing::debug!(
            "Subset over {} dimensions matched {} of {} entries",
            query.len(),
            matched.len(),
            self.entries.len()
        );

        Ok(self.collect(matched))
    }

    fn bucket(&self, dimension: &str) -> QueryResult<&Bucket> {
        self.dimensions
            .get(dimension)
            .ok_or_else(|| QueryError::UnknownDimension(dimension.to_string()))
    }

    fn exact_ids(bucket: &Bucket, value: &FieldValue) -> Vec<usize> {
        bucket.get(value).cloned().unwrap_or_default()
    }

    /// Single scan over the bucket's key order; accumulation starts at the
    /// key equal to `start` and stops after the key equal to `end`
    fn range_ids(bucket: &Bucket, start: &FieldValue, end: &FieldValue) -> Vec<usize> {
        if start == end {
            return Self::exact_ids(bucket, start);
        }

        let mut within = false;
        let mut ids = Vec::new();
        for (value, bucket_ids) in bucket.iter() {
            if within {
                ids.extend_from_slice(bucket_ids);
                if value == end {
                    break;
                }
            } else if value == start {
                within = true;
                ids.extend_from_slice(bucket_ids);
            }
        }
        ids
    }

    fn collect(&self, ids: Vec<usize>) -> Vec<&T> {
        ids.into_iter().map(|id| &self.entries[id]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sales_index() -> FacetIndex<Value> {
        let mut index = FacetIndex::new(["region", "month"]);
        index.add_entries([
            json!({"region": "east", "month": 1, "sales": 10}),
            json!({"region": "east", "month": 2, "sales": 20}),
            json!({"region": "west", "month": 1, "sales": 5}),
        ]);
        index
    }

    #[test]
    fn test_registration() {
        let index = sales_index();

        assert_eq!(index.len(), 3);
        assert_eq!(index.entries().len(), 3);
        assert_eq!(index.dimensions(), &["region", "month"]);
    }

    #[test]
    fn test_fan_out_invariant() {
        let index = sales_index();

        // Every entry appears exactly once per dimension, in the bucket
        // keyed by its own value for that dimension
        for dimension in ["region", "month"] {
            let mut seen = 0;
            for value in index.values(dimension).unwrap().to_vec() {
                let entries = index.entries_with(dimension, value.clone()).unwrap();
                for entry in &entries {
                    assert_eq!(entry.field(dimension), Some(value.clone()));
                }
                seen += entries.len();
            }
            assert_eq!(seen, index.len());
        }
    }

    #[test]
    fn test_values_first_seen_order() {
        let index = sales_index();

        assert_eq!(
            index.values("region").unwrap(),
            &[FieldValue::from("east"), FieldValue::from("west")]
        );
        assert_eq!(
            index.values("month").unwrap(),
            &[FieldValue::Int(1), FieldValue::Int(2)]
        );
    }

    #[test]
    fn test_exact_lookup() {
        let index = sales_index();

        let east = index.entries_with("region", "east").unwrap();
        assert_eq!(east.len(), 2);
        assert_eq!(east[0]["sales"], 10);
        assert_eq!(east[1]["sales"], 20);

        assert!(index.entries_with("region", "north").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_dimension() {
        let index = sales_index();

        let err = index.entries_with("country", "us").unwrap_err();
        assert!(matches!(err, QueryError::UnknownDimension(ref name) if name == "country"));
        assert!(index.values("country").is_err());
        assert!(index.entries_in_range("country", 1, 2).is_err());
        assert!(index.subset(&Query::new().with("country", "us")).is_err());
    }

    #[test]
    fn test_range_is_insertion_order() {
        // Values registered out of numeric order; the range follows
        // first-seen order, not value order
        let mut index = FacetIndex::new(["month"]);
        index.add_entries([
            json!({"month": 3, "sales": 1}),
            json!({"month": 1, "sales": 2}),
            json!({"month": 4, "sales": 3}),
            json!({"month": 2, "sales": 4}),
        ]);

        // Key order is [3, 1, 4, 2]; the span 1..=4 covers 1 and 4 only
        let span = index.entries_in_range("month", 1, 4).unwrap();
        let sales: Vec<_> = span.iter().map(|e| e["sales"].as_i64().unwrap()).collect();
        assert_eq!(sales, vec![2, 3]);
    }

    #[test]
    fn test_range_inclusivity() {
        let mut index = FacetIndex::new(["grade"]);
        index.add_entries([
            json!({"grade": "a", "n": 1}),
            json!({"grade": "b", "n": 2}),
            json!({"grade": "c", "n": 3}),
            json!({"grade": "d", "n": 4}),
        ]);

        let span = index.entries_in_range("grade", "b", "d").unwrap();
        let grades: Vec<_> = span.iter().map(|e| e["grade"].as_str().unwrap()).collect();
        assert_eq!(grades, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_degenerate_range_equals_exact() {
        let index = sales_index();

        let range = index.entries_in_range("month", 1, 1).unwrap();
        let exact = index.entries_with("month", 1).unwrap();
        assert_eq!(range.len(), exact.len());
        for (a, b) in range.iter().zip(exact.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_range_start_never_seen() {
        let index = sales_index();
        assert!(index.entries_in_range("month", 7, 9).unwrap().is_empty());
    }

    #[test]
    fn test_range_end_never_seen_runs_to_end() {
        let mut index = FacetIndex::new(["month"]);
        index.add_entries([
            json!({"month": 1, "n": 1}),
            json!({"month": 2, "n": 2}),
            json!({"month": 3, "n": 3}),
        ]);

        let span = index.entries_in_range("month", 2, 99).unwrap();
        assert_eq!(span.len(), 2);
        assert_eq!(span[0]["month"], 2);
        assert_eq!(span[1]["month"], 3);
    }

    #[test]
    fn test_subset_exact_matches_bucket() {
        let index = sales_index();

        let via_subset = index.subset(&Query::new().with("region", "east")).unwrap();
        let via_bucket = index.entries_with("region", "east").unwrap();
        assert_eq!(via_subset, via_bucket);
    }

    #[test]
    fn test_subset_intersection() {
        let index = sales_index();

        let result = index
            .subset(&Query::new().with("region", "east").with("month", 1))
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["sales"], 10);
    }

    #[test]
    fn test_subset_with_range() {
        let index = sales_index();

        let result = index
            .subset(&Query::new().with("region", "east").with_range("month", 1, 2))
            .unwrap();
        assert_eq!(result.len(), 2);

        // No duplicates and registration order
        assert_eq!(result[0]["sales"], 10);
        assert_eq!(result[1]["sales"], 20);
    }

    #[test]
    fn test_subset_unseen_value_is_empty() {
        let index = sales_index();

        let result = index
            .subset(&Query::new().with("region", "east").with("month", 99))
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_subset_empty_query_is_empty() {
        let index = sales_index();
        assert!(index.subset(&Query::new()).unwrap().is_empty());
    }

    #[test]
    fn test_entry_without_dimension_field_is_excluded() {
        let mut index = FacetIndex::new(["region", "month"]);
        index.add_entries([
            json!({"region": "east", "month": 1, "sales": 10}),
            json!({"region": "east", "sales": 99}),
        ]);

        // The field-less entry is still in the flat list
        assert_eq!(index.len(), 2);

        // but appears in no month bucket, so month queries exclude it
        let by_month = index.entries_in_range("month", 1, 12).unwrap();
        assert_eq!(by_month.len(), 1);
        let both = index
            .subset(&Query::new().with("region", "east").with("month", 1))
            .unwrap();
        assert_eq!(both.len(), 1);
    }

    #[test]
    fn test_incremental_registration() {
        let mut index = FacetIndex::new(["region"]);
        index.add_entries([json!({"region": "east", "sales": 1})]);
        index.add_entries([
            json!({"region": "west", "sales": 2}),
            json!({"region": "east", "sales": 3}),
        ]);

        assert_eq!(index.len(), 3);
        let east = index.entries_with("region", "east").unwrap();
        assert_eq!(east.len(), 2);
        assert_eq!(east[0]["sales"], 1);
        assert_eq!(east[1]["sales"], 3);

        // Later batches never reorder the value's first-seen position
        assert_eq!(
            index.values("region").unwrap(),
            &[FieldValue::from("east"), FieldValue::from("west")]
        );
    }
}
