//! Rollup trees - hierarchical aggregation over a filtered entry set
//!
//! [`rollup`] collapses an entry list into a tree keyed progressively by
//! each grouping field, summing a numeric measure at the leaves:
//!
//! ```text
//! rollup(east_entries, "sales", ["region", "month"])
//!        ↓
//! "east" ─┬─ 1 → Leaf { measure: 10, region: "east", month: 1 }
//!         └─ 2 → Leaf { measure: 20, region: "east", month: 2 }
//! ```
//!
//! Branch children keep the first-seen order of their group keys.

use crate::ordered::OrderedMap;
use crate::record::Record;
use crate::value::FieldValue;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One node of a rollup tree
///
/// Depth equals the number of grouping fields: branches for every field but
/// the last, leaves at the last.
#[derive(Debug, Clone)]
pub enum GroupNode {
    /// Intermediate grouping level, keyed by a field's values
    Branch(OrderedMap<FieldValue, GroupNode>),
    /// Deepest level: the summed measure plus a copy of every grouping
    /// field's value for this group
    Leaf {
        /// Name of the measure field the sum was taken over
        measure_name: String,
        /// Accumulated measure across the group's entries
        measure: f64,
        /// (field name, field value) for each grouping field, in order
        fields: Vec<(String, FieldValue)>,
    },
}

impl GroupNode {
    /// The child node for a group key (`None` on leaves and unknown keys)
    pub fn get(&self, key: &FieldValue) -> Option<&GroupNode> {
        match self {
            GroupNode::Branch(children) => children.get(key),
            GroupNode::Leaf { .. } => None,
        }
    }

    /// The summed measure, if this is a leaf
    pub fn measure(&self) -> Option<f64> {
        match self {
            GroupNode::Branch(_) => None,
            GroupNode::Leaf { measure, .. } => Some(*measure),
        }
    }

    /// The captured grouping-field values, if this is a leaf
    pub fn fields(&self) -> Option<&[(String, FieldValue)]> {
        match self {
            GroupNode::Branch(_) => None,
            GroupNode::Leaf { fields, .. } => Some(fields),
        }
    }

    /// Recursive sum of every leaf measure under this node
    pub fn total(&self) -> f64 {
        match self {
            GroupNode::Branch(children) => children.iter().map(|(_, child)| child.total()).sum(),
            GroupNode::Leaf { measure, .. } => *measure,
        }
    }

    /// Iterate child (key, node) pairs in first-seen key order
    ///
    /// Empty on leaves.
    pub fn children(&self) -> impl Iterator<Item = (&FieldValue, &GroupNode)> {
        match self {
            GroupNode::Branch(children) => Some(children.iter()),
            GroupNode::Leaf { .. } => None,
        }
        .into_iter()
        .flatten()
    }

    /// Number of direct children (0 for leaves)
    pub fn len(&self) -> usize {
        match self {
            GroupNode::Branch(children) => children.len(),
            GroupNode::Leaf { .. } => 0,
        }
    }

    /// Check if this node has no children
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Serializes branches as objects in key order and leaves as an object
/// holding the summed measure under the measure field's own name, followed
/// by the captured grouping-field values.
impl Serialize for GroupNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GroupNode::Branch(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, child) in children.iter() {
                    map.serialize_entry(&key.to_string(), child)?;
                }
                map.end()
            }
            GroupNode::Leaf {
                measure_name,
                measure,
                fields,
            } => {
                let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
                map.serialize_entry(measure_name, measure)?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// Collapse an entry list into a rollup tree
///
/// Walks the entries once, descending one tree level per grouping field
/// using the entry's value for that field as the key. First entry of a
/// group creates its leaf seeded with the measure and a copy of every
/// grouping field's value; later entries add their measure to it.
///
/// Empty input yields an empty branch. A missing measure counts as 0.0; an
/// entry lacking one of the grouping fields is skipped. The index itself is
/// untouched; this consumes any entry list, typically a
/// [`subset`](crate::FacetIndex::subset) result.
pub fn rollup<'a, T, I>(entries: I, measure: &str, fields: &[&str]) -> GroupNode
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut root = OrderedMap::new();
    if fields.is_empty() {
        return GroupNode::Branch(root);
    }

    for entry in entries {
        let keys: Option<Vec<FieldValue>> = fields.iter().map(|f| entry.field(f)).collect();
        let Some(keys) = keys else {
            tracing::debug!("Skipping entry missing a grouping field");
            continue;
        };
        let amount = entry.measure(measure).unwrap_or(0.0);

        let mut current = &mut root;
        for (depth, key) in keys.iter().enumerate() {
            let last = depth == fields.len() - 1;

            if !current.has(key) {
                let node = if last {
                    GroupNode::Leaf {
                        measure_name: measure.to_string(),
                        measure: amount,
                        fields: fields
                            .iter()
                            .zip(keys.iter())
                            .map(|(name, value)| (name.to_string(), value.clone()))
                            .collect(),
                    }
                } else {
                    GroupNode::Branch(OrderedMap::new())
                };
                current.append(key.clone(), node);
                if last {
                    break;
                }
            } else if last {
                if let Some(GroupNode::Leaf { measure, .. }) = current.get_mut(key) {
                    *measure += amount;
                }
                break;
            }

            current = match current.get_mut(key) {
                Some(GroupNode::Branch(children)) => children,
                _ => break,
            };
        }
    }

    GroupNode::Branch(root)
}
