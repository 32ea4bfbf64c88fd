//! Ordered map - HashMap with an explicit, index-addressable key order
//!
//! The standard `HashMap` gives no iteration guarantees; this wrapper pairs
//! it with an order vector so keys can be addressed by position and iterated
//! in the sequence they were first inserted.
//!
//! # Example
//! ```
//! use facetmap::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.append("b", 2);
//! map.append("c", 3);
//! map.prepend("a", 1);
//!
//! assert_eq!(map.keys(), &["a", "b", "c"]);
//! assert_eq!(map.get_at(1), Some(&2));
//! ```
//!
//! # Design Notes
//! - Iteration always walks the order vector; the map itself is never
//!   enumerated directly, so key order and enumeration cannot diverge.
//! - Keys may be pre-declared at construction with [`OrderedMap::with_keys`];
//!   such keys hold an unset placeholder until a value is assigned.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Key/value store that preserves and exposes key insertion order
///
/// Replacing an existing key's value never moves the key; positions are
/// fixed at first insertion.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    /// Key → value slot; `None` marks a pre-declared key with no value yet
    map: HashMap<K, Option<V>>,
    /// Keys in insertion order
    order: Vec<K>,
}

impl<K: Hash + Eq + Clone, V> OrderedMap<K, V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Create a map with a pre-declared key order
    ///
    /// Every key is present (`has` reports true) but unset: `get` yields
    /// `None` until a value is assigned via `append` or `prepend`.
    /// Duplicate keys keep their first position.
    pub fn with_keys(keys: impl IntoIterator<Item = K>) -> Self {
        let mut map = Self::new();
        for key in keys {
            if !map.map.contains_key(&key) {
                map.order.push(key.clone());
                map.map.insert(key, None);
            }
        }
        map
    }

    /// Insert a value, placing new keys at the end of the key order
    ///
    /// An existing key keeps its position; only the value is replaced.
    pub fn append(&mut self, key: K, value: V) {
        if !self.map.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.map.insert(key, Some(value));
    }

    /// Insert a value, placing new keys at the front of the key order
    pub fn prepend(&mut self, key: K, value: V) {
        if !self.map.contains_key(&key) {
            self.order.insert(0, key.clone());
        }
        self.map.insert(key, Some(value));
    }

    /// Check whether a key is present (set or pre-declared)
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Get the value for a key
    ///
    /// `None` both for absent keys and for pre-declared keys with no value.
    /// Accepts any borrowed form of the key type, as `HashMap::get` does.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).and_then(|slot| slot.as_ref())
    }

    /// Get a mutable reference to the value for a key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get_mut(key).and_then(|slot| slot.as_mut())
    }

    /// Get the value at a position in the key order
    ///
    /// Out-of-range positions yield `None`, mirroring absent-key lookups.
    pub fn get_at(&self, index: usize) -> Option<&V> {
        self.order.get(index).and_then(|key| self.get(key))
    }

    /// Get the key at a position in the key order
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.order.get(index)
    }

    /// Get the (key, value) pair at a position in the key order
    ///
    /// `None` when the position is out of range or the key is unset.
    pub fn pair_at(&self, index: usize) -> Option<(&K, &V)> {
        let key = self.order.get(index)?;
        let value = self.get(key)?;
        Some((key, value))
    }

    /// Position of a key in the key order
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.order.iter().position(|k| k == key)
    }

    /// The key order itself
    pub fn keys(&self) -> &[K] {
        &self.order
    }

    /// Iterate (key, value) pairs in key order, skipping unset keys
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order
            .iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
    }

    /// Remove a key from both the order and the value store
    ///
    /// Returns whether the key was present.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.order.iter().position(|k| k == key) {
            Some(index) => {
                self.order.remove(index);
                self.map.remove(key);
                true
            }
            None => false,
        }
    }

    /// Remove the key at a position in the key order
    ///
    /// Returns whether the position was valid.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.order.len() {
            return false;
        }
        let key = self.order.remove(index);
        self.map.remove(&key);
        true
    }

    /// Empty the map
    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    /// Number of keys currently present (set or pre-declared)
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the map holds no keys
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K: Hash + Eq + Clone, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.append(key, value);
        }
        map
    }
}
