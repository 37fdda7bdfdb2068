//! Unordered set of hashable values
//!
//! A thin set over `HashMap<T, ()>`. Inserting a value already present is a no-op and
//! iteration follows hash order.

use std::collections::hash_map::{self, HashMap};
use std::hash::Hash;

/// Set of distinct values keyed by the values themselves
#[derive(Debug, Clone)]
pub struct KeyedSet<T> {
    map: HashMap<T, ()>,
}

impl<T> Default for KeyedSet<T> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<T: Hash + Eq> KeyedSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a value, returning false if it was already present
    pub fn insert(&mut self, item: T) -> bool {
        match self.map.entry(item) {
            hash_map::Entry::Occupied(_) => false,
            hash_map::Entry::Vacant(slot) => {
                slot.insert(());
                true
            }
        }
    }

    /// Remove a value, returning whether it was present
    pub fn remove(&mut self, item: &T) -> bool {
        self.map.remove(item).is_some()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.map.contains_key(item)
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove every value
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterate over the values in hash order
    pub fn values(&self) -> Values<'_, T> {
        Values {
            inner: self.map.keys(),
        }
    }
}

impl<T: Hash + Eq> FromIterator<T> for KeyedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Hash + Eq> Extend<T> for KeyedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

/// Borrowing iterator returned by [`KeyedSet::values`]
pub struct Values<'a, T> {
    inner: hash_map::Keys<'a, T, ()>,
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T: Hash + Eq> IntoIterator for &'a KeyedSet<T> {
    type Item = &'a T;
    type IntoIter = Values<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}

impl<T> IntoIterator for KeyedSet<T> {
    type Item = T;
    type IntoIter = hash_map::IntoKeys<T, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = KeyedSet::new();
        assert!(set.insert("a"));
        assert!(!set.insert("a"));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&"a"));
    }

    #[test]
    fn test_remove() {
        let mut set = KeyedSet::new();
        set.insert(7);
        assert!(set.remove(&7));
        assert!(!set.contains(&7));
        assert!(!set.remove(&7));
        assert!(set.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut set: KeyedSet<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        assert_eq!(set.len(), 3);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.values().count(), 0);
    }

    #[test]
    fn test_values_yield_each_item_once() {
        let set: KeyedSet<u32> = vec![3, 1, 3, 2, 1].into_iter().collect();

        let mut values: Vec<u32> = set.values().copied().collect();
        values.sort();
        assert_eq!(values, vec![1, 2, 3]);

        // Iteration is restartable
        assert_eq!(set.values().count(), 3);
        assert_eq!((&set).into_iter().count(), 3);
    }

    #[test]
    fn test_extend_and_into_iter() {
        let mut set = KeyedSet::with_capacity(4);
        set.extend(["a", "b"]);
        set.extend(["b", "c"]);
        assert_eq!(set.len(), 3);

        let mut owned: Vec<&str> = set.into_iter().collect();
        owned.sort();
        assert_eq!(owned, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_set() {
        let set: KeyedSet<i64> = KeyedSet::default();
        assert!(set.is_empty());
        assert!(!set.contains(&0));
        assert_eq!(set.values().next(), None);
    }
}
