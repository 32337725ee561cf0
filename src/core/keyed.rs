//! Identity-keyed associative container.

use super::identity::{Identified, Identity};
use std::collections::hash_map::{Entry, HashMap};
use std::fmt;

/// Associative container keyed by each key's [`Identity`].
///
/// Two keys with the same identity address the same slot, even when they are
/// distinct values. The key itself is stored next to the value so that
/// [`keys`](KeyedMap::keys) returns the original key objects.
///
/// Enumeration order is unspecified.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Event, KeyedMap};
///
/// let mut map = KeyedMap::new();
/// map.add(Event::from_static("CONNECT"), 1);
/// map.add(Event::from_static("CONNECT"), 2); // overwrite, same identity
///
/// assert_eq!(map.count(), 1);
/// assert_eq!(map.item(&Event::from_static("CONNECT")), Some(&2));
/// ```
pub struct KeyedMap<K, V> {
    entries: HashMap<Identity, (K, V)>,
}

impl<K: Identified, V> KeyedMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert or overwrite by identity.
    ///
    /// Returns the previous value when the identity was already present; the
    /// distinct-key count only grows on a true insert.
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        match self.entries.entry(key.identity().clone()) {
            Entry::Occupied(mut slot) => {
                let (_, previous) = slot.insert((key, value));
                Some(previous)
            }
            Entry::Vacant(slot) => {
                slot.insert((key, value));
                None
            }
        }
    }

    pub fn contains_key<Q: Identified + ?Sized>(&self, key: &Q) -> bool {
        self.entries.contains_key(key.identity())
    }

    /// Value stored under `key`'s identity, or `None`.
    pub fn item<Q: Identified + ?Sized>(&self, key: &Q) -> Option<&V> {
        self.entries.get(key.identity()).map(|(_, value)| value)
    }

    pub fn item_mut<Q: Identified + ?Sized>(&mut self, key: &Q) -> Option<&mut V> {
        self.entries.get_mut(key.identity()).map(|(_, value)| value)
    }

    /// Value under `key`, inserting `make()` first when absent.
    pub fn item_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        &mut self
            .entries
            .entry(key.identity().clone())
            .or_insert_with(|| (key, make()))
            .1
    }

    /// Remove `key` and return its value. Absent keys leave the map untouched.
    pub fn remove<Q: Identified + ?Sized>(&mut self, key: &Q) -> Option<V> {
        self.entries.remove(key.identity()).map(|(_, value)| value)
    }

    /// Number of distinct identities stored.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.values().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.values().map(|(key, value)| (key, value))
    }
}

impl<K: Identified, V> Default for KeyedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Identified + Clone, V: Clone> Clone for KeyedMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<K: Identified + fmt::Debug, V: fmt::Debug> fmt::Debug for KeyedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Identified, V> FromIterator<(K, V)> for KeyedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.add(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Node {
        id: Identity,
        label: &'static str,
    }

    impl Node {
        fn new(label: &'static str) -> Self {
            Self {
                id: Identity::generate(),
                label,
            }
        }
    }

    impl Identified for Node {
        fn identity(&self) -> &Identity {
            &self.id
        }
    }

    #[test]
    fn add_counts_distinct_identities() {
        let a = Node::new("a");
        let b = Node::new("b");
        let mut map = KeyedMap::new();

        assert_eq!(map.add(a.clone(), 1), None);
        assert_eq!(map.add(b.clone(), 2), None);
        assert_eq!(map.count(), 2);
    }

    #[test]
    fn add_overwrites_by_identity() {
        let a = Node::new("a");
        let mut map = KeyedMap::new();

        map.add(a.clone(), 1);
        assert_eq!(map.add(a.clone(), 5), Some(1));

        assert_eq!(map.count(), 1);
        assert_eq!(map.item(&a), Some(&5));
    }

    #[test]
    fn overwrite_replaces_stored_key() {
        let original = Node::new("first");
        let replacement = Node {
            id: original.id.clone(),
            label: "second",
        };
        let mut map = KeyedMap::new();

        map.add(original, ());
        map.add(replacement, ());

        let labels: Vec<_> = map.keys().map(|n| n.label).collect();
        assert_eq!(labels, vec!["second"]);
    }

    #[test]
    fn item_returns_none_for_unknown_key() {
        let map: KeyedMap<Node, i32> = KeyedMap::new();
        assert_eq!(map.item(&Node::new("ghost")), None);
        assert!(!map.contains_key(&Node::new("ghost")));
    }

    #[test]
    fn lookup_by_bare_identity() {
        let a = Node::new("a");
        let mut map = KeyedMap::new();
        map.add(a.clone(), "value");

        assert_eq!(map.item(&a.id), Some(&"value"));
        assert!(map.contains_key(&a.id));
    }

    #[test]
    fn remove_decrements_once() {
        let a = Node::new("a");
        let b = Node::new("b");
        let mut map = KeyedMap::new();
        map.add(a.clone(), 1);
        map.add(b.clone(), 2);

        assert_eq!(map.remove(&a), Some(1));
        assert_eq!(map.count(), 1);
        assert!(map.keys().all(|k| k.id != a.id));
        assert!(map.values().all(|v| *v != 1));
    }

    #[test]
    fn remove_absent_key_is_noop() {
        let a = Node::new("a");
        let mut map = KeyedMap::new();
        map.add(a.clone(), 1);

        assert_eq!(map.remove(&Node::new("other")), None);
        assert_eq!(map.count(), 1);

        map.remove(&a);
        assert_eq!(map.remove(&a), None);
        assert_eq!(map.count(), 0);
    }

    #[test]
    fn item_or_insert_with_creates_once() {
        let a = Node::new("a");
        let mut map: KeyedMap<Node, Vec<u8>> = KeyedMap::new();

        map.item_or_insert_with(a.clone(), Vec::new).push(1);
        map.item_or_insert_with(a.clone(), Vec::new).push(2);

        assert_eq!(map.count(), 1);
        assert_eq!(map.item(&a), Some(&vec![1, 2]));
    }

    #[test]
    fn enumeration_is_restartable() {
        let map: KeyedMap<Node, u32> = (0..5).map(|i| (Node::new("n"), i)).collect();

        let first: u32 = map.values().sum();
        let second: u32 = map.values().sum();
        assert_eq!(first, 10);
        assert_eq!(first, second);
        assert_eq!(map.keys().count(), map.count());
    }

    #[test]
    fn item_mut_updates_in_place() {
        let a = Node::new("a");
        let mut map = KeyedMap::new();
        map.add(a.clone(), 1);

        if let Some(value) = map.item_mut(&a) {
            *value += 41;
        }
        assert_eq!(map.item(&a), Some(&42));
    }
}
