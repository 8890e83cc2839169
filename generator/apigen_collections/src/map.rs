//! Immutable association preserving first-insertion order.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{CollectionError, Equality, Vector};

/// Immutable map from unique keys to values.
///
/// At most one entry exists per key under the [`Equality`] capability;
/// setting an existing key replaces its value in place, leaving the count
/// and the key's enumeration position unchanged. Enumeration order is the
/// first-insertion order of keys, unaffected by value updates or by removal
/// of other keys.
///
/// Keys are bucketed by `hash_code`; collisions within a bucket are resolved
/// by a linear scan with `equals`, never by hash alone.
#[derive(Clone)]
pub struct Map<K, V> {
    entries: Vec<(K, V)>,
    buckets: FxHashMap<u64, Vec<usize>>,
}

/// Mutation action for the shared map primitive.
enum Action<V> {
    Insert(V),
    Delete,
}

impl<K: Equality + Clone, V: Clone> Map<K, V> {
    /// The empty map.
    pub fn new() -> Self {
        Map {
            entries: Vec::new(),
            buckets: FxHashMap::default(),
        }
    }

    /// Position of `key` in the entry list: hash to a bucket, then scan the
    /// bucket with `equals`. This is the one collision-resolution path every
    /// operation goes through.
    fn position(entries: &[(K, V)], buckets: &FxHashMap<u64, Vec<usize>>, key: &K) -> Option<usize> {
        let hash = key.hash_code();
        let bucket = buckets.get(&hash)?;
        bucket.iter().copied().find(|&i| entries[i].0.equals(key))
    }

    /// Insert-or-update / delete primitive. Returns whether the key existed
    /// and its previous value.
    fn apply(
        entries: &mut Vec<(K, V)>,
        buckets: &mut FxHashMap<u64, Vec<usize>>,
        key: &K,
        action: Action<V>,
    ) -> (bool, Option<V>) {
        match Self::position(entries, buckets, key) {
            Some(index) => match action {
                Action::Insert(value) => {
                    let previous = std::mem::replace(&mut entries[index], (key.clone(), value)).1;
                    (true, Some(previous))
                }
                Action::Delete => {
                    let (_, previous) = entries.remove(index);
                    let hash = key.hash_code();
                    if let Some(bucket) = buckets.get_mut(&hash) {
                        bucket.retain(|&i| i != index);
                        if bucket.is_empty() {
                            buckets.remove(&hash);
                        }
                    }
                    // Entry list shifted down past the removal point.
                    for bucket in buckets.values_mut() {
                        for i in bucket.iter_mut() {
                            if *i > index {
                                *i -= 1;
                            }
                        }
                    }
                    (true, Some(previous))
                }
            },
            None => {
                if let Action::Insert(value) = action {
                    let index = entries.len();
                    entries.push((key.clone(), value));
                    buckets.entry(key.hash_code()).or_default().push(index);
                }
                (false, None)
            }
        }
    }

    /// New map with `key` bound to `value`. An existing key keeps its
    /// enumeration position.
    pub fn set(&self, key: K, value: V) -> Map<K, V> {
        let mut entries = self.entries.clone();
        let mut buckets = self.buckets.clone();
        let _ = Self::apply(&mut entries, &mut buckets, &key, Action::Insert(value));
        Map { entries, buckets }
    }

    /// New map without `key`. Other keys keep their relative order.
    pub fn without(&self, key: &K) -> Map<K, V> {
        let mut entries = self.entries.clone();
        let mut buckets = self.buckets.clone();
        let _ = Self::apply(&mut entries, &mut buckets, key, Action::Delete);
        Map { entries, buckets }
    }

    /// Value bound to `key`, if any.
    pub fn lookup(&self, key: &K) -> Option<&V> {
        Self::position(&self.entries, &self.buckets, key).map(|i| &self.entries[i].1)
    }

    /// Value bound to `key`, or `default` when absent.
    pub fn get(&self, key: &K, default: V) -> V {
        self.lookup(key).cloned().unwrap_or(default)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        Self::position(&self.entries, &self.buckets, key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> Vector<K> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Values in first-insertion order.
    pub fn values(&self) -> Vector<V> {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Entries for which `pred` holds, keeping their order.
    pub fn filter(&self, mut pred: impl FnMut(&K, &V) -> bool) -> Map<K, V> {
        let mut map = Map::new();
        for (k, v) in &self.entries {
            if pred(k, v) {
                map.insert_unchecked(k.clone(), v.clone());
            }
        }
        map
    }

    /// Transform every value, keeping keys and their order.
    pub fn map_values<W: Clone>(&self, mut f: impl FnMut(&K, &V) -> W) -> Map<K, W> {
        let mut map = Map::new();
        for (k, v) in &self.entries {
            let value = f(k, v);
            map.insert_unchecked(k.clone(), value);
        }
        map
    }

    /// Append an entry known not to collide (source keys were unique).
    fn insert_unchecked(&mut self, key: K, value: V) {
        let index = self.entries.len();
        self.buckets.entry(key.hash_code()).or_default().push(index);
        self.entries.push((key, value));
    }
}

impl<K: Equality + Clone + fmt::Debug, V: Clone> Map<K, V> {
    /// Build a map from a raw pair list; two equal keys are an error.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Map<K, V>, CollectionError> {
        let mut entries = Vec::new();
        let mut buckets = FxHashMap::default();
        for (key, value) in pairs {
            let (existed, _) = Self::apply(&mut entries, &mut buckets, &key, Action::Insert(value));
            if existed {
                return Err(CollectionError::DuplicateKey {
                    key: format!("{key:?}"),
                });
            }
        }
        Ok(Map { entries, buckets })
    }

    /// Build a map from optionally-keyed pairs; an absent key is an error.
    ///
    /// This is the one dynamic entry point where a missing key can reach the
    /// map layer; everywhere else absence is unrepresentable in the types.
    pub fn from_opt_pairs(
        pairs: impl IntoIterator<Item = (Option<K>, V)>,
    ) -> Result<Map<K, V>, CollectionError> {
        let mut checked = Vec::new();
        for (key, value) in pairs {
            match key {
                Some(key) => checked.push((key, value)),
                None => return Err(CollectionError::InvalidKey),
            }
        }
        Self::from_pairs(checked)
    }

    /// Value bound to `key`, or `MissingKey` when absent.
    pub fn get_strict(&self, key: &K) -> Result<&V, CollectionError> {
        self.lookup(key).ok_or_else(|| CollectionError::MissingKey {
            key: format!("{key:?}"),
        })
    }
}

impl<K: Equality + Clone, V: Clone> Default for Map<K, V> {
    fn default() -> Self {
        Map::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Map<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K: Equality + Clone, V: Equality + Clone> Equality for Map<K, V> {
    /// Commutative entry mix, consistent with key-set equality regardless of
    /// insertion order.
    fn hash_code(&self) -> u64 {
        let mut acc = self.entries.len() as u64;
        for (k, v) in &self.entries {
            acc ^= k.hash_code().wrapping_mul(31) ^ v.hash_code();
        }
        acc
    }

    fn equals(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.lookup(k).is_some_and(|w| v.equals(w)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keyed(pairs: &[(&str, i64)]) -> Map<String, i64> {
        let mut map = Map::new();
        for (k, v) in pairs {
            map = map.set((*k).to_string(), *v);
        }
        map
    }

    #[test]
    fn set_replaces_in_place() {
        let map = keyed(&[("a", 1), ("b", 2)]);
        let updated = map.set("a".to_string(), 10);
        assert_eq!(updated.len(), 2);
        assert_eq!(updated.lookup(&"a".to_string()), Some(&10));
        // Receiver untouched
        assert_eq!(map.lookup(&"a".to_string()), Some(&1));
    }

    #[test]
    fn enumeration_order_is_first_insertion_order() {
        let map = keyed(&[("a", 1), ("b", 2), ("c", 3)]);
        let updated = map.set("b".to_string(), 20);
        let keys: Vec<String> = updated.keys().to_vec();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(updated.values().to_vec(), vec![1, 20, 3]);
    }

    #[test]
    fn removal_of_one_key_keeps_other_order() {
        let map = keyed(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let smaller = map.without(&"b".to_string());
        assert_eq!(smaller.keys().to_vec(), vec!["a", "c", "d"]);
        assert_eq!(smaller.lookup(&"d".to_string()), Some(&4));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn from_pairs_rejects_duplicates() {
        let result = Map::from_pairs(vec![("a", 1), ("a", 2)]);
        assert!(matches!(result, Err(CollectionError::DuplicateKey { .. })));
    }

    #[test]
    fn from_opt_pairs_rejects_absent_keys() {
        let result: Result<Map<&str, i64>, _> =
            Map::from_opt_pairs(vec![(Some("a"), 1), (None, 2)]);
        assert!(matches!(result, Err(CollectionError::InvalidKey)));
    }

    #[test]
    fn get_falls_back_to_default() {
        let map = keyed(&[("a", 1)]);
        assert_eq!(map.get(&"a".to_string(), 0), 1);
        assert_eq!(map.get(&"zz".to_string(), 0), 0);
    }

    #[test]
    fn get_strict_reports_missing_key() {
        let map = keyed(&[("a", 1)]);
        assert!(matches!(
            map.get_strict(&"b".to_string()),
            Err(CollectionError::MissingKey { .. })
        ));
    }

    #[test]
    fn nested_vector_keys_compare_structurally() {
        let key_a: Vector<i64> = vec![1, 2].into();
        let key_b: Vector<i64> = vec![1, 2].into();
        let reversed: Vector<i64> = vec![2, 1].into();
        let map = Map::new().set(key_a, "first");
        assert_eq!(map.lookup(&key_b), Some(&"first"));
        assert_eq!(map.lookup(&reversed), None);
    }

    #[test]
    fn filter_and_map_values_keep_order() {
        let map = keyed(&[("a", 1), ("b", 2), ("c", 3)]);
        let odd = map.filter(|_, v| v % 2 == 1);
        assert_eq!(odd.keys().to_vec(), vec!["a", "c"]);
        let doubled = map.map_values(|_, v| v * 2);
        assert_eq!(doubled.values().to_vec(), vec![2, 4, 6]);
    }

    #[test]
    fn map_equality_ignores_insertion_order() {
        let a = keyed(&[("x", 1), ("y", 2)]);
        let b = keyed(&[("y", 2), ("x", 1)]);
        assert!(a.equals(&b));
        assert_eq!(a.hash_code(), b.hash_code());
        assert!(!a.equals(&keyed(&[("x", 1)])));
    }

    #[test]
    fn colliding_hashes_resolve_by_equals() {
        // Two distinct vectors engineered onto the same accumulator path are
        // hard to construct; instead verify the scan path with many keys
        // sharing a small value domain.
        let mut map = Map::new();
        for i in 0..64_i64 {
            map = map.set(i, i * 2);
        }
        for i in 0..64_i64 {
            assert_eq!(map.lookup(&i), Some(&(i * 2)));
        }
    }
}
