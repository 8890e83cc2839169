//! Ordered immutable sequence.

use std::fmt;

use crate::{CollectionError, Equality, Map, Set};

/// Ordered, 0-indexed, immutable sequence.
///
/// Every mutator returns a new `Vector`; the receiver is never modified.
/// Equality and hashing are order-sensitive: `[1, 2]` and `[2, 1]` are
/// different values with different hashes.
#[derive(Clone)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T> Vector<T> {
    /// The empty sequence.
    pub fn new() -> Self {
        Vector { data: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Element at `index`, or `OutOfRange` past the end.
    pub fn get_strict(&self, index: usize) -> Result<&T, CollectionError> {
        self.data.get(index).ok_or(CollectionError::OutOfRange {
            index,
            len: self.data.len(),
        })
    }

    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.data.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Apply `f` to every element, yielding a new sequence.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Vector<U> {
        Vector {
            data: self.data.iter().map(|x| f(x)).collect(),
        }
    }

    /// Map each element to a `Vector` and concatenate the results in order.
    pub fn flat_map<U>(&self, mut f: impl FnMut(&T) -> Vector<U>) -> Vector<U> {
        let mut data = Vec::new();
        for item in &self.data {
            data.extend(f(item).data);
        }
        Vector { data }
    }

    /// True if `pred` holds for any element.
    pub fn any(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        self.data.iter().any(|x| pred(x))
    }

    /// Join the `Display` renderings of all elements with `sep`.
    pub fn join(&self, sep: &str) -> String
    where
        T: fmt::Display,
    {
        let parts: Vec<String> = self.data.iter().map(ToString::to_string).collect();
        parts.join(sep)
    }

    /// Largest element, or `default` when empty.
    pub fn max_or(&self, default: T) -> T
    where
        T: Ord + Clone,
    {
        self.data.iter().max().cloned().unwrap_or(default)
    }
}

impl<T: Clone> Vector<T> {
    /// New sequence with `item` added at the end.
    pub fn append(&self, item: T) -> Vector<T> {
        let mut data = self.data.clone();
        data.push(item);
        Vector { data }
    }

    /// New sequence with `item` added at the front.
    pub fn prepend(&self, item: T) -> Vector<T> {
        let mut data = Vec::with_capacity(self.data.len() + 1);
        data.push(item);
        data.extend_from_slice(&self.data);
        Vector { data }
    }

    /// New sequence holding `self` followed by `other`.
    pub fn concat(&self, other: &Vector<T>) -> Vector<T> {
        let mut data = self.data.clone();
        data.extend_from_slice(&other.data);
        Vector { data }
    }

    /// Elements for which `pred` holds, in order.
    pub fn filter(&self, mut pred: impl FnMut(&T) -> bool) -> Vector<T> {
        Vector {
            data: self.data.iter().filter(|x| pred(x)).cloned().collect(),
        }
    }

    /// First `n` elements; `n` is clamped to the length, never an error.
    pub fn take(&self, n: usize) -> Vector<T> {
        let n = n.min(self.data.len());
        Vector {
            data: self.data[..n].to_vec(),
        }
    }

    /// Last `n` elements; `n` is clamped to the length.
    pub fn take_last(&self, n: usize) -> Vector<T> {
        let n = n.min(self.data.len());
        Vector {
            data: self.data[self.data.len() - n..].to_vec(),
        }
    }

    /// All but the first `n` elements; `n` is clamped to the length.
    pub fn skip(&self, n: usize) -> Vector<T> {
        let n = n.min(self.data.len());
        Vector {
            data: self.data[n..].to_vec(),
        }
    }

    /// All but the last `n` elements; `n` is clamped to the length.
    pub fn skip_last(&self, n: usize) -> Vector<T> {
        let n = n.min(self.data.len());
        Vector {
            data: self.data[..self.data.len() - n].to_vec(),
        }
    }

    /// Drop the longest prefix for which `pred` holds.
    pub fn skip_while(&self, mut pred: impl FnMut(&T) -> bool) -> Vector<T> {
        let start = self
            .data
            .iter()
            .position(|x| !pred(x))
            .unwrap_or(self.data.len());
        Vector {
            data: self.data[start..].to_vec(),
        }
    }

    /// Drop the longest suffix for which `pred` holds.
    pub fn skip_last_while(&self, mut pred: impl FnMut(&T) -> bool) -> Vector<T> {
        let end = self
            .data
            .iter()
            .rposition(|x| !pred(x))
            .map_or(0, |i| i + 1);
        Vector {
            data: self.data[..end].to_vec(),
        }
    }

    /// Pair elements of two sequences; the result length is the minimum of
    /// both inputs.
    pub fn zip<U: Clone>(&self, other: &Vector<U>) -> Vector<(T, U)> {
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a.clone(), b.clone()))
            .collect();
        Vector { data }
    }

    /// Pair elements of two sequences and combine each pair with `f`.
    pub fn zip_with<U, R>(&self, other: &Vector<U>, mut f: impl FnMut(&T, &U) -> R) -> Vector<R> {
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| f(a, b))
            .collect();
        Vector { data }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.data.clone()
    }
}

impl<T: Clone> Vector<Vector<T>> {
    /// Concatenate nested sequences into one. Deeper nesting flattens by
    /// composing calls; heterogeneous trees flatten at their own node types.
    pub fn flatten(&self) -> Vector<T> {
        let mut data = Vec::new();
        for inner in &self.data {
            data.extend_from_slice(&inner.data);
        }
        Vector { data }
    }
}

impl<T: Equality + Clone> Vector<T> {
    /// Stable dedup: the first occurrence of each element wins.
    pub fn distinct(&self) -> Vector<T> {
        let mut seen = Set::new();
        let mut data = Vec::new();
        for item in &self.data {
            if !seen.contains(item) {
                seen = seen.add(item.clone());
                data.push(item.clone());
            }
        }
        Vector { data }
    }

    /// Membership under the equality capability, not pointer identity.
    pub fn contains(&self, item: &T) -> bool {
        self.data.iter().any(|x| x.equals(item))
    }

    /// Deduplicating conversion to a `Set`.
    pub fn to_set(&self) -> Set<T> {
        let mut set = Set::new();
        for item in &self.data {
            set = set.add(item.clone());
        }
        set
    }

    /// Group elements by `key_fn`, preserving encounter order within each
    /// group and across groups.
    pub fn group_by<K>(&self, key_fn: impl FnMut(&T) -> K) -> Map<K, Vector<T>>
    where
        K: Equality + Clone,
    {
        self.group_by_with(key_fn, Clone::clone)
    }

    /// Group `value_fn(x)` by `key_fn(x)`, preserving encounter order.
    pub fn group_by_with<K, V>(
        &self,
        mut key_fn: impl FnMut(&T) -> K,
        mut value_fn: impl FnMut(&T) -> V,
    ) -> Map<K, Vector<V>>
    where
        K: Equality + Clone,
        V: Clone,
    {
        let mut map: Map<K, Vector<V>> = Map::new();
        for item in &self.data {
            let key = key_fn(item);
            let value = value_fn(item);
            let group = match map.lookup(&key) {
                Some(existing) => existing.append(value),
                None => Vector::from(vec![value]),
            };
            map = map.set(key, group);
        }
        map
    }

    /// Build a map keyed by `key_fn`; fails on two equal keys.
    pub fn to_map<K>(&self, mut key_fn: impl FnMut(&T) -> K) -> Result<Map<K, T>, CollectionError>
    where
        K: Equality + Clone + fmt::Debug,
    {
        let pairs: Vec<(K, T)> = self.data.iter().map(|x| (key_fn(x), x.clone())).collect();
        Map::from_pairs(pairs)
    }

    /// Build a map of `value_fn(x)` keyed by `key_fn(x)`; fails on two
    /// equal keys.
    pub fn to_map_with<K, V>(
        &self,
        mut key_fn: impl FnMut(&T) -> K,
        mut value_fn: impl FnMut(&T) -> V,
    ) -> Result<Map<K, V>, CollectionError>
    where
        K: Equality + Clone + fmt::Debug,
        V: Clone,
    {
        let pairs: Vec<(K, V)> = self
            .data
            .iter()
            .map(|x| (key_fn(x), value_fn(x)))
            .collect();
        Map::from_pairs(pairs)
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Vector::new()
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Vector { data }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Vector {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> std::ops::Index<usize> for Vector<T> {
    type Output = T;

    /// Panics with a descriptive out-of-range message past the end, like the
    /// standard library's slices.
    fn index(&self, index: usize) -> &T {
        assert!(
            index < self.data.len(),
            "index {index} out of range for length {}",
            self.data.len()
        );
        &self.data[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.data).finish()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: Equality> Equality for Vector<T> {
    /// Order-sensitive mix: the accumulator starts at 1 and folds in each
    /// element as `acc * 17 ^ hash`, so permutations hash differently.
    fn hash_code(&self) -> u64 {
        let mut acc: u64 = 1;
        for item in &self.data {
            acc = acc.wrapping_mul(17) ^ item.hash_code();
        }
        acc
    }

    fn equals(&self, other: &Self) -> bool {
        self.data.len() == other.data.len()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.equals(b))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use pretty_assertions::assert_eq;

    fn ints(items: &[i64]) -> Vector<i64> {
        items.iter().copied().collect()
    }

    #[test]
    fn append_leaves_receiver_unchanged() {
        let a = ints(&[1, 2]);
        let b = a.append(3);
        assert_eq!(a.len(), 2);
        assert_eq!(b.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn prepend_and_concat() {
        let a = ints(&[2, 3]);
        assert_eq!(a.prepend(1).to_vec(), vec![1, 2, 3]);
        assert_eq!(a.concat(&ints(&[4])).to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn equality_is_order_sensitive() {
        assert!(ints(&[1, 2]).equals(&ints(&[1, 2])));
        assert!(!ints(&[1, 2]).equals(&ints(&[2, 1])));
        assert!(Vector::<i64>::new().equals(&Vector::new()));
    }

    #[test]
    fn hash_is_order_sensitive() {
        assert_ne!(ints(&[1, 2]).hash_code(), ints(&[2, 1]).hash_code());
        assert_eq!(ints(&[1, 2]).hash_code(), ints(&[1, 2]).hash_code());
    }

    #[test]
    fn nested_vectors_compare_structurally() {
        let a: Vector<Vector<i64>> = vec![ints(&[1]), ints(&[2, 3])].into();
        let b: Vector<Vector<i64>> = vec![ints(&[1]), ints(&[2, 3])].into();
        assert!(a.equals(&b));
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn distinct_keeps_first_occurrence() {
        assert_eq!(ints(&[1, 1, 1, 2, 3, 3]).distinct().to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn slicing_clamps_instead_of_failing() {
        let a = ints(&[1, 2, 3]);
        assert_eq!(a.take(4).to_vec(), vec![1, 2, 3]);
        assert_eq!(a.skip(5).to_vec(), Vec::<i64>::new());
        assert_eq!(a.take_last(2).to_vec(), vec![2, 3]);
        assert_eq!(a.skip_last(1).to_vec(), vec![1, 2]);
    }

    #[test]
    fn skip_while_from_both_ends() {
        let a = ints(&[0, 0, 1, 2, 0]);
        assert_eq!(a.skip_while(|x| *x == 0).to_vec(), vec![1, 2, 0]);
        assert_eq!(a.skip_last_while(|x| *x == 0).to_vec(), vec![0, 0, 1, 2]);
    }

    #[test]
    fn zip_truncates_to_shorter_input() {
        let v = ints(&[1, 2, 3]).zip(&Vector::from(vec!["a", "b"]));
        assert_eq!(v.to_vec(), vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn zip_with_combines_pairs() {
        let v = ints(&[1, 2]).zip_with(&ints(&[10, 20]), |a, b| a + b);
        assert_eq!(v.to_vec(), vec![11, 22]);
    }

    #[test]
    fn group_by_preserves_encounter_order() {
        let v: Vector<String> = ["1:a", "2:b", "2:c", "3:d"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let groups = v.group_by_with(
            |x| x.split(':').next().unwrap_or("").to_string(),
            |x| x.split(':').nth(1).unwrap_or("").to_string(),
        );
        assert_eq!(groups.len(), 3);
        let two = groups.lookup(&"2".to_string()).cloned().unwrap_or_default();
        assert_eq!(two.to_vec(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn flat_map_concatenates_in_order() {
        let v = ints(&[1, 2]).flat_map(|x| Vector::from(vec![*x, *x]));
        assert_eq!(v.to_vec(), vec![1, 1, 2, 2]);
    }

    #[test]
    fn flatten_one_level() {
        let v: Vector<Vector<i64>> = vec![ints(&[1, 2]), ints(&[]), ints(&[3])].into();
        assert_eq!(v.flatten().to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn join_uses_display() {
        assert_eq!(ints(&[1, 2, 3]).join(":"), "1:2:3");
    }

    #[test]
    fn contains_uses_capability_equality() {
        let v = ints(&[1, 2]);
        assert!(v.contains(&1));
        assert!(!v.contains(&3));
    }

    #[test]
    fn to_map_rejects_duplicate_keys() {
        let v = ints(&[1, 1]);
        let err = v.to_map(|x| *x);
        assert!(matches!(err, Err(CollectionError::DuplicateKey { .. })));
    }

    #[test]
    fn to_map_with_splits_pairs() {
        let v: Vector<String> = ["1:one", "2:two"].iter().map(ToString::to_string).collect();
        let m = v
            .to_map_with(
                |x| x.split(':').next().unwrap_or("").to_string(),
                |x| x.split(':').nth(1).unwrap_or("").to_string(),
            )
            .unwrap();
        assert_eq!(m.lookup(&"1".to_string()), Some(&"one".to_string()));
        assert_eq!(m.lookup(&"2".to_string()), Some(&"two".to_string()));
    }

    #[test]
    fn get_strict_reports_out_of_range() {
        let v = ints(&[1]);
        assert_eq!(
            v.get_strict(3),
            Err(CollectionError::OutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn max_or_defaults_when_empty() {
        assert_eq!(Vector::<i64>::new().max_or(0), 0);
        assert_eq!(ints(&[3, 9, 4]).max_or(0), 9);
    }
}
