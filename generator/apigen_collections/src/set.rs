//! Immutable membership set.

use std::fmt;

use crate::{Equality, Map, Vector};

/// Immutable deduplicating set: a [`Map`] of presence markers.
///
/// Supports membership testing and deduplicating insertion only; there is no
/// removal operation. Enumeration order is first-insertion order.
#[derive(Clone)]
pub struct Set<T> {
    map: Map<T, ()>,
}

impl<T: Equality + Clone> Set<T> {
    /// The empty set.
    pub fn new() -> Self {
        Set { map: Map::new() }
    }

    /// New set containing `item`. Adding an existing member yields an equal
    /// set with the same count.
    pub fn add(&self, item: T) -> Set<T> {
        if self.map.contains_key(&item) {
            self.clone()
        } else {
            Set {
                map: self.map.set(item, ()),
            }
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.map.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Members in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.map.iter().map(|(k, _)| k)
    }

    /// Members in first-insertion order, as a sequence.
    pub fn to_vector(&self) -> Vector<T> {
        self.map.keys()
    }
}

impl<T: Equality + Clone> Default for Set<T> {
    fn default() -> Self {
        Set::new()
    }
}

impl<T: Equality + Clone> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Set::new();
        for item in iter {
            set = set.add(item);
        }
        set
    }
}

impl<T: Equality + Clone + fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.map.iter().map(|(k, _)| k)).finish()
    }
}

impl<T: Equality + Clone> Equality for Set<T> {
    fn hash_code(&self) -> u64 {
        self.map.hash_code()
    }

    fn equals(&self, other: &Self) -> bool {
        self.map.equals(&other.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_deduplicates() {
        let set = Set::new().add(1_i64).add(1).add(2).add(1);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&1));
        assert!(set.contains(&2));
        assert!(!set.contains(&3));
    }

    #[test]
    fn add_is_pure() {
        let set = Set::new().add("a");
        let bigger = set.add("b");
        assert_eq!(set.len(), 1);
        assert_eq!(bigger.len(), 2);
    }

    #[test]
    fn members_enumerate_in_insertion_order() {
        let set = Set::new().add(3_i64).add(1).add(2).add(1);
        assert_eq!(set.to_vector().to_vec(), vec![3, 1, 2]);
    }

    #[test]
    fn set_equality_ignores_insertion_order() {
        let a: Set<i64> = [1, 2, 3].into_iter().collect();
        let b: Set<i64> = [3, 2, 1].into_iter().collect();
        assert!(a.equals(&b));
        assert_eq!(a.hash_code(), b.hash_code());
    }
}
