//! Materialization into standard collections.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::Hash;

use crate::query::Query;

impl<'a, T: Clone + 'a> Query<'a, T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    pub fn to_list(&self) -> LinkedList<T> {
        self.iter().collect()
    }

    pub fn to_deque(&self) -> VecDeque<T> {
        self.iter().collect()
    }

    /// Keyed by `key`. When two elements share a key the later one wins.
    pub fn to_map<K: Ord>(&self, key: impl Fn(&T) -> K) -> BTreeMap<K, T> {
        self.iter().map(|value| (key(&value), value)).collect()
    }

    /// Keyed by `key`, keeping every element in source order.
    pub fn to_multimap<K: Ord>(&self, key: impl Fn(&T) -> K) -> BTreeMap<K, Vec<T>> {
        let mut map: BTreeMap<K, Vec<T>> = BTreeMap::new();
        for value in self.iter() {
            map.entry(key(&value)).or_default().push(value);
        }
        map
    }

    /// Hashed variant of [`to_map`](Self::to_map); the later element wins.
    pub fn to_hash_map<K: Eq + Hash>(&self, key: impl Fn(&T) -> K) -> HashMap<K, T> {
        self.iter().map(|value| (key(&value), value)).collect()
    }

    pub fn to_set(&self) -> BTreeSet<T>
    where
        T: Ord,
    {
        self.iter().collect()
    }

    /// Every distinct element with its number of occurrences.
    pub fn to_multiset(&self) -> BTreeMap<T, usize>
    where
        T: Ord,
    {
        let mut counts = BTreeMap::new();
        for value in self.iter() {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    pub fn to_hash_set(&self) -> HashSet<T>
    where
        T: Eq + Hash,
    {
        self.iter().collect()
    }
}
