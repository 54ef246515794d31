//! Grouping by key.
//!
//! Buckets are collected into an ordered map, so groups come out in ascending
//! key order; the joins reuse the same bucketing.

use core::fmt;
use std::collections::BTreeMap;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::query::Query;

/// Members of one group, small enough to stay inline for the common case.
pub(crate) type Bucket<V> = SmallVec<[V; 4]>;

/// Partition `values` by key, keeping source order inside each bucket.
pub(crate) fn bucket_by<K: Ord, V>(values: impl Iterator<Item = V>, key: impl Fn(&V) -> K) -> BTreeMap<K, Bucket<V>> {
    let mut buckets: BTreeMap<K, Bucket<V>> = BTreeMap::new();
    for value in values {
        buckets.entry(key(&value)).or_default().push(value);
    }
    buckets
}

pub(crate) fn bucket_query<'a, V: Clone + 'a>(bucket: Bucket<V>) -> Query<'a, V> {
    Query::from_buffer(Rc::new(bucket.into_vec()))
}

/// One key and the elements that produced it.
#[derive(Clone)]
pub struct Grouping<'a, K, V> {
    pub key: K,
    pub values: Query<'a, V>,
}

impl<'a, K: fmt::Debug, V: fmt::Debug + 'a> fmt::Debug for Grouping<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grouping").field("key", &self.key).field("values", &self.values).finish()
    }
}

impl<'a, T: Clone + 'a> Query<'a, T> {
    /// Groups in ascending key order; members keep their source order.
    pub fn group_by<K: Ord + Clone + 'a>(&self, key: impl Fn(&T) -> K) -> Query<'a, Grouping<'a, K, T>> {
        self.group_by_select(key, |value| value)
    }

    /// Like [`group_by`](Self::group_by), with each member mapped through
    /// `value` after its key is taken.
    pub fn group_by_select<K, V>(
        &self,
        key: impl Fn(&T) -> K,
        value: impl Fn(T) -> V,
    ) -> Query<'a, Grouping<'a, K, V>>
    where
        K: Ord + Clone + 'a,
        V: Clone + 'a,
    {
        let groups: Vec<Grouping<'a, K, V>> = bucket_by(self.iter(), key)
            .into_iter()
            .map(|(key, members)| Grouping { key, values: bucket_query(members.into_iter().map(&value).collect()) })
            .collect();
        tracing::trace!(operator = "group_by", groups = groups.len(), "groups sealed");
        Query::from_buffer(Rc::new(groups))
    }
}

#[cfg(test)]
mod tests {
    use crate::from_iter;
    use rstest::rstest;

    #[rstest]
    fn parity_groups() {
        let groups = from_iter(0..10).group_by(|x| x % 2).to_vec();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, 0);
        assert_eq!(groups[0].values.to_vec(), vec![0, 2, 4, 6, 8]);
        assert_eq!(groups[1].key, 1);
        assert_eq!(groups[1].values.to_vec(), vec![1, 3, 5, 7, 9]);
    }

    #[rstest]
    fn group_by_select_maps_members() {
        let groups = from_iter(1..7).group_by_select(|x| x % 3, |x| x * 10).to_vec();
        let flat: Vec<(i32, Vec<i32>)> = groups.into_iter().map(|g| (g.key, g.values.to_vec())).collect();
        assert_eq!(flat, vec![(0, vec![30, 60]), (1, vec![10, 40]), (2, vec![20, 50])]);
    }

    #[rstest]
    fn empty_source_has_no_groups() {
        assert!(from_iter(0..0).group_by(|x: &i32| *x).is_empty());
    }
}
