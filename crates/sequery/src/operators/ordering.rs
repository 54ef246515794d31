//! Stable key ordering and reversal.

use core::cmp::Ordering;

use crate::query::Query;

impl<'a, T: Clone + 'a> Query<'a, T> {
    /// Ascending by `key`. The sort is stable: elements with equal keys keep
    /// their source order. Each key is computed once.
    #[must_use]
    pub fn order_by<K: Ord>(&self, key: impl Fn(&T) -> K) -> Self {
        self.sorted_by_key("order_by", key, K::cmp)
    }

    /// Descending by `key`, also stable.
    #[must_use]
    pub fn order_by_descending<K: Ord>(&self, key: impl Fn(&T) -> K) -> Self {
        self.sorted_by_key("order_by_descending", key, |a, b| b.cmp(a))
    }

    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut buffer: Vec<T> = self.iter().collect();
        buffer.reverse();
        Self::sealed("reverse", buffer)
    }

    fn sorted_by_key<K>(
        &self,
        operator: &'static str,
        key: impl Fn(&T) -> K,
        compare: impl Fn(&K, &K) -> Ordering,
    ) -> Self {
        let mut keyed: Vec<(K, T)> = self.iter().map(|value| (key(&value), value)).collect();
        keyed.sort_by(|(a, _), (b, _)| compare(a, b));
        Self::sealed(operator, keyed.into_iter().map(|(_, value)| value).collect())
    }
}
