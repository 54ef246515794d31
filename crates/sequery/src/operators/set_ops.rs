//! Set algebra over queries.
//!
//! `distinct` and `union_with` return elements in sorted order, not source
//! order. `intersect_with` and `except_with` keep source order and emit every
//! element at most once.

use std::collections::BTreeSet;

use crate::query::{IntoQuery, Query};

impl<'a, T: Clone + Ord + 'a> Query<'a, T> {
    /// Unique elements in ascending order.
    #[must_use]
    pub fn distinct(&self) -> Self {
        let unique: BTreeSet<T> = self.iter().collect();
        Self::sealed("distinct", unique.into_iter().collect())
    }

    /// `concat` followed by `distinct`, so the result is sorted.
    #[must_use]
    pub fn union_with(&self, other: impl IntoQuery<'a, T>) -> Self {
        self.concat(other).distinct()
    }

    /// Elements of `self` also present in `other`.
    #[must_use]
    pub fn intersect_with(&self, other: impl IntoQuery<'a, T>) -> Self {
        let right: BTreeSet<T> = other.into_query().iter().collect();
        self.retain_once("intersect_with", |value| right.contains(value))
    }

    /// Elements of `self` absent from `other`.
    #[must_use]
    pub fn except_with(&self, other: impl IntoQuery<'a, T>) -> Self {
        let right: BTreeSet<T> = other.into_query().iter().collect();
        self.retain_once("except_with", |value| !right.contains(value))
    }

    fn retain_once(&self, operator: &'static str, keep: impl Fn(&T) -> bool) -> Self {
        let mut seen = BTreeSet::new();
        let out: Vec<T> = self.iter().filter(|value| keep(value) && seen.insert(value.clone())).collect();
        Self::sealed(operator, out)
    }
}

#[cfg(test)]
mod tests {
    use crate::from;
    use rstest::rstest;

    #[rstest]
    fn distinct_sorts() {
        assert_eq!(from(&[3, 1, 3, 2, 1]).distinct().to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn union_is_sorted_and_unique() {
        assert_eq!(from(&[5, 1, 5]).union_with(&[4, 1]).to_vec(), vec![1, 4, 5]);
    }

    #[rstest]
    fn intersect_keeps_source_order_once() {
        let out = from(&[4, 2, 4, 9, 2]).intersect_with(vec![2, 4]).to_vec();
        assert_eq!(out, vec![4, 2]);
    }

    #[rstest]
    fn except_drops_repeats_too() {
        let out = from(&[7, 1, 7, 3, 1]).except_with(&[3]).to_vec();
        assert_eq!(out, vec![7, 1]);
    }

    #[rstest]
    #[case(&[], &[1, 2])]
    #[case(&[1, 2], &[])]
    fn empty_sides(#[case] left: &'static [i32], #[case] right: &'static [i32]) {
        assert!(from(left).intersect_with(right).is_empty());
        assert_eq!(from(left).except_with(right).to_vec(), left.to_vec());
    }
}
