//! Key-based joins.
//!
//! `full_join` is the primitive: both sides are bucketed by key and the two
//! ordered bucket maps are merge-walked. `group_join` and `join` are derived
//! from its rows.

use core::fmt;
use std::rc::Rc;

use itertools::{EitherOrBoth, Itertools};

use super::grouping::{bucket_by, bucket_query};
use crate::query::{IntoQuery, Query};

/// One key of a full outer join. Either side may be empty, never both.
#[derive(Clone)]
pub struct FullJoinRow<'a, K, O, I> {
    pub key: K,
    pub outer: Query<'a, O>,
    pub inner: Query<'a, I>,
}

/// One outer element with every inner element sharing its key.
#[derive(Clone)]
pub struct GroupJoinRow<'a, K, O, I> {
    pub key: K,
    pub outer: O,
    pub inner: Query<'a, I>,
}

/// One matching pair of an inner equijoin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRow<K, O, I> {
    pub key: K,
    pub outer: O,
    pub inner: I,
}

impl<'a, K: fmt::Debug, O: fmt::Debug + 'a, I: fmt::Debug + 'a> fmt::Debug for FullJoinRow<'a, K, O, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FullJoinRow")
            .field("key", &self.key)
            .field("outer", &self.outer)
            .field("inner", &self.inner)
            .finish()
    }
}

impl<'a, K: fmt::Debug, O: fmt::Debug, I: fmt::Debug + 'a> fmt::Debug for GroupJoinRow<'a, K, O, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupJoinRow")
            .field("key", &self.key)
            .field("outer", &self.outer)
            .field("inner", &self.inner)
            .finish()
    }
}

impl<'a, T: Clone + 'a> Query<'a, T> {
    /// Full outer join, one row per key found on either side, in ascending
    /// key order. Each side's group keeps its source order.
    pub fn full_join<I, K>(
        &self,
        inner: impl IntoQuery<'a, I>,
        outer_key: impl Fn(&T) -> K,
        inner_key: impl Fn(&I) -> K,
    ) -> Query<'a, FullJoinRow<'a, K, T, I>>
    where
        I: Clone + 'a,
        K: Ord + Clone + 'a,
    {
        let outer = bucket_by(self.iter(), outer_key);
        let inner = bucket_by(inner.into_query().iter(), inner_key);
        let rows: Vec<FullJoinRow<'a, K, T, I>> = outer
            .into_iter()
            .merge_join_by(inner, |(left, _), (right, _)| left.cmp(right))
            .map(|pair| match pair {
                EitherOrBoth::Both((key, outer), (_, inner)) => {
                    FullJoinRow { key, outer: bucket_query(outer), inner: bucket_query(inner) }
                }
                EitherOrBoth::Left((key, outer)) => FullJoinRow { key, outer: bucket_query(outer), inner: Query::default() },
                EitherOrBoth::Right((key, inner)) => FullJoinRow { key, outer: Query::default(), inner: bucket_query(inner) },
            })
            .collect();
        tracing::trace!(operator = "full_join", keys = rows.len(), "rows sealed");
        Query::from_buffer(Rc::new(rows))
    }

    /// Pairs every outer element with the whole inner group of its key. An
    /// outer element without matches gets an empty group; inner-only keys
    /// produce no row.
    pub fn group_join<I, K>(
        &self,
        inner: impl IntoQuery<'a, I>,
        outer_key: impl Fn(&T) -> K,
        inner_key: impl Fn(&I) -> K,
    ) -> Query<'a, GroupJoinRow<'a, K, T, I>>
    where
        I: Clone + 'a,
        K: Ord + Clone + 'a,
    {
        let rows: Vec<GroupJoinRow<'a, K, T, I>> = self
            .full_join(inner, outer_key, inner_key)
            .iter()
            .flat_map(|row| {
                let FullJoinRow { key, outer, inner } = row;
                outer.into_iter().map(move |outer| GroupJoinRow { key: key.clone(), outer, inner: inner.clone() })
            })
            .collect();
        Query::sealed("group_join", rows)
    }

    /// Inner equijoin: one row per matching (outer, inner) pair.
    pub fn join<I, K>(
        &self,
        inner: impl IntoQuery<'a, I>,
        outer_key: impl Fn(&T) -> K,
        inner_key: impl Fn(&I) -> K,
    ) -> Query<'a, JoinRow<K, T, I>>
    where
        I: Clone + 'a,
        K: Ord + Clone + 'a,
    {
        let rows: Vec<JoinRow<K, T, I>> = self
            .group_join(inner, outer_key, inner_key)
            .iter()
            .flat_map(|row| {
                let GroupJoinRow { key, outer, inner } = row;
                inner.into_iter().map(move |inner| JoinRow { key: key.clone(), outer: outer.clone(), inner })
            })
            .collect();
        Query::sealed("join", rows)
    }
}
