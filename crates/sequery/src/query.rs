//! The query handle, its construction functions and the lazy operators.
//!
//! Lazy operators only stack a new strategy on top of the current cursor; no
//! element is touched until the query is traversed. The exceptions are
//! `where_by`, `take_while`, `skip`, `skip_while` and `select_many`, which
//! position their cursor on creation and therefore inspect the leading
//! elements right away.
//! Operators that need the whole sequence live in [`crate::operators`].

use core::fmt;
use std::collections::{BTreeSet, LinkedList, VecDeque};
use std::rc::Rc;

use crate::cursor::{BoxedCursor, Cursor, Iter, SequenceCursor};
use crate::cursors::{
    ConcatCursor, EmptyCursor, FilterCursor, FlatMapCursor, PassThroughCursor, SelectCursor, Selector, SkipCursor,
    SkipWhileCursor, StorageCursor, TakeCursor, TakeWhileCursor, ZipCursor, ZipWithCursor,
};

/// A lazy, immutable, multi-pass view over a sequence of `T`.
///
/// Every operator returns a new handle and leaves `self` untouched. Traversal
/// (`iter`, `for` loops, `to_*` conversions, reductions) always starts from a
/// fresh copy of the first cursor, so a handle can be walked any number of
/// times.
pub struct Query<'a, T> {
    begin: Cursor<'a, T>,
}

impl<T> Clone for Query<'_, T> {
    fn clone(&self) -> Self {
        Self { begin: self.begin.clone() }
    }
}

impl<'a, T: 'a> Query<'a, T> {
    pub fn from_cursor(begin: Cursor<'a, T>) -> Self {
        Self { begin }
    }

    pub(crate) fn from_strategy(strategy: impl SequenceCursor<'a, T> + 'a) -> Self {
        Self::from_cursor(Cursor::new(strategy))
    }

    /// Cursor on the first element.
    pub fn begin(&self) -> Cursor<'a, T> {
        self.begin.clone()
    }

    /// The end sentinel; every exhausted cursor compares equal to it.
    pub fn end(&self) -> Cursor<'a, T> {
        Cursor::end()
    }

    pub fn iter(&self) -> Iter<'a, T> {
        Iter::new(self.begin())
    }

    pub fn is_empty(&self) -> bool {
        self.begin.is_end()
    }

    pub(crate) fn boxed(&self) -> BoxedCursor<'a, T> {
        self.begin().into_boxed()
    }

    /// Transform every element. The selector runs each time an element is
    /// read, never ahead of time.
    pub fn select<U: 'a>(&self, selector: impl Fn(T) -> U + 'a) -> Query<'a, U> {
        Query::from_strategy(SelectCursor::new(self.boxed(), Rc::new(selector)))
    }

    /// Keep only the elements matching `predicate` (the `where` operator).
    #[must_use]
    pub fn where_by(&self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        Self::from_strategy(FilterCursor::new(self.boxed(), Rc::new(predicate)))
    }

    /// At most the first `count` elements.
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        Self::from_strategy(TakeCursor::new(self.boxed(), count))
    }

    #[must_use]
    pub fn take_while(&self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        Self::from_strategy(TakeWhileCursor::new(self.boxed(), Rc::new(predicate)))
    }

    #[must_use]
    pub fn skip(&self, count: usize) -> Self {
        Self::from_strategy(SkipCursor::new(self.boxed(), count))
    }

    #[must_use]
    pub fn skip_while(&self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        let predicate: crate::cursors::Predicate<'a, T> = Rc::new(predicate);
        Self::from_strategy(SkipWhileCursor::new(self.boxed(), &predicate))
    }

    /// `self` followed by `other`.
    #[must_use]
    pub fn concat(&self, other: impl IntoQuery<'a, T>) -> Self {
        Self::from_strategy(ConcatCursor::new(self.boxed(), other.into_query().boxed()))
    }

    /// Pair up elements of both sequences, stopping at the shorter one.
    pub fn zip<U: 'a>(&self, other: impl IntoQuery<'a, U>) -> Query<'a, (T, U)> {
        Query::from_strategy(ZipCursor::new(self.boxed(), other.into_query().boxed()))
    }

    /// Like [`zip`](Self::zip), but the left element of every pair is replaced
    /// by `combiner(left, right)`. The right element is kept unchanged.
    pub fn zip_with<U: Clone + 'a, K: 'a>(
        &self,
        other: impl IntoQuery<'a, U>,
        combiner: impl Fn(T, U) -> K + 'a,
    ) -> Query<'a, (K, U)> {
        Query::from_strategy(ZipWithCursor::new(self.boxed(), other.into_query().boxed(), Rc::new(combiner)))
    }
}

impl<'a, T: Clone + 'a> Query<'a, T> {
    pub(crate) fn from_buffer(buffer: Rc<Vec<T>>) -> Self {
        Self::from_strategy(StorageCursor::new(buffer))
    }

    /// Flatten the sequences produced by `selector`, in order. Like
    /// `where_by`, creation already expands the leading elements until a
    /// non-empty inner sequence is found.
    pub fn select_many<U, Q>(&self, selector: impl Fn(T) -> Q + 'a) -> Query<'a, U>
    where
        U: 'a,
        Q: IntoQuery<'a, U>,
    {
        let expand: Selector<'a, T, BoxedCursor<'a, U>> = Rc::new(move |value: T| selector(value).into_query().boxed());
        Query::from_strategy(FlatMapCursor::new(self.boxed(), expand))
    }

    /// A single default element if the sequence is empty, otherwise `self`.
    #[must_use]
    pub fn default_if_empty(&self) -> Self
    where
        T: Default,
    {
        self.default_if_empty_with(T::default())
    }

    #[must_use]
    pub fn default_if_empty_with(&self, value: T) -> Self {
        if self.is_empty() { from_values([value]) } else { self.clone() }
    }

    /// Cursor on the first element equal to `value`, or the end cursor.
    pub fn find(&self, value: &T) -> Cursor<'a, T>
    where
        T: PartialEq,
    {
        let mut iter = self.iter();
        while iter.cursor().current().is_some_and(|current| current != *value) {
            iter.next();
        }
        iter.into_cursor()
    }

    pub fn empty() -> Self {
        Self::from_strategy(EmptyCursor::new())
    }
}

impl<'a, T: 'a> Default for Query<'a, T> {
    fn default() -> Self {
        Self::from_strategy(EmptyCursor::new())
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Query<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T: 'a> IntoIterator for Query<'a, T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        Iter::new(self.begin)
    }
}

impl<'a, T: 'a> IntoIterator for &Query<'a, T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Collecting into a query materializes the elements into a shared buffer.
impl<'a, T: Clone + 'a> FromIterator<T> for Query<'a, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        from_values(iter)
    }
}

/// Lazy view over a borrowed container, slice or array. Elements are cloned
/// as they are read; the container itself is never copied.
pub fn from<'a, C, T>(source: C) -> Query<'a, T>
where
    C: IntoIterator<Item = &'a T>,
    C::IntoIter: Clone + 'a,
    T: Clone + 'a,
{
    Query::from_strategy(PassThroughCursor::new(source.into_iter().cloned()))
}

/// Lazy view over any cloneable iterator (ranges, adapters, sub-slices).
pub fn from_iter<'a, I>(source: I) -> Query<'a, I::Item>
where
    I: IntoIterator,
    I::IntoIter: Clone + 'a,
    I::Item: Clone + 'a,
{
    Query::from_strategy(PassThroughCursor::new(source.into_iter()))
}

/// Copy every element into a fresh buffer owned by the query, decoupling it
/// from the source's lifetime.
pub fn from_values<'a, T: Clone + 'a>(values: impl IntoIterator<Item = T>) -> Query<'a, T> {
    Query::from_buffer(Rc::new(values.into_iter().collect()))
}

/// Wrap an already shared buffer without copying it.
pub fn from_shared<'a, T: Clone + 'a>(buffer: Rc<Vec<T>>) -> Query<'a, T> {
    Query::from_buffer(buffer)
}

pub fn empty<'a, T: Clone + 'a>() -> Query<'a, T> {
    Query::empty()
}

/// Argument shapes accepted wherever an operator takes a second sequence.
pub trait IntoQuery<'a, T> {
    fn into_query(self) -> Query<'a, T>;
}

impl<'a, T: 'a> IntoQuery<'a, T> for Query<'a, T> {
    fn into_query(self) -> Query<'a, T> {
        self
    }
}

impl<'a, T: 'a> IntoQuery<'a, T> for &Query<'a, T> {
    fn into_query(self) -> Query<'a, T> {
        self.clone()
    }
}

impl<'a, T: Clone + 'a> IntoQuery<'a, T> for &'a [T] {
    fn into_query(self) -> Query<'a, T> {
        from(self)
    }
}

impl<'a, T: Clone + 'a, const N: usize> IntoQuery<'a, T> for &'a [T; N] {
    fn into_query(self) -> Query<'a, T> {
        from(self)
    }
}

impl<'a, T: Clone + 'a> IntoQuery<'a, T> for &'a Vec<T> {
    fn into_query(self) -> Query<'a, T> {
        from(self)
    }
}

impl<'a, T: Clone + 'a> IntoQuery<'a, T> for &'a VecDeque<T> {
    fn into_query(self) -> Query<'a, T> {
        from(self)
    }
}

impl<'a, T: Clone + 'a> IntoQuery<'a, T> for &'a LinkedList<T> {
    fn into_query(self) -> Query<'a, T> {
        from(self)
    }
}

impl<'a, T: Clone + 'a> IntoQuery<'a, T> for &'a BTreeSet<T> {
    fn into_query(self) -> Query<'a, T> {
        from(self)
    }
}

impl<'a, T: Clone + 'a> IntoQuery<'a, T> for Vec<T> {
    fn into_query(self) -> Query<'a, T> {
        from_shared(Rc::new(self))
    }
}

impl<'a, T: Clone + 'a, const N: usize> IntoQuery<'a, T> for [T; N] {
    fn into_query(self) -> Query<'a, T> {
        from_values(self)
    }
}
