//! Concrete traversal strategies behind [`Cursor`](crate::Cursor).
//!
//! Every strategy owns boxed copies of the cursors it wraps and steps them in
//! place. Value semantics come from `boxed_clone`: a `Cursor` that needs to
//! keep its old position clones the whole chain first.

use core::marker::PhantomData;
use std::rc::Rc;

use crate::cursor::{BoxedCursor, SequenceCursor};

pub(crate) type Predicate<'a, T> = Rc<dyn Fn(&T) -> bool + 'a>;
pub(crate) type Selector<'a, S, T> = Rc<dyn Fn(S) -> T + 'a>;
pub(crate) type Combiner<'a, L, R, K> = Rc<dyn Fn(L, R) -> K + 'a>;

fn add_hint(a: (usize, Option<usize>), b: (usize, Option<usize>)) -> (usize, Option<usize>) {
    let lo = a.0.saturating_add(b.0);
    let hi = match (a.1, b.1) {
        (Some(x), Some(y)) => x.checked_add(y),
        _ => None,
    };
    (lo, hi)
}

fn min_hint(a: (usize, Option<usize>), b: (usize, Option<usize>)) -> (usize, Option<usize>) {
    let lo = a.0.min(b.0);
    let hi = match (a.1, b.1) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    };
    (lo, hi)
}

/// Walks any cloneable iterator without copying the source.
pub struct PassThroughCursor<I: Iterator> {
    iter: I,
    head: Option<I::Item>,
}

impl<I: Iterator> PassThroughCursor<I> {
    pub fn new(mut iter: I) -> Self {
        let head = iter.next();
        Self { iter, head }
    }
}

impl<'a, I> SequenceCursor<'a, I::Item> for PassThroughCursor<I>
where
    I: Iterator + Clone + 'a,
    I::Item: Clone + 'a,
{
    fn current(&self) -> Option<I::Item> {
        self.head.clone()
    }

    fn is_exhausted(&self) -> bool {
        self.head.is_none()
    }

    fn step(&mut self) {
        self.head = self.iter.next();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.head.is_none() {
            return (0, Some(0));
        }
        add_hint((1, Some(1)), self.iter.size_hint())
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, I::Item> {
        Box::new(Self { iter: self.iter.clone(), head: self.head.clone() })
    }
}

/// Index cursor into a materialized buffer. Every copy shares the buffer.
pub struct StorageCursor<T> {
    buffer: Rc<Vec<T>>,
    index: usize,
}

impl<T> StorageCursor<T> {
    pub fn new(buffer: Rc<Vec<T>>) -> Self {
        Self { buffer, index: 0 }
    }
}

impl<'a, T: Clone + 'a> SequenceCursor<'a, T> for StorageCursor<T> {
    fn current(&self) -> Option<T> {
        self.buffer.get(self.index).cloned()
    }

    fn is_exhausted(&self) -> bool {
        self.index >= self.buffer.len()
    }

    fn step(&mut self) {
        self.index += 1;
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.buffer.len().saturating_sub(self.index);
        (left, Some(left))
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, T> {
        Box::new(Self { buffer: Rc::clone(&self.buffer), index: self.index })
    }
}

/// Zero-element sequence; also serves as the end sentinel.
pub struct EmptyCursor<T>(PhantomData<fn() -> T>);

impl<T> EmptyCursor<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for EmptyCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: 'a> SequenceCursor<'a, T> for EmptyCursor<T> {
    fn current(&self) -> Option<T> {
        None
    }

    fn is_exhausted(&self) -> bool {
        true
    }

    fn step(&mut self) {}

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(0))
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, T> {
        Box::new(Self::new())
    }
}

/// Left sequence, then right sequence.
pub struct ConcatCursor<'a, T> {
    left: BoxedCursor<'a, T>,
    right: BoxedCursor<'a, T>,
    on_left: bool,
}

impl<'a, T> ConcatCursor<'a, T> {
    pub fn new(left: BoxedCursor<'a, T>, right: BoxedCursor<'a, T>) -> Self {
        let on_left = !left.is_exhausted();
        Self { left, right, on_left }
    }
}

impl<'a, T: 'a> SequenceCursor<'a, T> for ConcatCursor<'a, T> {
    fn current(&self) -> Option<T> {
        if self.on_left { self.left.current() } else { self.right.current() }
    }

    fn is_exhausted(&self) -> bool {
        !self.on_left && self.right.is_exhausted()
    }

    fn step(&mut self) {
        if self.on_left {
            self.left.step();
            if self.left.is_exhausted() {
                self.on_left = false;
            }
        } else {
            self.right.step();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.on_left {
            add_hint(self.left.size_hint(), self.right.size_hint())
        } else {
            self.right.size_hint()
        }
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, T> {
        Box::new(Self { left: self.left.boxed_clone(), right: self.right.boxed_clone(), on_left: self.on_left })
    }
}

/// Skips elements failing the predicate, both when created and after every step.
pub struct FilterCursor<'a, T> {
    inner: BoxedCursor<'a, T>,
    predicate: Predicate<'a, T>,
}

impl<'a, T> FilterCursor<'a, T> {
    pub(crate) fn new(inner: BoxedCursor<'a, T>, predicate: Predicate<'a, T>) -> Self {
        let mut cursor = Self { inner, predicate };
        cursor.settle();
        cursor
    }

    fn settle(&mut self) {
        while let Some(value) = self.inner.current() {
            if (self.predicate)(&value) {
                break;
            }
            self.inner.step();
        }
    }
}

impl<'a, T: 'a> SequenceCursor<'a, T> for FilterCursor<'a, T> {
    fn current(&self) -> Option<T> {
        self.inner.current()
    }

    fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }

    fn step(&mut self) {
        self.inner.step();
        self.settle();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.inner.is_exhausted() {
            return (0, Some(0));
        }
        (1, self.inner.size_hint().1)
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, T> {
        Box::new(Self { inner: self.inner.boxed_clone(), predicate: Rc::clone(&self.predicate) })
    }
}

/// Applies the selector at dereference time; nothing is precomputed.
pub struct SelectCursor<'a, S, T> {
    inner: BoxedCursor<'a, S>,
    selector: Selector<'a, S, T>,
}

impl<'a, S, T> SelectCursor<'a, S, T> {
    pub(crate) fn new(inner: BoxedCursor<'a, S>, selector: Selector<'a, S, T>) -> Self {
        Self { inner, selector }
    }
}

impl<'a, S: 'a, T: 'a> SequenceCursor<'a, T> for SelectCursor<'a, S, T> {
    fn current(&self) -> Option<T> {
        self.inner.current().map(|v| (self.selector)(v))
    }

    fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }

    fn step(&mut self) {
        self.inner.step();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, T> {
        Box::new(Self { inner: self.inner.boxed_clone(), selector: Rc::clone(&self.selector) })
    }
}

/// At most `remaining` elements; collapses to the end once the budget is spent
/// without touching the wrapped cursor again.
pub struct TakeCursor<'a, T> {
    inner: BoxedCursor<'a, T>,
    remaining: usize,
}

impl<'a, T> TakeCursor<'a, T> {
    pub fn new(inner: BoxedCursor<'a, T>, count: usize) -> Self {
        Self { inner, remaining: count }
    }
}

impl<'a, T: 'a> SequenceCursor<'a, T> for TakeCursor<'a, T> {
    fn current(&self) -> Option<T> {
        if self.remaining == 0 { None } else { self.inner.current() }
    }

    fn is_exhausted(&self) -> bool {
        self.remaining == 0 || self.inner.is_exhausted()
    }

    fn step(&mut self) {
        self.remaining -= 1;
        if self.remaining > 0 {
            self.inner.step();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_exhausted() {
            return (0, Some(0));
        }
        min_hint(self.inner.size_hint(), (self.remaining, Some(self.remaining)))
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, T> {
        Box::new(Self { inner: self.inner.boxed_clone(), remaining: self.remaining })
    }
}

/// Yields while the predicate holds; the first element is checked on creation.
pub struct TakeWhileCursor<'a, T> {
    inner: BoxedCursor<'a, T>,
    predicate: Predicate<'a, T>,
    done: bool,
}

impl<'a, T> TakeWhileCursor<'a, T> {
    pub(crate) fn new(inner: BoxedCursor<'a, T>, predicate: Predicate<'a, T>) -> Self {
        let mut cursor = Self { inner, predicate, done: false };
        cursor.check();
        cursor
    }

    fn check(&mut self) {
        self.done = match self.inner.current() {
            Some(value) => !(self.predicate)(&value),
            None => true,
        };
    }
}

impl<'a, T: 'a> SequenceCursor<'a, T> for TakeWhileCursor<'a, T> {
    fn current(&self) -> Option<T> {
        if self.done { None } else { self.inner.current() }
    }

    fn is_exhausted(&self) -> bool {
        self.done
    }

    fn step(&mut self) {
        self.inner.step();
        self.check();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        (1, self.inner.size_hint().1)
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, T> {
        Box::new(Self { inner: self.inner.boxed_clone(), predicate: Rc::clone(&self.predicate), done: self.done })
    }
}

/// Drops the first `count` elements on creation, then passes through.
pub struct SkipCursor<'a, T> {
    inner: BoxedCursor<'a, T>,
}

impl<'a, T> SkipCursor<'a, T> {
    pub fn new(mut inner: BoxedCursor<'a, T>, count: usize) -> Self {
        for _ in 0..count {
            if inner.is_exhausted() {
                break;
            }
            inner.step();
        }
        Self { inner }
    }
}

impl<'a, T: 'a> SequenceCursor<'a, T> for SkipCursor<'a, T> {
    fn current(&self) -> Option<T> {
        self.inner.current()
    }

    fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }

    fn step(&mut self) {
        self.inner.step();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, T> {
        Box::new(Self { inner: self.inner.boxed_clone() })
    }
}

/// Drops leading elements while the predicate holds, then passes through.
pub struct SkipWhileCursor<'a, T> {
    inner: BoxedCursor<'a, T>,
}

impl<'a, T> SkipWhileCursor<'a, T> {
    pub(crate) fn new(mut inner: BoxedCursor<'a, T>, predicate: &Predicate<'a, T>) -> Self {
        while let Some(value) = inner.current() {
            if !predicate(&value) {
                break;
            }
            inner.step();
        }
        Self { inner }
    }
}

impl<'a, T: 'a> SequenceCursor<'a, T> for SkipWhileCursor<'a, T> {
    fn current(&self) -> Option<T> {
        self.inner.current()
    }

    fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }

    fn step(&mut self) {
        self.inner.step();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, T> {
        Box::new(Self { inner: self.inner.boxed_clone() })
    }
}

/// Walks two sequences in lockstep and stops at the shorter one.
pub struct ZipCursor<'a, L, R> {
    left: BoxedCursor<'a, L>,
    right: BoxedCursor<'a, R>,
}

impl<'a, L, R> ZipCursor<'a, L, R> {
    pub fn new(left: BoxedCursor<'a, L>, right: BoxedCursor<'a, R>) -> Self {
        Self { left, right }
    }
}

impl<'a, L: 'a, R: 'a> SequenceCursor<'a, (L, R)> for ZipCursor<'a, L, R> {
    fn current(&self) -> Option<(L, R)> {
        Some((self.left.current()?, self.right.current()?))
    }

    fn is_exhausted(&self) -> bool {
        self.left.is_exhausted() || self.right.is_exhausted()
    }

    fn step(&mut self) {
        self.left.step();
        self.right.step();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        min_hint(self.left.size_hint(), self.right.size_hint())
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, (L, R)> {
        Box::new(Self { left: self.left.boxed_clone(), right: self.right.boxed_clone() })
    }
}

/// Like [`ZipCursor`], but the left slot holds `combiner(left, right)`; the
/// right element is kept as is.
pub struct ZipWithCursor<'a, L, R, K> {
    left: BoxedCursor<'a, L>,
    right: BoxedCursor<'a, R>,
    combiner: Combiner<'a, L, R, K>,
}

impl<'a, L, R, K> ZipWithCursor<'a, L, R, K> {
    pub(crate) fn new(left: BoxedCursor<'a, L>, right: BoxedCursor<'a, R>, combiner: Combiner<'a, L, R, K>) -> Self {
        Self { left, right, combiner }
    }
}

impl<'a, L: 'a, R: Clone + 'a, K: 'a> SequenceCursor<'a, (K, R)> for ZipWithCursor<'a, L, R, K> {
    fn current(&self) -> Option<(K, R)> {
        let left = self.left.current()?;
        let right = self.right.current()?;
        Some(((self.combiner)(left, right.clone()), right))
    }

    fn is_exhausted(&self) -> bool {
        self.left.is_exhausted() || self.right.is_exhausted()
    }

    fn step(&mut self) {
        self.left.step();
        self.right.step();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        min_hint(self.left.size_hint(), self.right.size_hint())
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, (K, R)> {
        Box::new(Self {
            left: self.left.boxed_clone(),
            right: self.right.boxed_clone(),
            combiner: Rc::clone(&self.combiner),
        })
    }
}

/// Expands every outer element into an inner sequence and walks the inner
/// sequences back to back. `outer` always sits on the next element to expand,
/// so only one inner cursor is alive at a time.
pub struct FlatMapCursor<'a, S, T> {
    outer: BoxedCursor<'a, S>,
    expand: Selector<'a, S, BoxedCursor<'a, T>>,
    inner: BoxedCursor<'a, T>,
}

impl<'a, S, T: 'a> FlatMapCursor<'a, S, T> {
    pub(crate) fn new(outer: BoxedCursor<'a, S>, expand: Selector<'a, S, BoxedCursor<'a, T>>) -> Self {
        let mut cursor = Self { outer, expand, inner: Box::new(EmptyCursor::new()) };
        cursor.settle();
        cursor
    }

    fn settle(&mut self) {
        while self.inner.is_exhausted() {
            let Some(value) = self.outer.current() else { break };
            self.inner = (self.expand)(value);
            self.outer.step();
        }
    }
}

impl<'a, S: 'a, T: 'a> SequenceCursor<'a, T> for FlatMapCursor<'a, S, T> {
    fn current(&self) -> Option<T> {
        self.inner.current()
    }

    fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }

    fn step(&mut self) {
        self.inner.step();
        self.settle();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.outer.is_exhausted() { self.inner.size_hint() } else { (self.inner.size_hint().0, None) }
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, T> {
        Box::new(Self {
            outer: self.outer.boxed_clone(),
            expand: Rc::clone(&self.expand),
            inner: self.inner.boxed_clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use rstest::rstest;

    fn storage(values: &[i32]) -> BoxedCursor<'static, i32> {
        Box::new(StorageCursor::new(Rc::new(values.to_vec())))
    }

    fn drain<T: 'static>(cursor: impl SequenceCursor<'static, T> + 'static) -> Vec<T> {
        crate::cursor::Iter::new(Cursor::new(cursor)).collect()
    }

    #[rstest]
    fn concat_skips_an_empty_left_side() {
        let out = drain(ConcatCursor::new(storage(&[]), storage(&[4, 5])));
        assert_eq!(out, vec![4, 5]);
    }

    #[rstest]
    fn concat_with_empty_right_side() {
        let out = drain(ConcatCursor::new(storage(&[1, 2]), storage(&[])));
        assert_eq!(out, vec![1, 2]);
    }

    #[rstest]
    fn filter_settles_on_creation() {
        let cursor = FilterCursor::new(storage(&[1, 3, 4, 5, 6]), Rc::new(|x: &i32| x % 2 == 0));
        assert_eq!(cursor.current(), Some(4));
        assert_eq!(drain(cursor), vec![4, 6]);
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(2, vec![1, 2])]
    #[case(9, vec![1, 2, 3])]
    fn take_bounds_the_prefix(#[case] count: usize, #[case] expected: Vec<i32>) {
        assert_eq!(drain(TakeCursor::new(storage(&[1, 2, 3]), count)), expected);
    }

    #[rstest]
    fn take_while_checks_first_element_on_creation() {
        let cursor = TakeWhileCursor::new(storage(&[5, 1, 2]), Rc::new(|x: &i32| *x < 3));
        assert!(cursor.is_exhausted());
    }

    #[rstest]
    fn skip_past_the_end_is_exhausted() {
        let cursor = SkipCursor::new(storage(&[1, 2]), 5);
        assert!(cursor.is_exhausted());
    }

    #[rstest]
    fn skip_while_stops_at_first_failure() {
        let pred: Predicate<'_, i32> = Rc::new(|x: &i32| *x < 3);
        let out = drain(SkipWhileCursor::new(storage(&[1, 2, 3, 1]), &pred));
        assert_eq!(out, vec![3, 1]);
    }

    #[rstest]
    fn zip_with_keeps_right_element() {
        let cursor = ZipWithCursor::new(storage(&[1, 2, 3]), storage(&[10, 20]), Rc::new(|l: i32, r: i32| l + r));
        assert_eq!(drain(cursor), vec![(11, 10), (22, 20)]);
    }

    #[rstest]
    fn flat_map_skips_empty_inner_sequences() {
        let expand: Selector<'static, i32, BoxedCursor<'static, i32>> =
            Rc::new(|n: i32| storage(&vec![n; usize::try_from(n).unwrap_or(0)]));
        let cursor = FlatMapCursor::new(storage(&[0, 2, 0, 1, 0]), expand);
        assert_eq!(drain(cursor), vec![2, 2, 1]);
    }

    #[rstest]
    fn flat_map_with_only_empty_inner_sequences_is_exhausted() {
        let expand: Selector<'static, i32, BoxedCursor<'static, i32>> = Rc::new(|_: i32| storage(&[]));
        let cursor = FlatMapCursor::new(storage(&[1, 2, 3]), expand);
        assert!(cursor.is_exhausted());
    }

    #[rstest]
    fn pass_through_hint_counts_head() {
        let cursor = PassThroughCursor::new([1, 2, 3].into_iter());
        assert_eq!(cursor.size_hint(), (3, Some(3)));
    }

    #[rstest]
    fn storage_clone_shares_buffer() {
        let buffer = Rc::new(vec![1, 2, 3]);
        let cursor = StorageCursor::new(Rc::clone(&buffer));
        let copy = cursor.boxed_clone();
        assert_eq!(Rc::strong_count(&buffer), 3);
        drop(copy);
        assert_eq!(Rc::strong_count(&buffer), 2);
    }
}
