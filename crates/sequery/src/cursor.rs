//! The type-erased cursor every query is built from.
//!
//! A query never exposes its concrete traversal strategy. Each strategy
//! implements [`SequenceCursor`] and is boxed behind a [`Cursor`], which gives
//! all strategies the same value semantics:
//!
//! - cloning a cursor copies the strategy chain (materialized buffers are
//!   shared, never copied);
//! - [`Cursor::advance`] returns the successor and leaves the original cursor
//!   at its old position;
//! - two cursors compare equal when they sit at the same [`Position`], and
//!   every exhausted cursor is equal to the end sentinel.

use core::fmt;
use core::iter::FusedIterator;

use crate::cursors::EmptyCursor;
use crate::error::{Error, Result};

/// A concrete traversal strategy.
///
/// `current` must return `Some` exactly when `is_exhausted` is false.
/// `step` is only ever called on a non-exhausted strategy that the caller owns
/// exclusively, so implementations are free to mutate in place.
pub trait SequenceCursor<'a, T> {
    /// Copy of the element at the current position.
    fn current(&self) -> Option<T>;

    fn is_exhausted(&self) -> bool;

    /// Move to the next position.
    fn step(&mut self);

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, T>;
}

pub type BoxedCursor<'a, T> = Box<dyn SequenceCursor<'a, T> + 'a>;

/// Identity of a cursor within the sequence it traverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Number of steps taken from the first element.
    At(usize),
    End,
}

pub struct Cursor<'a, T> {
    inner: BoxedCursor<'a, T>,
    offset: usize,
}

impl<'a, T: 'a> Cursor<'a, T> {
    pub fn new(strategy: impl SequenceCursor<'a, T> + 'a) -> Self {
        Self::from_boxed(Box::new(strategy))
    }

    pub(crate) fn from_boxed(inner: BoxedCursor<'a, T>) -> Self {
        Self { inner, offset: 0 }
    }

    /// The universal end sentinel.
    pub fn end() -> Self {
        Self::new(EmptyCursor::new())
    }

    /// The successor of this cursor. Advancing an exhausted cursor yields
    /// another exhausted cursor.
    #[must_use]
    pub fn advance(&self) -> Self {
        let mut next = self.clone();
        next.step();
        next
    }

    /// The element under the cursor.
    ///
    /// # Errors
    ///
    /// `EmptyResult` when the cursor is exhausted.
    pub fn value(&self) -> Result<T> {
        self.inner.current().ok_or_else(Error::empty_result)
    }

    pub fn is_end(&self) -> bool {
        self.inner.is_exhausted()
    }

    pub fn position(&self) -> Position {
        if self.inner.is_exhausted() { Position::End } else { Position::At(self.offset) }
    }

    pub(crate) fn step(&mut self) {
        if !self.inner.is_exhausted() {
            self.inner.step();
            self.offset += 1;
        }
    }

    pub(crate) fn current(&self) -> Option<T> {
        self.inner.current()
    }

    pub(crate) fn into_boxed(self) -> BoxedCursor<'a, T> {
        self.inner
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.boxed_clone(), offset: self.offset }
    }
}

impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl<'a, T: 'a> fmt::Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("position", &self.position()).finish()
    }
}

/// Standard iterator over a cursor. Walks a private copy, so the query the
/// cursor came from is left untouched.
pub struct Iter<'a, T> {
    cursor: Cursor<'a, T>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(cursor: Cursor<'a, T>) -> Self {
        Self { cursor }
    }

    /// Cursor positioned at the next element this iterator would yield.
    pub fn cursor(&self) -> &Cursor<'a, T> {
        &self.cursor
    }

    pub(crate) fn into_cursor(self) -> Cursor<'a, T> {
        self.cursor
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = self.cursor.current()?;
        self.cursor.step();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.inner.size_hint()
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { cursor: self.cursor.clone() }
    }
}
