//! Infinite random sequences.
//!
//! A random sequence has no natural end, so it is not a [`Query`]. It is an
//! [`Unbounded`] handle that only offers operators that stay lazy, plus
//! `take` and `take_while`, which impose the bound and return an ordinary
//! `Query`.

use std::cell::RefCell;
use std::rc::Rc;

use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cursor::{BoxedCursor, Cursor, Iter, SequenceCursor};
use crate::cursors::{FilterCursor, Predicate, SelectCursor, Selector, SkipCursor, SkipWhileCursor, TakeCursor, TakeWhileCursor};
use crate::error::Result;
use crate::query::Query;

/// Draws one value per position from a generator shared by every copy.
/// Reading a position twice gives the same value; stepping draws the next one.
pub struct RandomCursor<'a, S, T> {
    rng: Rc<RefCell<StdRng>>,
    selector: Selector<'a, S, T>,
    head: T,
}

impl<'a, S, T> RandomCursor<'a, S, T>
where
    Standard: Distribution<S>,
{
    fn new(rng: Rc<RefCell<StdRng>>, selector: Selector<'a, S, T>) -> Self {
        let head = Self::draw(&rng, &selector);
        Self { rng, selector, head }
    }

    fn draw(rng: &RefCell<StdRng>, selector: &Selector<'a, S, T>) -> T {
        let drawn: S = rng.borrow_mut().r#gen();
        selector(drawn)
    }
}

impl<'a, S, T> SequenceCursor<'a, T> for RandomCursor<'a, S, T>
where
    Standard: Distribution<S>,
    S: 'a,
    T: Clone + 'a,
{
    fn current(&self) -> Option<T> {
        Some(self.head.clone())
    }

    fn is_exhausted(&self) -> bool {
        false
    }

    fn step(&mut self) {
        self.head = Self::draw(&self.rng, &self.selector);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }

    fn boxed_clone(&self) -> BoxedCursor<'a, T> {
        Box::new(Self { rng: Rc::clone(&self.rng), selector: Rc::clone(&self.selector), head: self.head.clone() })
    }
}

/// A shared random generator that hands out unbounded sequences.
#[derive(Clone)]
pub struct RandomSource {
    rng: Rc<RefCell<StdRng>>,
}

impl RandomSource {
    /// Entropy-seeded source.
    pub fn new() -> Self {
        RandomSourceBuilder::new().build()
    }

    /// Every value drawn from the generator, unchanged.
    pub fn values<'a, T: Clone + 'a>(&self) -> Unbounded<'a, T>
    where
        Standard: Distribution<T>,
    {
        self.select(|value: T| value)
    }

    /// Draw an `S` per position and map it through `selector`.
    pub fn select<'a, S: 'a, T: Clone + 'a>(&self, selector: impl Fn(S) -> T + 'a) -> Unbounded<'a, T>
    where
        Standard: Distribution<S>,
    {
        Unbounded::from_cursor(Cursor::new(RandomCursor::new(Rc::clone(&self.rng), Rc::new(selector))))
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RandomSourceBuilder {
    seed: Option<u64>,
}

impl RandomSourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the source deterministic.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> RandomSource {
        let rng = match self.seed {
            Some(seed) => {
                tracing::debug!(seed, "random source seeded");
                StdRng::seed_from_u64(seed)
            }
            None => {
                tracing::debug!("random source seeded from entropy");
                StdRng::from_entropy()
            }
        };
        RandomSource { rng: Rc::new(RefCell::new(rng)) }
    }
}

/// Infinite random values of `T`.
pub fn from_random<'a, T: Clone + 'a>() -> Unbounded<'a, T>
where
    Standard: Distribution<T>,
{
    RandomSource::new().values()
}

/// Infinite random values, each drawn as an `S` and passed through `selector`.
pub fn from_random_with<'a, S: 'a, T: Clone + 'a>(selector: impl Fn(S) -> T + 'a) -> Unbounded<'a, T>
where
    Standard: Distribution<S>,
{
    RandomSource::new().select(selector)
}

/// A sequence without an end. Consuming it requires imposing a bound first.
pub struct Unbounded<'a, T> {
    begin: Cursor<'a, T>,
}

impl<T> Clone for Unbounded<'_, T> {
    fn clone(&self) -> Self {
        Self { begin: self.begin.clone() }
    }
}

impl<'a, T: 'a> Unbounded<'a, T> {
    pub(crate) fn from_cursor(begin: Cursor<'a, T>) -> Self {
        Self { begin }
    }

    fn boxed(&self) -> BoxedCursor<'a, T> {
        self.begin.clone().into_boxed()
    }

    pub fn begin(&self) -> Cursor<'a, T> {
        self.begin.clone()
    }

    /// The first value.
    ///
    /// # Errors
    ///
    /// Never fails for a random source; the `Result` mirrors [`Query::first`].
    pub fn first(&self) -> Result<T> {
        self.begin.value()
    }

    /// Infinite iterator; pair it with `Iterator::take` or similar.
    pub fn iter(&self) -> Iter<'a, T> {
        Iter::new(self.begin())
    }

    pub fn select<U: 'a>(&self, selector: impl Fn(T) -> U + 'a) -> Unbounded<'a, U> {
        let selector: Selector<'a, T, U> = Rc::new(selector);
        Unbounded::from_cursor(Cursor::new(SelectCursor::new(self.boxed(), selector)))
    }

    /// Note that creating the filter already searches for the first match.
    #[must_use]
    pub fn where_by(&self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        Self::from_cursor(Cursor::new(FilterCursor::new(self.boxed(), Rc::new(predicate))))
    }

    #[must_use]
    pub fn skip(&self, count: usize) -> Self {
        Self::from_cursor(Cursor::new(SkipCursor::new(self.boxed(), count)))
    }

    #[must_use]
    pub fn skip_while(&self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        let predicate: Predicate<'a, T> = Rc::new(predicate);
        Self::from_cursor(Cursor::new(SkipWhileCursor::new(self.boxed(), &predicate)))
    }

    pub fn take(&self, count: usize) -> Query<'a, T> {
        Query::from_cursor(Cursor::new(TakeCursor::new(self.boxed(), count)))
    }

    pub fn take_while(&self, predicate: impl Fn(&T) -> bool + 'a) -> Query<'a, T> {
        Query::from_cursor(Cursor::new(TakeWhileCursor::new(self.boxed(), Rc::new(predicate))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn take_bounds_random_values() {
        let values = from_random::<u32>().take(16).to_vec();
        assert_eq!(values.len(), 16);
    }

    #[rstest]
    fn seeded_sources_repeat() {
        let a = RandomSourceBuilder::new().with_seed(7).build().values::<u64>().take(5).to_vec();
        let b = RandomSourceBuilder::new().with_seed(7).build().values::<u64>().take(5).to_vec();
        assert_eq!(a, b);
    }

    #[rstest]
    fn selector_shapes_values() {
        let dice = from_random_with(|x: u32| x % 6 + 1).take(100);
        assert!(dice.all(|d| (1..=6).contains(d)));
    }

    #[rstest]
    fn begin_never_reaches_end() {
        let source = from_random::<u8>();
        assert!(!source.begin().is_end());
        assert!(!source.begin().advance().advance().is_end());
    }
}
