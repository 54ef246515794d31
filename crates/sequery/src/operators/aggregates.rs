//! Scalar reductions.

use core::ops::Add;

use num_traits::{Num, NumCast};

use crate::error::{Error, Result};
use crate::query::{IntoQuery, Query};

impl<'a, T: Clone + 'a> Query<'a, T> {
    /// Left fold seeded with the first element.
    ///
    /// # Errors
    ///
    /// `EmptyResult` if the sequence has no elements.
    pub fn aggregate(&self, reducer: impl FnMut(T, T) -> T) -> Result<T> {
        let mut iter = self.iter();
        let seed = iter.next().ok_or_else(Error::empty_result)?;
        Ok(iter.fold(seed, reducer))
    }

    /// Left fold from an explicit seed. An empty sequence yields the seed.
    pub fn aggregate_with<A>(&self, seed: A, reducer: impl FnMut(A, T) -> A) -> A {
        self.iter().fold(seed, reducer)
    }

    /// [`aggregate_with`](Self::aggregate_with) followed by `selector` on the
    /// accumulated value.
    pub fn aggregate_select<A, R>(
        &self,
        seed: A,
        reducer: impl FnMut(A, T) -> A,
        selector: impl FnOnce(A) -> R,
    ) -> R {
        selector(self.aggregate_with(seed, reducer))
    }

    pub fn all(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.iter().all(|value| predicate(&value))
    }

    pub fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.iter().any(|value| predicate(&value))
    }

    /// Mean with the sum accumulated in `R`. Integral `R` truncates the
    /// division. The element count is kept apart and converted once.
    ///
    /// # Errors
    ///
    /// `EmptyResult` if the sequence has no elements, `CountOverflow` if the
    /// element count cannot be represented in `R`.
    pub fn average<R>(&self) -> Result<R>
    where
        T: Into<R>,
        R: Num + NumCast + Copy,
    {
        let (sum, count) = self.iter().fold((R::zero(), 0_usize), |(sum, count), value| (sum + value.into(), count + 1));
        if count == 0 {
            return Err(Error::empty_result());
        }
        let divisor = <R as NumCast>::from(count).ok_or_else(|| Error::count_overflow(count))?;
        Ok(sum / divisor)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|current| current == *value)
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn count_where(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.iter().filter(|value| predicate(value)).count()
    }

    /// # Errors
    ///
    /// `IndexOutOfRange` if `index` is not below the element count.
    pub fn element_at(&self, index: usize) -> Result<T> {
        let mut len = 0;
        for value in self.iter() {
            if len == index {
                return Ok(value);
            }
            len += 1;
        }
        Err(Error::index_out_of_range(index, len))
    }

    /// # Errors
    ///
    /// `EmptyResult` if the sequence has no elements.
    pub fn first(&self) -> Result<T> {
        self.begin().value()
    }

    pub fn first_or_default(&self, value: T) -> T {
        self.first().unwrap_or(value)
    }

    /// # Errors
    ///
    /// `EmptyResult` if the sequence has no elements.
    pub fn last(&self) -> Result<T> {
        self.iter().last().ok_or_else(Error::empty_result)
    }

    pub fn last_or_default(&self, value: T) -> T {
        self.iter().last().unwrap_or(value)
    }

    /// Largest element; the earliest one wins a tie.
    ///
    /// # Errors
    ///
    /// `EmptyResult` if the sequence has no elements.
    pub fn max(&self) -> Result<T>
    where
        T: PartialOrd,
    {
        self.aggregate(|best, value| if best < value { value } else { best })
    }

    /// Smallest element; the earliest one wins a tie.
    ///
    /// # Errors
    ///
    /// `EmptyResult` if the sequence has no elements.
    pub fn min(&self) -> Result<T>
    where
        T: PartialOrd,
    {
        self.aggregate(|best, value| if value < best { value } else { best })
    }

    /// Same length and pairwise equal elements. Stops at the first mismatch.
    pub fn sequence_equal(&self, other: impl IntoQuery<'a, T>) -> bool
    where
        T: PartialEq,
    {
        self.iter().eq(other.into_query().iter())
    }

    /// The only element.
    ///
    /// # Errors
    ///
    /// `EmptyResult` if the sequence is empty, `MultipleElements` if it holds
    /// more than one element.
    pub fn single(&self) -> Result<T> {
        let mut iter = self.iter();
        let value = iter.next().ok_or_else(Error::empty_result)?;
        if iter.next().is_some() {
            return Err(Error::multiple_elements());
        }
        Ok(value)
    }

    /// Like [`single`](Self::single), but an empty sequence yields `value`.
    ///
    /// # Errors
    ///
    /// `MultipleElements` if the sequence holds more than one element.
    pub fn single_or_default(&self, value: T) -> Result<T> {
        if self.is_empty() { Ok(value) } else { self.single() }
    }

    /// # Errors
    ///
    /// `EmptyResult` if the sequence has no elements.
    pub fn sum(&self) -> Result<T>
    where
        T: Add<Output = T>,
    {
        self.aggregate(|acc, value| acc + value)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, ErrorCode, Query, empty, from, from_iter};
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    #[case::max(Query::max)]
    #[case::min(Query::min)]
    #[case::sum(Query::sum)]
    #[case::last(Query::last)]
    #[case::first(Query::first)]
    #[case::single(Query::single)]
    fn reductions_fail_on_empty(#[case] reduce: fn(&Query<'static, i32>) -> crate::Result<i32>) {
        assert_eq!(reduce(&empty()).unwrap_err().code(), ErrorCode::EmptyResult);
    }

    #[rstest]
    fn quantifiers_on_empty() {
        assert!(empty::<i32>().all(|_| false));
        assert!(!empty::<i32>().any(|_| true));
    }

    #[rstest]
    fn aggregate_requires_an_element() {
        assert_eq!(empty::<i32>().aggregate(|a, b| a + b).unwrap_err().code(), ErrorCode::EmptyResult);
        assert_eq!(from(&[1, 2, 3]).aggregate(|a, b| a * 10 + b).unwrap(), 123);
    }

    #[rstest]
    fn aggregate_with_returns_seed_on_empty() {
        assert_eq!(empty::<i32>().aggregate_with(42, |a, b| a + b), 42);
        assert_eq!(empty::<i32>().aggregate_select(5, |a, b| a + b, |acc| acc * 2), 10);
    }

    #[rstest]
    fn aggregate_select_maps_the_result() {
        let text = from(&[1, 2, 3]).aggregate_select(String::new(), |s, x| s + &x.to_string(), |s| s.len());
        assert_eq!(text, 3);
    }

    #[rstest]
    #[case(vec![2, 4, 6], 4)]
    #[case(vec![1, 2], 1)]
    fn average_truncates_integers(#[case] values: Vec<i32>, #[case] expected: i64) {
        assert_eq!(from(&values).average::<i64>().unwrap(), expected);
    }

    #[rstest]
    fn average_counts_beyond_the_accumulator_width() {
        let small = vec![3_i8; 300];
        assert_eq!(from(&small).average::<i16>().unwrap(), 3);
        let many = vec![0_i8; 40_000];
        assert_eq!(from(&many).average::<i16>().unwrap_err().code(), ErrorCode::CountOverflow);
        assert_eq!(from(&many).average::<i32>().unwrap(), 0);
    }

    #[rstest]
    fn average_in_floating_point() {
        let mean = from(&[1_i32, 2]).average::<f64>().unwrap();
        assert!((mean - 1.5).abs() < f64::EPSILON);
        assert_eq!(empty::<i32>().average::<f64>().unwrap_err().code(), ErrorCode::EmptyResult);
    }

    #[rstest]
    fn element_at_checks_bounds() {
        let query = from_iter(10..13);
        assert_eq!(query.element_at(2).unwrap(), 12);
        let err = query.element_at(3).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IndexOutOfRange);
    }

    #[rstest]
    fn element_at_walks_once() {
        let reads = Cell::new(0);
        let query = from_iter(0..3).select(|x| {
            reads.set(reads.get() + 1);
            x
        });
        assert_eq!(query.element_at(5).unwrap_err(), Error::index_out_of_range(5, 3));
        assert_eq!(reads.get(), 3);
    }

    #[rstest]
    fn max_and_min_keep_first_of_equals() {
        let pairs = vec![(1, 'a'), (3, 'b'), (3, 'c'), (1, 'd')];
        let by_key = from(&pairs).select(|(k, c)| Keyed(k, c));
        assert_eq!(by_key.max().unwrap().1, 'b');
        assert_eq!(by_key.min().unwrap().1, 'a');
    }

    #[derive(Clone, Debug)]
    struct Keyed(i32, char);

    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
            self.0.partial_cmp(&other.0)
        }
    }

    #[rstest]
    #[case(vec![], Err(ErrorCode::EmptyResult))]
    #[case(vec![4], Ok(4))]
    #[case(vec![4, 5], Err(ErrorCode::MultipleElements))]
    fn single_outcomes(#[case] values: Vec<i32>, #[case] expected: Result<i32, ErrorCode>) {
        assert_eq!(from(&values).single().map_err(|e| e.code()), expected);
    }

    #[rstest]
    fn single_or_default_still_rejects_many() {
        assert_eq!(empty::<i32>().single_or_default(7).unwrap(), 7);
        assert_eq!(from(&[1, 2]).single_or_default(7).unwrap_err().code(), ErrorCode::MultipleElements);
    }

    #[rstest]
    fn sequence_equal_needs_equal_length() {
        let query = from(&[1, 2, 3]);
        assert!(query.sequence_equal(&[1, 2, 3]));
        assert!(!query.sequence_equal(&[1, 2]));
        assert!(!query.sequence_equal(vec![1, 2, 3, 4]));
    }

    #[rstest]
    fn last_and_defaults() {
        assert_eq!(from(&[1, 2, 3]).last().unwrap(), 3);
        assert_eq!(empty::<i32>().last_or_default(-1), -1);
        assert_eq!(empty::<i32>().first_or_default(1024), 1024);
    }

    #[rstest]
    fn counting() {
        let query = from_iter(0..10);
        assert_eq!(query.count(), 10);
        assert_eq!(query.count_where(|x| x % 3 == 0), 4);
        assert!(query.contains(&9));
        assert!(!query.contains(&10));
        assert!(query.any(|x| *x > 8));
        assert!(!query.all(|x| *x > 0));
    }

    #[rstest]
    fn aggregate_joins_strings_and_sum_adds() {
        let words = vec![String::from("ab"), String::from("cd")];
        let joined = from(&words).aggregate(|a, b| a + &b).unwrap();
        assert_eq!(joined, "abcd");
        assert_eq!(from(&[1, 2, 3]).sum().unwrap(), 6);
    }
}
