//! Lazy, composable query operators over any sequence of values.
//!
//! A [`Query`] wraps a type-erased [`Cursor`]. Lazy operators (`select`,
//! `where_by`, `take`, `zip`, ...) stack new cursor strategies and do no work
//! until the query is traversed; eager operators (`order_by`, `distinct`,
//! `group_by`, joins, ...) materialize their result into a shared buffer.
//!
//! ```
//! let evens: Vec<i32> = sequery::from_iter(0..10).where_by(|x| x % 2 == 0).select(|x| x * x).to_vec();
//! assert_eq!(evens, vec![0, 4, 16, 36, 64]);
//! ```

pub mod cursor;
pub mod cursors;
pub mod error;
pub mod operators;
pub mod query;
pub mod random;

pub use cursor::{BoxedCursor, Cursor, Iter, Position, SequenceCursor};
pub use error::{Error, ErrorCode, Result};
pub use operators::{FullJoinRow, GroupJoinRow, Grouping, JoinRow};
pub use query::{IntoQuery, Query, empty, from, from_iter, from_shared, from_values};
pub use random::{RandomSource, RandomSourceBuilder, Unbounded, from_random, from_random_with};
