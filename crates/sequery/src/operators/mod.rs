//! Operators that need the whole sequence before they can answer.
//!
//! Scalar operators (`first`, `sum`, `count`, ...) walk a private copy of the
//! query and return a value. Buffer operators (`distinct`, `order_by`,
//! `group_by`, joins, ...) walk it once, seal the result into a shared buffer
//! and hand back a new query over that buffer.

mod aggregates;
mod conversions;
mod grouping;
mod joins;
mod ordering;
mod set_ops;

use std::rc::Rc;

use crate::query::Query;

pub use grouping::Grouping;
pub use joins::{FullJoinRow, GroupJoinRow, JoinRow};

impl<'a, T: Clone + 'a> Query<'a, T> {
    /// Wrap a finished buffer and record its size.
    pub(crate) fn sealed(operator: &'static str, buffer: Vec<T>) -> Self {
        tracing::trace!(operator, len = buffer.len(), "buffer sealed");
        Self::from_buffer(Rc::new(buffer))
    }
}
