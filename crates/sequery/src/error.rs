//! Error type shared by every fallible query operator.

use core::fmt;

/// The closed set of failures a query can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A value was requested from a sequence that has none.
    EmptyResult,
    /// `single` found more than one element.
    MultipleElements,
    /// `element_at` was given an index past the end of the sequence.
    IndexOutOfRange,
    /// `average` counted more elements than its result type can represent.
    CountOverflow,
}

impl ErrorCode {
    /// Stable identifier, suitable for matching in tests and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EmptyResult => "empty-result",
            ErrorCode::MultipleElements => "multiple-elements",
            ErrorCode::IndexOutOfRange => "index-out-of-range",
            ErrorCode::CountOverflow => "count-overflow",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({code})")]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
}

impl Error {
    pub fn from_code(code: ErrorCode, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into() }
    }

    pub fn empty_result() -> Self {
        Self::from_code(ErrorCode::EmptyResult, "get a value from an empty sequence")
    }

    pub fn multiple_elements() -> Self {
        Self::from_code(ErrorCode::MultipleElements, "the sequence does not contain exactly one element")
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::from_code(
            ErrorCode::IndexOutOfRange,
            format!("index {index} is out of range for a sequence of {len} elements"),
        )
    }

    pub fn count_overflow(count: usize) -> Self {
        Self::from_code(ErrorCode::CountOverflow, format!("{count} elements cannot be counted in the result type"))
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

pub type Result<T> = core::result::Result<T, Error>;
