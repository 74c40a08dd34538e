/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the solver and the matrix reader.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The matrix violates a precondition of the solver.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The (padded) problem dimension is beyond the configured maximum.
    #[error("matrix dimension {size} exceeds the configured limit of {limit}")]
    SizeLimitExceeded { size: usize, limit: usize },

    /// A text matrix contained a token that is not a number.
    #[error("expected a number at line {line}, column {column}, found `{token}`")]
    Parse {
        line: usize,
        column: usize,
        token: String,
    },

    /// A JSON matrix could not be decoded as an array of number arrays.
    #[error("malformed JSON matrix: {0}")]
    Json(#[from] serde_json::Error),
}

/// The ways a cost matrix can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("matrix is {rows}x{cols} but rectangular input is rejected")]
    NotSquare { rows: usize, cols: usize },

    #[error("row {row} has {found} entries, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("expected {expected} entries for the given shape, found {found}")]
    DataLength { expected: usize, found: usize },

    #[error("entry ({row}, {col}) is not a finite number")]
    NonFinite { row: usize, col: usize },

    #[error("entry ({row}, {col}) is negative")]
    Negative { row: usize, col: usize },

    /// The entry, after any negative shift, is above [`Cost::max_entry`].
    ///
    /// [`Cost::max_entry`]: crate::Cost::max_entry
    #[error("entry ({row}, {col}) is beyond the largest supported cost")]
    OutOfRange { row: usize, col: usize },

    #[error("total cost of the assignment overflows the cost type")]
    Overflow,
}

impl Error {
    /// `true` for errors caused by the shape or content of the input.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Error::SizeLimitExceeded { .. })
    }
}
