//! Snapshots of the solver's working state.
//!
//! A renderer walks these in order to show the reductions, covering lines and
//! adjustments that actually happened for a given input.

use std::fmt;

use nalgebra::DMatrix;

use crate::cost::Cost;

/// What the solver just did.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    /// Each row minimum was subtracted from its row.
    RowReduction,
    /// Each column minimum was subtracted from its column.
    ColumnReduction,
    /// Starred columns were covered; `lines` is the number of covering lines.
    Cover { lines: usize },
    /// `delta` was subtracted from uncovered entries and added to entries
    /// covered twice.
    Adjustment { delta: T },
    /// Primes along `path` became stars and the stars on it were removed.
    /// The path alternates prime, star, prime, ... starting at a prime.
    Augment { path: Vec<(usize, usize)> },
    /// The starred zeros form the final assignment.
    Complete,
}

impl<T> Phase<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::RowReduction => "row reduction",
            Phase::ColumnReduction => "column reduction",
            Phase::Cover { .. } => "cover",
            Phase::Adjustment { .. } => "adjustment",
            Phase::Augment { .. } => "augment",
            Phase::Complete => "complete",
        }
    }
}

impl<T: fmt::Display> fmt::Display for Phase<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Cover { lines } => write!(f, "cover ({lines} lines)"),
            Phase::Adjustment { delta } => write!(f, "adjustment by {delta}"),
            Phase::Augment { path } => write!(f, "augment along {} zeros", path.len()),
            _ => f.write_str(self.name()),
        }
    }
}

/// One entry of the step log.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<T: Cost> {
    phase: Phase<T>,
    matrix: DMatrix<T>,
    covered_rows: Vec<bool>,
    covered_cols: Vec<bool>,
    starred: Vec<(usize, usize)>,
    primed: Vec<(usize, usize)>,
}

impl<T: Cost> Step<T> {
    pub(crate) fn new(
        phase: Phase<T>,
        matrix: DMatrix<T>,
        covered_rows: Vec<bool>,
        covered_cols: Vec<bool>,
        starred: Vec<(usize, usize)>,
        primed: Vec<(usize, usize)>,
    ) -> Self {
        Self {
            phase,
            matrix,
            covered_rows,
            covered_cols,
            starred,
            primed,
        }
    }

    pub fn phase(&self) -> &Phase<T> {
        &self.phase
    }

    /// The reduced square matrix at this point.
    pub fn matrix(&self) -> &DMatrix<T> {
        &self.matrix
    }

    pub fn covered_rows(&self) -> &[bool] {
        &self.covered_rows
    }

    pub fn covered_cols(&self) -> &[bool] {
        &self.covered_cols
    }

    /// Starred zeros as `(row, col)`, sorted by row.
    pub fn starred(&self) -> &[(usize, usize)] {
        &self.starred
    }

    /// Primed zeros as `(row, col)`, sorted by row.
    pub fn primed(&self) -> &[(usize, usize)] {
        &self.primed
    }

    pub fn is_starred(&self, row: usize, col: usize) -> bool {
        self.starred.contains(&(row, col))
    }

    pub fn is_primed(&self, row: usize, col: usize) -> bool {
        self.primed.contains(&(row, col))
    }

    /// Number of covered rows plus covered columns.
    pub fn lines(&self) -> usize {
        self.covered_rows.iter().filter(|&&c| c).count()
            + self.covered_cols.iter().filter(|&&c| c).count()
    }

    /// How many lines pass through the entry: 0, 1 or 2.
    pub fn coverage(&self, row: usize, col: usize) -> usize {
        usize::from(self.covered_rows[row]) + usize::from(self.covered_cols[col])
    }
}
