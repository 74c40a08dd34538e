use tracing::debug;

use crate::config::SolverConfig;
use crate::cost::{self, Cost};
use crate::error::{InputError, Result};
use crate::hungarian::hungarian;
use crate::matrix::CostMatrix;
use crate::solution::Solution;

/// A configured assignment solver.
///
/// Holds no state between calls; a single instance can serve any number of
/// threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Finds a minimum-cost assignment of rows to columns.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) when the matrix
    /// breaks a configured policy, holds NaN or infinite entries, holds
    /// entries above [`Cost::max_entry`] or has a total cost that overflows
    /// `T`, and [`Error::SizeLimitExceeded`](crate::Error::SizeLimitExceeded)
    /// when its padded dimension is above `max_size`.
    pub fn solve<T: Cost>(&self, costs: &CostMatrix<T>) -> Result<Solution<T>> {
        let work = costs.working_copy(&self.config)?;
        let (rows, cols) = costs.shape();
        debug!(
            rows,
            cols,
            size = work.nrows(),
            shape = ?self.config.shape,
            negative = ?self.config.negative,
            "solving assignment problem"
        );

        let outcome = hungarian(&work, self.config.record_steps);
        let original = costs.as_matrix();
        let cost = cost::total(
            outcome
                .assignment
                .iter()
                .enumerate()
                .filter(|&(row, &col)| row < rows && col < cols)
                .map(|(row, &col)| original[(row, col)]),
        )
        .ok_or(InputError::Overflow)?;
        debug!(
            cost = ?cost,
            steps = outcome.steps.as_ref().map_or(0, Vec::len),
            "assignment complete"
        );

        Ok(Solution::new(
            outcome.assignment,
            (rows, cols),
            cost,
            (outcome.row_potentials, outcome.col_potentials),
            outcome.steps,
        ))
    }
}
