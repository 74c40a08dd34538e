//! Minimum-cost assignment with the Hungarian (Kuhn-Munkres) algorithm.
//!
//! Given a cost matrix whose rows are workers and whose columns are jobs,
//! [`solve`] pairs every worker with a distinct job so that the summed cost
//! is as small as possible. It runs in O(N³) and never touches the caller's
//! matrix.
//!
//! ```
//! use hungarian::CostMatrix;
//!
//! let costs = CostMatrix::from_rows(&[[9., 2., 7.], [6., 4., 3.], [5., 8., 1.]])?;
//! let solution = hungarian::solve(&costs)?;
//! assert_eq!(solution.assignment(), &[1, 0, 2]);
//! assert_eq!(solution.cost(), 9.);
//! # Ok::<(), hungarian::Error>(())
//! ```
//!
//! Rectangular matrices are padded with zero-cost dummies and negative
//! entries are rejected unless [`NegativePolicy::Shift`] is configured; see
//! [`SolverConfig`]. With [`SolverConfig::with_steps`] the solution also
//! carries a [`Step`] log of the reductions, covers and adjustments, which a
//! [`Playback`] can walk one step at a time.

mod config;
mod cost;
mod error;
mod hungarian;
mod matrix;
pub mod parse;
pub mod playback;
mod solution;
mod solver;
pub mod steps;

pub use config::{NegativePolicy, ShapePolicy, SolverConfig, DEFAULT_MAX_SIZE};
pub use cost::Cost;
pub use error::{Error, InputError, Result};
pub use matrix::CostMatrix;
pub use playback::{Playback, PlaybackError, PlaybackState};
pub use solution::Solution;
pub use solver::Solver;
pub use steps::{Phase, Step};

/// Solves `costs` with the default [`SolverConfig`].
pub fn solve<T: Cost>(costs: &CostMatrix<T>) -> Result<Solution<T>> {
    Solver::default().solve(costs)
}

/// Solves a matrix given as row vectors with the default [`SolverConfig`].
///
/// ```
/// let solution = hungarian::solve_rows(&[[0, 5], [5, 0]])?;
/// assert_eq!(solution.assignment(), &[0, 1]);
/// assert_eq!(solution.cost(), 0);
/// # Ok::<(), hungarian::Error>(())
/// ```
pub fn solve_rows<T: Cost, R: AsRef<[T]>>(rows: &[R]) -> Result<Solution<T>> {
    solve(&CostMatrix::from_rows(rows)?)
}
