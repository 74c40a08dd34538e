use nalgebra::{DMatrix, Dim, Matrix, RawStorage};

use crate::config::{NegativePolicy, ShapePolicy, SolverConfig};
use crate::cost::{self, Cost};
use crate::error::{Error, InputError, Result};

/// A rectangular grid of costs: rows are workers, columns are jobs.
///
/// The solver never mutates a `CostMatrix`; it derives a square working copy
/// from it according to the [`SolverConfig`] policies.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix<T: Cost> {
    data: DMatrix<T>,
}

impl<T: Cost> CostMatrix<T> {
    /// The 0x0 matrix.
    pub fn empty() -> Self {
        Self {
            data: DMatrix::from_element(0, 0, T::zero()),
        }
    }

    /// Builds a matrix from row vectors. All rows must have the same length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let expected = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some((row, r)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.as_ref().len() != expected)
        {
            return Err(InputError::Ragged {
                row,
                expected,
                found: r.as_ref().len(),
            }
            .into());
        }

        Ok(Self {
            data: DMatrix::from_fn(rows.len(), expected, |r, c| rows[r].as_ref()[c]),
        })
    }

    /// Builds a `rows x cols` matrix from entries in row-major order.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[T]) -> Result<Self> {
        let expected = rows.checked_mul(cols).unwrap_or(usize::MAX);
        if expected != data.len() {
            return Err(InputError::DataLength {
                expected,
                found: data.len(),
            }
            .into());
        }
        Ok(Self {
            data: DMatrix::from_row_slice(rows, cols, data),
        })
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn is_square(&self) -> bool {
        self.data.is_square()
    }

    /// Dimension of the square problem after padding.
    pub fn dimension(&self) -> usize {
        self.nrows().max(self.ncols())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.data.get((row, col)).copied()
    }

    pub fn as_matrix(&self) -> &DMatrix<T> {
        &self.data
    }

    /// Checks the matrix against `config` and returns the square matrix the
    /// solver works on.
    pub(crate) fn working_copy(&self, config: &SolverConfig) -> Result<DMatrix<T>> {
        let (rows, cols) = self.shape();
        if rows != cols && config.shape == ShapePolicy::Reject {
            return Err(InputError::NotSquare { rows, cols }.into());
        }

        let size = self.dimension();
        if size > config.max_size {
            return Err(Error::SizeLimitExceeded {
                size,
                limit: config.max_size,
            });
        }

        // row-major scan so the first offending entry is reported
        for row in 0..rows {
            for col in 0..cols {
                let value = self.data[(row, col)];
                if !value.is_valid() {
                    return Err(InputError::NonFinite { row, col }.into());
                }
                if value.is_negative() && config.negative == NegativePolicy::Reject {
                    return Err(InputError::Negative { row, col }.into());
                }
            }
        }

        let shift = cost::minimum(self.data.iter().copied())
            .filter(|min| min.is_negative())
            .unwrap_or_else(T::zero);

        // dummies stay zero: every dummy row or column costs the same
        // whatever it is paired with, so the shift cannot change the optimum
        let mut work = DMatrix::from_element(size, size, T::zero());
        for row in 0..rows {
            for col in 0..cols {
                let value = self.data[(row, col)]
                    .checked_sub_cost(shift)
                    .filter(|v| *v <= T::max_entry())
                    .ok_or(InputError::OutOfRange { row, col })?;
                work[(row, col)] = value;
            }
        }
        Ok(work)
    }
}

impl<T: Cost> Default for CostMatrix<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Cost> From<DMatrix<T>> for CostMatrix<T> {
    fn from(data: DMatrix<T>) -> Self {
        Self { data }
    }
}

impl<T, R, C, S> From<&Matrix<T, R, C, S>> for CostMatrix<T>
where
    T: Cost,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    fn from(m: &Matrix<T, R, C, S>) -> Self {
        Self {
            data: DMatrix::from_iterator(m.nrows(), m.ncols(), m.iter().copied()),
        }
    }
}
