use crate::cost::Cost;
use crate::steps::Step;

/// An optimal assignment together with its total cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<T: Cost> {
    assignment: Vec<usize>,
    rows: usize,
    cols: usize,
    cost: T,
    row_potentials: Vec<T>,
    col_potentials: Vec<T>,
    steps: Option<Vec<Step<T>>>,
}

impl<T: Cost> Solution<T> {
    pub(crate) fn new(
        assignment: Vec<usize>,
        shape: (usize, usize),
        cost: T,
        potentials: (Vec<T>, Vec<T>),
        steps: Option<Vec<Step<T>>>,
    ) -> Self {
        Self {
            assignment,
            rows: shape.0,
            cols: shape.1,
            cost,
            row_potentials: potentials.0,
            col_potentials: potentials.1,
            steps,
        }
    }

    /// Column chosen for each row of the square (padded) problem.
    ///
    /// A bijection over `0..dimension()`. Indices at or beyond the original
    /// row or column count refer to zero-cost dummies.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Sum of the original entries over [`pairs`](Self::pairs).
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Shape of the matrix that was solved, before padding.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn dimension(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// `(row, col)` pairs between real rows and real columns, by row.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.assignment
            .iter()
            .copied()
            .enumerate()
            .filter(|&(row, col)| row < self.rows && col < self.cols)
    }

    /// Column assigned to `row`, or `None` when the row got a dummy column
    /// or is out of range.
    pub fn column_for(&self, row: usize) -> Option<usize> {
        self.assignment
            .get(row)
            .copied()
            .filter(|&col| row < self.rows && col < self.cols)
    }

    /// Real rows left without a real column.
    pub fn unassigned_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows).filter(|&row| self.assignment[row] >= self.cols)
    }

    /// Real columns left without a real row.
    pub fn unassigned_cols(&self) -> impl Iterator<Item = usize> + '_ {
        let cols = self.cols;
        self.assignment
            .iter()
            .copied()
            .enumerate()
            .filter(move |&(row, col)| row >= self.rows && col < cols)
            .map(|(_, col)| col)
    }

    /// Dual variables of the working matrix: `working[(r, c)] - u[r] - v[c]`
    /// is non-negative everywhere and zero on the assignment.
    pub fn potentials(&self) -> (&[T], &[T]) {
        (&self.row_potentials, &self.col_potentials)
    }

    /// The step log, when it was requested.
    pub fn steps(&self) -> Option<&[Step<T>]> {
        self.steps.as_deref()
    }

    pub fn into_steps(self) -> Option<Vec<Step<T>>> {
        self.steps
    }
}
