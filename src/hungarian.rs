//! Kuhn-Munkres over a square, non-negative working matrix.
//!
//! The reduced matrix is never rewritten. It is kept implicitly as
//! `costs[(r, c)] - u[r] - v[c]`, and every uncovered row tracks the smallest
//! uncovered value in it (its slack). An adjustment then touches O(N)
//! potentials instead of O(N²) entries, which keeps a full solve at O(N³).

use nalgebra::DMatrix;
use tracing::trace;

use crate::cost::{self, Cost};
use crate::steps::{Phase, Step};

/// Final state of a run.
pub(crate) struct Outcome<T: Cost> {
    /// Column of each row.
    pub assignment: Vec<usize>,
    pub row_potentials: Vec<T>,
    pub col_potentials: Vec<T>,
    pub steps: Option<Vec<Step<T>>>,
}

/// Finds a minimum-cost perfect matching of `costs`.
///
/// `costs` must be square with valid, non-negative entries.
pub(crate) fn hungarian<T: Cost>(costs: &DMatrix<T>, record_steps: bool) -> Outcome<T> {
    debug_assert!(costs.is_square());

    let mut state = Munkres::new(costs, record_steps);
    state.reduce();
    state.star_zeros();

    while state.cover_starred_columns() < state.n {
        let (row, col) = state.prime_until_augmentable();
        state.augment(row, col);
    }

    state.finish()
}

struct Munkres<'a, T: Cost> {
    costs: &'a DMatrix<T>,
    n: usize,
    u: Vec<T>,
    v: Vec<T>,
    star_in_row: Vec<Option<usize>>,
    star_in_col: Vec<Option<usize>>,
    prime_in_row: Vec<Option<usize>>,
    covered_rows: Vec<bool>,
    covered_cols: Vec<bool>,
    slack: Vec<T>,
    slack_col: Vec<usize>,
    steps: Option<Vec<Step<T>>>,
}

impl<'a, T: Cost> Munkres<'a, T> {
    fn new(costs: &'a DMatrix<T>, record_steps: bool) -> Self {
        let n = costs.nrows();
        Self {
            costs,
            n,
            u: vec![T::zero(); n],
            v: vec![T::zero(); n],
            star_in_row: vec![None; n],
            star_in_col: vec![None; n],
            prime_in_row: vec![None; n],
            covered_rows: vec![false; n],
            covered_cols: vec![false; n],
            slack: vec![T::zero(); n],
            slack_col: vec![0; n],
            steps: record_steps.then(Vec::new),
        }
    }

    /// Entry `(row, col)` of the reduced matrix.
    #[inline]
    fn reduced(&self, row: usize, col: usize) -> T {
        let value = self.costs[(row, col)] - self.u[row] - self.v[col];
        // rounding noise on floats
        if value < T::zero() {
            T::zero()
        } else {
            value
        }
    }

    fn reduce(&mut self) {
        // subtract minimum value from each respective row
        for row in 0..self.n {
            self.u[row] = cost::minimum(self.costs.row(row).iter().copied())
                .unwrap_or_else(T::zero);
        }
        self.record(Phase::RowReduction);

        // subtract minimum value from each respective col
        for col in 0..self.n {
            let column = (0..self.n).map(|row| self.costs[(row, col)] - self.u[row]);
            self.v[col] = cost::minimum(column).unwrap_or_else(T::zero);
        }
        self.record(Phase::ColumnReduction);
    }

    /// Stars zeros on distinct rows and columns, lowest row first and then
    /// lowest column.
    fn star_zeros(&mut self) {
        for row in 0..self.n {
            for col in 0..self.n {
                if self.star_in_col[col].is_none() && self.reduced(row, col).is_zero() {
                    self.star_in_row[row] = Some(col);
                    self.star_in_col[col] = Some(row);
                    // no more values are checked on this row
                    break;
                }
            }
        }
    }

    /// Starts a phase: uncovers all rows, drops primes and covers every
    /// starred column. Returns the number of covering lines.
    fn cover_starred_columns(&mut self) -> usize {
        self.covered_rows.fill(false);
        self.prime_in_row.fill(None);
        for col in 0..self.n {
            self.covered_cols[col] = self.star_in_col[col].is_some();
        }

        let lines = self.covered_cols.iter().filter(|&&c| c).count();
        self.record(Phase::Cover { lines });
        lines
    }

    /// Primes uncovered zeros, adjusting the matrix whenever none is left,
    /// until a prime lands on a row without a star. Returns that prime.
    fn prime_until_augmentable(&mut self) -> (usize, usize) {
        self.init_slack();

        loop {
            let (row, min) = self.min_uncovered_row();
            if !min.is_zero() {
                self.adjust(min);
            }

            let col = self.slack_col[row];
            self.prime_in_row[row] = Some(col);
            match self.star_in_row[row] {
                Some(star_col) => {
                    self.covered_rows[row] = true;
                    self.covered_cols[star_col] = false;
                    self.uncover_column(star_col);
                }
                None => return (row, col),
            }
        }
    }

    /// Seeds every row's slack from its first uncovered column, so the
    /// slack column is always an uncovered one whatever the entry values.
    fn init_slack(&mut self) {
        for row in 0..self.n {
            let mut best: Option<(T, usize)> = None;
            for col in 0..self.n {
                if self.covered_cols[col] {
                    continue;
                }

                let value = self.reduced(row, col);
                match best {
                    Some((min, _)) if min <= value => {}
                    _ => best = Some((value, col)),
                }
            }

            // stars < n leaves at least one column uncovered
            let (min, col) =
                best.expect("an uncovered column remains while the matching is incomplete");
            self.slack[row] = min;
            self.slack_col[row] = col;
        }
    }

    /// Uncovered row with the smallest slack, lowest index on ties.
    fn min_uncovered_row(&self) -> (usize, T) {
        (0..self.n)
            .filter(|&row| !self.covered_rows[row])
            .fold(None, |best, row| match best {
                Some((_, min)) if min <= self.slack[row] => best,
                _ => Some((row, self.slack[row])),
            })
            // covered rows never outnumber the stars, and stars < n
            .expect("an uncovered row remains while the matching is incomplete")
    }

    /// Folds a newly uncovered column into the slack of every uncovered row.
    fn uncover_column(&mut self, col: usize) {
        for row in 0..self.n {
            if self.covered_rows[row] {
                continue;
            }

            let value = self.reduced(row, col);
            let tie = value == self.slack[row] && col < self.slack_col[row];
            if value < self.slack[row] || tie {
                self.slack[row] = value;
                self.slack_col[row] = col;
            }
        }
    }

    /// Subtracts `min` from every uncovered entry and adds it to every entry
    /// covered twice.
    fn adjust(&mut self, min: T) {
        for row in 0..self.n {
            if !self.covered_rows[row] {
                self.u[row] += min;
                self.slack[row] -= min;
            }
        }
        for col in 0..self.n {
            if self.covered_cols[col] {
                self.v[col] -= min;
            }
        }

        trace!(delta = ?min, "adjusted uncovered entries");
        self.record(Phase::Adjustment { delta: min });
    }

    /// Swaps stars and primes along the alternating path that starts at the
    /// prime `(row, col)`.
    fn augment(&mut self, row: usize, col: usize) {
        let mut path = vec![(row, col)];
        let mut current = col;
        while let Some(star_row) = self.star_in_col[current] {
            path.push((star_row, current));
            // the star's column was uncovered by priming its row
            let prime_col = self.prime_in_row[star_row].expect("known");
            path.push((star_row, prime_col));
            current = prime_col;
        }

        for &(r, c) in path.iter().skip(1).step_by(2) {
            self.star_in_row[r] = None;
            self.star_in_col[c] = None;
        }
        for &(r, c) in path.iter().step_by(2) {
            self.star_in_row[r] = Some(c);
            self.star_in_col[c] = Some(r);
        }

        trace!(len = path.len(), row, col, "augmented along alternating path");
        self.record(Phase::Augment { path });
    }

    fn finish(mut self) -> Outcome<T> {
        self.covered_rows.fill(false);
        self.prime_in_row.fill(None);
        self.record(Phase::Complete);

        let assignment = self
            .star_in_row
            .iter()
            .map(|col| col.expect("every row holds a star once n columns are covered"))
            .collect();

        Outcome {
            assignment,
            row_potentials: self.u,
            col_potentials: self.v,
            steps: self.steps,
        }
    }

    fn record(&mut self, phase: Phase<T>) {
        if self.steps.is_none() {
            return;
        }

        let step = Step::new(
            phase,
            DMatrix::from_fn(self.n, self.n, |r, c| self.reduced(r, c)),
            self.covered_rows.clone(),
            self.covered_cols.clone(),
            marks(&self.star_in_row),
            marks(&self.prime_in_row),
        );
        if let Some(steps) = self.steps.as_mut() {
            steps.push(step);
        }
    }
}

fn marks(by_row: &[Option<usize>]) -> Vec<(usize, usize)> {
    by_row
        .iter()
        .enumerate()
        .filter_map(|(row, col)| col.map(|c| (row, c)))
        .collect()
}

#[cfg(test)]
mod test {
    use nalgebra::{Matrix2, Matrix4, Matrix5};

    use super::*;

    fn assert_costs(
        costs: &DMatrix<f64>,
        assignment: &[usize],
        cost_expected: f64,
        epsilon: f64,
    ) -> bool {
        (assignment
            .iter()
            .enumerate()
            .map(|(row, &col)| costs[(row, col)])
            .sum::<f64>()
            - cost_expected)
            .abs()
            < epsilon
    }

    fn is_permutation(assignment: &[usize]) -> bool {
        let mut seen = vec![false; assignment.len()];
        assignment
            .iter()
            .all(|&col| col < seen.len() && !std::mem::replace(&mut seen[col], true))
    }

    /// Minimum over all n! permutations, enumerated with Heap's algorithm.
    fn brute_force(costs: &DMatrix<f64>) -> f64 {
        let n = costs.nrows();
        let mut perm: Vec<usize> = (0..n).collect();
        let cost_of = |p: &[usize]| p.iter().enumerate().map(|(r, &c)| costs[(r, c)]).sum::<f64>();
        let mut best = cost_of(&perm);
        let mut counters = vec![0; n];
        let mut i = 1;
        while i < n {
            if counters[i] < i {
                if i % 2 == 0 {
                    perm.swap(0, i);
                } else {
                    perm.swap(counters[i], i);
                }
                best = best.min(cost_of(&perm));
                counters[i] += 1;
                i = 1;
            } else {
                counters[i] = 0;
                i += 1;
            }
        }
        best
    }

    #[test]
    fn basic_two() {
        #[rustfmt::skip]
        let costs = Matrix2::from_row_slice(
            &[
                1., 2.,
                2., 1.,
            ]
        );
        let costs = DMatrix::from_iterator(2, 2, costs.iter().copied());
        let outcome = hungarian(&costs, false);
        assert_eq!(outcome.assignment, vec![0, 1]);
        assert!(assert_costs(&costs, &outcome.assignment, 2., f64::EPSILON));
    }

    #[test]
    fn basic_two_rev() {
        #[rustfmt::skip]
        let costs = Matrix2::from_row_slice(
            &[
                1., 2.,
                2., 100.
            ]
        );
        let costs = DMatrix::from_iterator(2, 2, costs.iter().copied());
        let outcome = hungarian(&costs, false);
        assert_eq!(outcome.assignment, vec![1, 0]);
        assert!(assert_costs(&costs, &outcome.assignment, 4., f64::EPSILON));
    }

    #[test]
    fn basic_four() {
        #[rustfmt::skip]
        let costs = Matrix4::from_row_slice(
            &[
                82., 83., 69., 92.,
                77., 37., 49., 92.,
                11., 69.,  5., 86.,
                 8.,  9., 98., 23.,
            ]
        );
        let costs = DMatrix::from_iterator(4, 4, costs.iter().copied());
        let outcome = hungarian(&costs, false);
        assert!(is_permutation(&outcome.assignment));
        assert!(assert_costs(&costs, &outcome.assignment, 140., f64::EPSILON));
    }

    #[test]
    fn basic_five() {
        #[rustfmt::skip]
        let costs = Matrix5::from_row_slice(
            &[
                10., 5.,13.,15.,16.,
                 3., 9.,18.,13., 6.,
                10., 7., 2., 2., 2.,
                 7.,11., 9., 7.,12.,
                 7., 9.,10., 4.,12.,
            ]
        );
        let costs = DMatrix::from_iterator(5, 5, costs.iter().copied());
        let outcome = hungarian(&costs, false);
        assert!(is_permutation(&outcome.assignment));
        assert!(assert_costs(&costs, &outcome.assignment, 23., f64::EPSILON));
    }

    #[test]
    fn basic_five_2() {
        #[rustfmt::skip]
        let costs = Matrix5::from_row_slice(
            &[
                20., 15., 18., 20., 25.,
                18., 20., 12., 14., 15.,
                21., 23., 25., 27., 25.,
                17., 18., 21., 23., 20.,
                18., 18., 16., 19., 20.,
            ]
        );
        let costs = DMatrix::from_iterator(5, 5, costs.iter().copied());
        let outcome = hungarian(&costs, false);
        assert!(is_permutation(&outcome.assignment));
        assert!(assert_costs(&costs, &outcome.assignment, 86., f64::EPSILON));
    }

    #[test]
    fn integer_potentials_certify_the_optimum() {
        #[rustfmt::skip]
        let costs = DMatrix::<i64>::from_row_slice(4, 4, &[
            82, 83, 69, 92,
            77, 37, 49, 92,
            11, 69,  5, 86,
             8,  9, 98, 23,
        ]);
        let outcome = hungarian(&costs, false);
        let cost: i64 = outcome
            .assignment
            .iter()
            .enumerate()
            .map(|(r, &c)| costs[(r, c)])
            .sum();
        assert_eq!(cost, 140);

        let dual: i64 = outcome.row_potentials.iter().sum::<i64>()
            + outcome.col_potentials.iter().sum::<i64>();
        assert_eq!(dual, cost);
        for r in 0..4 {
            for c in 0..4 {
                assert!(costs[(r, c)] - outcome.row_potentials[r] - outcome.col_potentials[c] >= 0);
            }
        }
    }

    #[test]
    fn matches_brute_force_on_random_matrices() {
        for n in 1..=7 {
            for _ in 0..20 {
                let costs = DMatrix::<f64>::new_random(n, n) * 100.;
                let outcome = hungarian(&costs, false);
                assert!(is_permutation(&outcome.assignment));
                let expected = brute_force(&costs);
                assert!(
                    assert_costs(&costs, &outcome.assignment, expected, 1e-9),
                    "n = {n}, costs = {costs}"
                );
            }
        }
    }

    #[test]
    fn matches_brute_force_with_many_ties() {
        for n in 2..=8 {
            for _ in 0..5 {
                // few distinct values force repeated adjustments over ties
                let costs = DMatrix::<f64>::new_random(n, n).map(|x| (x * 4.).floor());
                let outcome = hungarian(&costs, false);
                assert!(is_permutation(&outcome.assignment));
                assert!(assert_costs(&costs, &outcome.assignment, brute_force(&costs), 1e-9));
            }
        }
    }

    #[test]
    fn step_log_follows_the_phases() {
        #[rustfmt::skip]
        let costs = DMatrix::<i32>::from_row_slice(3, 3, &[
            9, 2, 7,
            6, 4, 3,
            5, 8, 1,
        ]);
        let outcome = hungarian(&costs, true);
        let steps = outcome.steps.expect("recorded");

        #[rustfmt::skip]
        let row_reduced = DMatrix::from_row_slice(3, 3, &[
            7, 0, 5,
            3, 1, 0,
            4, 7, 0,
        ]);
        #[rustfmt::skip]
        let col_reduced = DMatrix::from_row_slice(3, 3, &[
            4, 0, 5,
            0, 1, 0,
            1, 7, 0,
        ]);

        assert_eq!(steps[0].phase(), &Phase::RowReduction);
        assert_eq!(steps[0].matrix(), &row_reduced);
        assert_eq!(steps[1].phase(), &Phase::ColumnReduction);
        assert_eq!(steps[1].matrix(), &col_reduced);
        // greedy stars: (0, 1), (1, 0), (2, 2) already cover everything
        assert_eq!(steps[2].phase(), &Phase::Cover { lines: 3 });
        assert_eq!(steps[2].starred(), &[(0, 1), (1, 0), (2, 2)]);
        assert_eq!(steps[3].phase(), &Phase::Complete);
        assert_eq!(steps.len(), 4);
        assert_eq!(outcome.assignment, vec![1, 0, 2]);
    }

    #[test]
    fn step_log_records_adjustments() {
        #[rustfmt::skip]
        let costs = DMatrix::<i32>::from_row_slice(3, 3, &[
            1, 2, 3,
            2, 4, 6,
            3, 6, 9,
        ]);
        let outcome = hungarian(&costs, true);
        let steps = outcome.steps.expect("recorded");

        let adjustments: Vec<_> = steps
            .iter()
            .filter(|s| matches!(s.phase(), Phase::Adjustment { .. }))
            .collect();
        assert!(!adjustments.is_empty());
        for step in &adjustments {
            // a minimum cover uses fewer lines than n at every adjustment
            assert!(step.lines() < 3);
        }

        let last = steps.last().expect("non-empty");
        assert_eq!(last.phase(), &Phase::Complete);
        assert_eq!(last.starred().len(), 3);
        for &(r, c) in last.starred() {
            assert_eq!(last.matrix()[(r, c)], 0);
        }
        let cost: i32 = outcome
            .assignment
            .iter()
            .enumerate()
            .map(|(r, &c)| costs[(r, c)])
            .sum();
        assert_eq!(cost, 10);
    }

    #[test]
    fn largest_supported_float_entries() {
        let m = f64::max_entry();
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(3, 3, &[
            0., m, m,
            0., m, m,
            0., 0., 0.,
        ]);
        let outcome = hungarian(&costs, false);
        assert!(is_permutation(&outcome.assignment));
        assert!(assert_costs(&costs, &outcome.assignment, m, f64::EPSILON));
        assert!(outcome.row_potentials.iter().all(|u| u.is_finite()));
        assert!(outcome.col_potentials.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn largest_supported_integer_entries() {
        let m = i64::max_entry();
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(3, 3, &[
            0, m, m,
            0, m, m,
            m, 0, m,
        ]);
        let outcome = hungarian(&costs, false);
        assert!(is_permutation(&outcome.assignment));
        let cost = outcome
            .assignment
            .iter()
            .enumerate()
            .map(|(r, &c)| costs[(r, c)])
            .try_fold(0i64, i64::checked_add);
        assert_eq!(cost, Some(m));
    }

    #[test]
    fn slack_column_is_uncovered_when_all_entries_are_equal() {
        let m = i64::max_entry();
        let costs = DMatrix::from_element(4, 4, m);
        let outcome = hungarian(&costs, true);
        assert!(is_permutation(&outcome.assignment));
        for step in outcome.steps.expect("recorded") {
            for &(r, c) in step.primed() {
                assert!(!step.is_starred(r, c));
            }
        }
    }

    #[test]
    fn empty_matrix() {
        let costs = DMatrix::<f64>::zeros(0, 0);
        let outcome = hungarian(&costs, true);
        assert!(outcome.assignment.is_empty());
        let steps = outcome.steps.expect("recorded");
        assert_eq!(steps.last().map(Step::phase), Some(&Phase::Complete));
    }
}
