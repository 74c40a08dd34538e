use std::io::Write;

use anyhow::Result;
use hungarian::{CostMatrix, Phase, Solution, Step};
use serde::Serialize;

use super::flagged;

#[derive(Serialize)]
struct Report {
    assignment: Vec<Pair>,
    cost: f64,
    unassigned_rows: Vec<usize>,
    unassigned_cols: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<StepReport>>,
}

#[derive(Serialize)]
struct Pair {
    row: usize,
    col: usize,
    cost: f64,
}

#[derive(Serialize)]
struct StepReport {
    phase: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<(usize, usize)>>,
    matrix: Vec<Vec<f64>>,
    covered_rows: Vec<usize>,
    covered_cols: Vec<usize>,
    starred: Vec<(usize, usize)>,
    primed: Vec<(usize, usize)>,
}

impl From<&Step<f64>> for StepReport {
    fn from(step: &Step<f64>) -> Self {
        let (lines, delta, path) = match step.phase() {
            Phase::Cover { lines } => (Some(*lines), None, None),
            Phase::Adjustment { delta } => (None, Some(*delta), None),
            Phase::Augment { path } => (None, None, Some(path.clone())),
            _ => (None, None, None),
        };
        let matrix = step.matrix();

        StepReport {
            phase: step.phase().name(),
            lines,
            delta,
            path,
            matrix: matrix
                .row_iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
            covered_rows: flagged(step.covered_rows()),
            covered_cols: flagged(step.covered_cols()),
            starred: step.starred().to_vec(),
            primed: step.primed().to_vec(),
        }
    }
}

pub fn write<W: Write>(w: &mut W, costs: &CostMatrix<f64>, solution: &Solution<f64>) -> Result<()> {
    let report = Report {
        assignment: solution
            .pairs()
            .map(|(row, col)| Pair {
                row,
                col,
                cost: costs.get(row, col).unwrap_or_default(),
            })
            .collect(),
        cost: solution.cost(),
        unassigned_rows: solution.unassigned_rows().collect(),
        unassigned_cols: solution.unassigned_cols().collect(),
        steps: solution
            .steps()
            .map(|steps| steps.iter().map(StepReport::from).collect()),
    };

    serde_json::to_writer_pretty(&mut *w, &report)?;
    writeln!(w)?;
    Ok(())
}
