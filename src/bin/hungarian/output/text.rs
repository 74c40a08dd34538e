use std::io::Write;

use anyhow::Result;
use hungarian::{Solution, Step};

pub fn write<W: Write>(w: &mut W, solution: &Solution<f64>) -> Result<()> {
    if let Some(steps) = solution.steps() {
        for (i, step) in steps.iter().enumerate() {
            writeln!(w, "step {}: {}", i + 1, step.phase())?;
            write_step(w, step)?;
            writeln!(w)?;
        }
    }

    for (row, col) in solution.pairs() {
        writeln!(w, "{row} -> {col}")?;
    }
    for row in solution.unassigned_rows() {
        writeln!(w, "{row} -> -")?;
    }
    writeln!(w, "cost: {}", solution.cost())?;
    Ok(())
}

/// The reduced matrix with `*` after stars, `'` after primes and `#` marking
/// covered rows and columns.
fn write_step<W: Write>(w: &mut W, step: &Step<f64>) -> Result<()> {
    let matrix = step.matrix();
    let width = matrix
        .iter()
        .map(|x| format!("{x}").len())
        .max()
        .unwrap_or(1)
        + 1;

    for row in 0..matrix.nrows() {
        for col in 0..matrix.ncols() {
            let mark = if step.is_starred(row, col) {
                "*"
            } else if step.is_primed(row, col) {
                "'"
            } else {
                " "
            };
            write!(w, "{:>width$}{mark}", matrix[(row, col)])?;
        }
        let covered = if step.covered_rows()[row] { " #" } else { "" };
        writeln!(w, "{covered}")?;
    }

    if step.covered_cols().iter().any(|&c| c) {
        for &covered in step.covered_cols() {
            write!(w, "{:>width$} ", if covered { "#" } else { "" })?;
        }
        writeln!(w)?;
    }
    Ok(())
}
