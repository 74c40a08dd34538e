//! Reading cost matrices from text.
//!
//! Two formats are accepted:
//!
//! - plain text, one row per line, numbers separated by whitespace and/or
//!   commas; blank lines and lines starting with `#` are ignored,
//! - JSON, an array of arrays of numbers.
//!
//! [`read_matrix`] picks JSON when the first non-blank character is `[`.

use crate::error::{Error, Result};
use crate::matrix::CostMatrix;

/// Parses either format.
pub fn read_matrix(input: &str) -> Result<CostMatrix<f64>> {
    if input.trim_start().starts_with('[') {
        parse_json(input)
    } else {
        parse_text(input)
    }
}

pub fn parse_json(input: &str) -> Result<CostMatrix<f64>> {
    let rows: Vec<Vec<f64>> = serde_json::from_str(input)?;
    CostMatrix::from_rows(&rows)
}

pub fn parse_text(input: &str) -> Result<CostMatrix<f64>> {
    let mut rows = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let row = fields(line)
            .map(|(offset, token)| {
                token.parse::<f64>().map_err(|_| Error::Parse {
                    line: index + 1,
                    column: offset + 1,
                    token: token.to_owned(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    CostMatrix::from_rows(&rows)
}

/// Non-empty fields of `line` with their byte offsets.
fn fields(line: &str) -> impl Iterator<Item = (usize, &str)> {
    let is_separator = |ch: char| ch == ',' || ch.is_whitespace();
    let mut start = None;
    let mut spans = Vec::new();
    for (i, ch) in line.char_indices() {
        match (is_separator(ch), start) {
            (true, Some(s)) => {
                spans.push((s, &line[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, &line[s..]));
    }
    spans.into_iter()
}
