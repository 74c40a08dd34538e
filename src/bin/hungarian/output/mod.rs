pub mod json;
pub mod text;

/// Indices whose flag is set.
pub(crate) fn flagged(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(i, &set)| set.then_some(i))
        .collect()
}
