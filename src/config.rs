use serde::{Deserialize, Serialize};

/// Largest padded dimension accepted unless configured otherwise.
pub const DEFAULT_MAX_SIZE: usize = 2048;

/// What to do with a matrix that has more rows than columns or vice versa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapePolicy {
    /// Pad to the larger dimension with zero-cost dummy rows or columns.
    #[default]
    Pad,
    /// Fail with [`InputError::NotSquare`](crate::InputError::NotSquare).
    Reject,
}

/// What to do with negative entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NegativePolicy {
    /// Fail with [`InputError::Negative`](crate::InputError::Negative).
    #[default]
    Reject,
    /// Subtract the global minimum from the working copy before solving.
    ///
    /// Every assignment picks exactly one entry per row, so a uniform shift
    /// leaves the optimum unchanged. The reported cost is always summed over
    /// the caller's original entries.
    Shift,
}

/// Solver settings.
///
/// Deserializes from partial documents; missing keys take their defaults.
///
/// ```
/// use hungarian::{NegativePolicy, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_max_size(64)
///     .with_negative(NegativePolicy::Shift)
///     .with_steps(true);
/// assert_eq!(config.max_size, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Upper bound on the padded dimension N.
    pub max_size: usize,
    pub shape: ShapePolicy,
    pub negative: NegativePolicy,
    /// Keep a [`Step`](crate::Step) log in the solution.
    pub record_steps: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            shape: ShapePolicy::default(),
            negative: NegativePolicy::default(),
            record_steps: false,
        }
    }
}

impl SolverConfig {
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_shape(mut self, shape: ShapePolicy) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_negative(mut self, negative: NegativePolicy) -> Self {
        self.negative = negative;
        self
    }

    pub fn with_steps(mut self, record_steps: bool) -> Self {
        self.record_steps = record_steps;
        self
    }
}
