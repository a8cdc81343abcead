use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    LengthMismatch { len_x: usize, len_y: usize },
    NotEnoughPoints { len: usize, needed: usize },
    DegenerateX, // no variance in x
    NonFiniteInput,
    UndefinedMetric(&'static str),
    StatError(&'static str),
}

impl FitError {
    /// Input that cannot support a least squares fit at all.
    pub fn is_degenerate_input(&self) -> bool {
        matches!(self, FitError::NotEnoughPoints { .. } | FitError::DegenerateX)
    }
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::LengthMismatch { len_x, len_y } => {
                write!(f, "x and y have different lengths: {len_x} vs {len_y}")
            },
            FitError::NotEnoughPoints { len, needed } => {
                write!(f, "degenerate input: got {len} points, need at least {needed}")
            },
            FitError::DegenerateX => {
                write!(f, "degenerate input: no variance in predictor")
            },
            FitError::NonFiniteInput => {
                write!(f, "input contains NaN or infinite values")
            },
            FitError::UndefinedMetric(name) => {
                write!(f, "{name} is undefined: zero variance in actual values")
            },
            FitError::StatError(msg) => write!(f, "statistical error: {msg}"),
        }
    }
}

impl std::error::Error for FitError {}

pub type FitResult<T> = Result<T, FitError>;
