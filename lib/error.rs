//! Errors raised while assembling operators.

use thiserror::Error;
use crate::terms::Axis;

/// Every way in which operator construction can be rejected.
///
/// All of these are raised before any matrix is allocated.
#[derive(Debug, Error)]
pub enum HOpError {
    #[error("input cannot be empty")]
    EmptyInput,

    #[error("invalid input: {0}")]
    InvalidShape(String),

    #[error("malformed operator: expected shape {expected:?}, got {got:?}")]
    MalformedOperator { expected: (usize, usize), got: (usize, usize) },

    #[error("spin index {index} is outside the range [1, {spins}]")]
    SpinIndexOutOfRange { index: usize, spins: usize },

    #[error("spin index {0} was given more than once")]
    RepeatedSpinIndex(usize),

    #[error("precession along {axis:?} needs {expected} coefficients, got {got}")]
    CoefficientLength { axis: Axis, expected: usize, got: usize },

    #[error("coupling matrix for {axis:?}{axis:?} must have shape {expected:?}, got {got:?}")]
    CouplingShape {
        axis: Axis,
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("unrecognized option '{0}'")]
    UnrecognizedOption(String),

    #[error("a system must contain at least one spin")]
    ZeroSpins,

    #[error("a system of {0} spins is too large to represent densely")]
    TooManySpins(usize),

    #[error("operator dimensions differ: {0} vs {1}")]
    DimensionMismatch(usize, usize),

    #[error("malformed configuration: {0}")]
    MalformedConfig(String),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type HOpResult<T> = Result<T, HOpError>;
