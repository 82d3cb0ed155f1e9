use std::fmt;

use thiserror::Error;

/// Pipeline stage that detected a violated precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Smoother,
    PeakLocator,
    Normalizer,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Smoother => write!(f, "smoother"),
            Stage::PeakLocator => write!(f, "peak locator"),
            Stage::Normalizer => write!(f, "normalizer"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreprocessError {
    #[error("{stage}: invalid parameter: {reason}")]
    InvalidParameter { stage: Stage, reason: String },

    #[error("{stage}: empty input signal")]
    EmptyInput { stage: Stage },

    #[error("{stage}: degenerate range, every sample equals {value}")]
    DegenerateRange { stage: Stage, value: f64 },
}

impl PreprocessError {
    pub fn invalid(stage: Stage, reason: impl Into<String>) -> Self {
        PreprocessError::InvalidParameter {
            stage,
            reason: reason.into(),
        }
    }

    /// The stage that raised this error.
    pub fn stage(&self) -> Stage {
        match self {
            PreprocessError::InvalidParameter { stage, .. }
            | PreprocessError::EmptyInput { stage }
            | PreprocessError::DegenerateRange { stage, .. } => *stage,
        }
    }
}

pub type Result<T> = std::result::Result<T, PreprocessError>;
