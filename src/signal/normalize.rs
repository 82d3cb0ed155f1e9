use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{PreprocessError, Result, Stage};

/// What to do with a signal whose samples are all equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatPolicy {
    /// Raise [`PreprocessError::DegenerateRange`].
    #[default]
    Error,
    /// Map every sample to 0.0.
    Zero,
    /// Map every sample to 0.5.
    Midpoint,
}

impl fmt::Display for FlatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatPolicy::Error => write!(f, "error"),
            FlatPolicy::Zero => write!(f, "zero"),
            FlatPolicy::Midpoint => write!(f, "midpoint"),
        }
    }
}

impl FromStr for FlatPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(FlatPolicy::Error),
            "zero" => Ok(FlatPolicy::Zero),
            "midpoint" => Ok(FlatPolicy::Midpoint),
            other => Err(format!(
                "unknown flat policy '{other}' (expected error, zero or midpoint)"
            )),
        }
    }
}

/// Min-max scale `signal` into `[0, 1]`.
///
/// Fails with [`PreprocessError::DegenerateRange`] on a constant signal.
pub fn normalize(signal: &[f64]) -> Result<Vec<f64>> {
    normalize_with_policy(signal, FlatPolicy::Error)
}

/// Min-max scale `signal`, resolving constant signals with `policy`.
pub fn normalize_with_policy(signal: &[f64], policy: FlatPolicy) -> Result<Vec<f64>> {
    if signal.is_empty() {
        return Err(PreprocessError::EmptyInput {
            stage: Stage::Normalizer,
        });
    }
    if let Some(i) = signal.iter().position(|v| !v.is_finite()) {
        return Err(PreprocessError::invalid(
            Stage::Normalizer,
            format!("sample {i} is not finite ({})", signal[i]),
        ));
    }

    let min = signal.iter().copied().fold(f64::INFINITY, f64::min);
    let max = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return match policy {
            FlatPolicy::Error => Err(PreprocessError::DegenerateRange {
                stage: Stage::Normalizer,
                value: min,
            }),
            FlatPolicy::Zero => {
                warn!("flat signal of {} samples mapped to 0.0", signal.len());
                Ok(vec![0.0; signal.len()])
            }
            FlatPolicy::Midpoint => {
                warn!("flat signal of {} samples mapped to 0.5", signal.len());
                Ok(vec![0.5; signal.len()])
            }
        };
    }

    let range = max - min;
    if range.is_finite() {
        Ok(signal.iter().map(|&v| (v - min) / range).collect())
    } else {
        // max - min overflowed; halving is exact for finite normal values.
        let (lo, span) = (min / 2.0, max / 2.0 - min / 2.0);
        Ok(signal.iter().map(|&v| (v / 2.0 - lo) / span).collect())
    }
}
