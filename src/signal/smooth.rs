use log::debug;

use crate::error::{PreprocessError, Result, Stage};

pub const DEFAULT_WINDOW_SIZE: usize = 3;

// ---------------------------------------------------------------------------
// WindowSize – number of samples (inclusive) averaged together
// ---------------------------------------------------------------------------

/// A moving-average window that is known to fit the signal it was checked
/// against: `1 <= size <= signal length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize(usize);

impl WindowSize {
    /// Validate `size` against a signal of `len` samples.
    pub fn for_signal(size: usize, len: usize) -> Result<Self> {
        if size == 0 {
            return Err(PreprocessError::invalid(
                Stage::Smoother,
                "window size must be at least 1",
            ));
        }
        if size > len {
            return Err(PreprocessError::invalid(
                Stage::Smoother,
                format!("window size {size} exceeds signal length {len}"),
            ));
        }
        Ok(WindowSize(size))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Index range of the trailing window anchored at `i`.
    /// Shrinks for the first `size - 1` positions instead of padding.
    fn span(self, i: usize) -> std::ops::RangeInclusive<usize> {
        (i + 1).saturating_sub(self.0)..=i
    }
}

// ---------------------------------------------------------------------------
// Trailing moving average
// ---------------------------------------------------------------------------

/// Causal moving average: output `i` is the mean of
/// `signal[max(0, i - window_size + 1) ..= i]`.
///
/// There is no look-ahead, so the output lags the input by roughly
/// `window_size / 2` samples. A window of 1 returns the input unchanged.
pub fn smooth(signal: &[f64], window_size: usize) -> Result<Vec<f64>> {
    if signal.is_empty() {
        return Err(PreprocessError::EmptyInput {
            stage: Stage::Smoother,
        });
    }
    let window = WindowSize::for_signal(window_size, signal.len())?;
    debug!(
        "smoothing {} samples with trailing window {}",
        signal.len(),
        window.get()
    );

    if window.get() == 1 {
        return Ok(signal.to_vec());
    }

    let smoothed = (0..signal.len())
        .map(|i| window_mean(&signal[window.span(i)]))
        .collect();
    Ok(smoothed)
}

/// Incremental mean of a non-empty window.
///
/// Each step moves the running mean toward the next sample, so the result
/// stays within the window's min and max and a window of equal samples
/// returns that sample exactly.
fn window_mean(samples: &[f64]) -> f64 {
    samples
        .iter()
        .enumerate()
        .fold(0.0, |mean, (k, &v)| mean + (v - mean) / (k + 1) as f64)
}
