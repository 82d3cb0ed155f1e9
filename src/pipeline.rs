use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::PreprocessConfig;
use crate::error::Result;
use crate::signal::{find_peaks, normalize_with_policy, smooth, PeakSet};

/// Everything the pipeline produces for one signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreprocessOutput {
    /// Trailing moving average of the raw signal.
    pub smoothed: Vec<f64>,
    /// Local maxima of `smoothed`.
    pub peaks: PeakSet,
    /// `smoothed` rescaled into `[0, 1]`.
    pub normalized: Vec<f64>,
}

/// Run smooth → find peaks → normalize on one raw signal.
///
/// Peaks are located on the smoothed signal, and the smoothed signal (not the
/// raw one) is what gets normalized. The first stage error is returned as is.
pub fn preprocess(raw: &[f64], config: &PreprocessConfig) -> Result<PreprocessOutput> {
    let smoothed = smooth(raw, config.window_size)?;
    let peaks = find_peaks(&smoothed, config.min_prominence, config.min_spacing)?;
    let normalized = normalize_with_policy(&smoothed, config.flat_policy)?;
    debug!("preprocessed {} samples, {} peaks", raw.len(), peaks.len());
    Ok(PreprocessOutput {
        smoothed,
        peaks,
        normalized,
    })
}

/// Run [`preprocess`] over independent signals in parallel.
///
/// Results come back in input order; a failure in one signal does not affect
/// the others.
pub fn preprocess_batch<S>(
    signals: &[S],
    config: &PreprocessConfig,
) -> Vec<Result<PreprocessOutput>>
where
    S: AsRef<[f64]> + Sync,
{
    info!("preprocessing {} signals", signals.len());
    signals
        .par_iter()
        .map(|signal| preprocess(signal.as_ref(), config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PreprocessError, Stage};
    use crate::signal::FlatPolicy;

    #[test]
    fn test_stages_run_in_order() {
        let raw = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = preprocess(&raw, &PreprocessConfig::default()).unwrap();
        assert_eq!(out.smoothed, vec![1.0, 1.5, 2.0, 3.0, 4.0]);
        assert!(out.peaks.is_empty());
        assert_eq!(out.normalized, vec![0.0, 1.0 / 6.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
    }

    #[test]
    fn test_peaks_found_on_smoothed_signal() {
        // Single-sample spikes at 5 and 7 merge into one hump after smoothing.
        let raw = [0.0, 0.0, 0.0, 0.0, 0.0, 4.0, 0.0, 4.0, 0.0, 0.0, 0.0, 0.0];
        let config = PreprocessConfig::default();
        let out = preprocess(&raw, &config).unwrap();
        assert_eq!(out.peaks.as_slice(), &[7]);
        assert_eq!(out.normalized.len(), raw.len());
    }

    #[test]
    fn test_stage_error_propagates() {
        let err = preprocess(
            &[1.0, 2.0],
            &PreprocessConfig {
                window_size: 5,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.stage(), Stage::Smoother);

        let err = preprocess(&[3.0, 3.0, 3.0], &PreprocessConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::DegenerateRange {
                stage: Stage::Normalizer,
                ..
            }
        ));

        let err = preprocess(&[], &PreprocessConfig::default()).unwrap_err();
        assert_eq!(
            err,
            PreprocessError::EmptyInput {
                stage: Stage::Smoother
            }
        );
    }

    #[test]
    fn test_constant_fractional_signal_is_degenerate() {
        for window_size in [3, 4, 5, 6] {
            let config = PreprocessConfig {
                window_size,
                ..Default::default()
            };
            let err = preprocess(&[0.1; 6], &config).unwrap_err();
            assert_eq!(
                err,
                PreprocessError::DegenerateRange {
                    stage: Stage::Normalizer,
                    value: 0.1
                },
                "window {window_size}"
            );
        }
    }

    #[test]
    fn test_flat_policy_applies_to_pipeline() {
        let config = PreprocessConfig {
            flat_policy: FlatPolicy::Midpoint,
            ..Default::default()
        };
        let out = preprocess(&[3.0, 3.0, 3.0], &config).unwrap();
        assert_eq!(out.normalized, vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let signals = vec![
            vec![1.0, 3.0, 1.0, 5.0, 1.0],
            vec![2.0, 2.0, 2.0],
            vec![0.0, 10.0],
        ];
        let config = PreprocessConfig {
            window_size: 1,
            ..Default::default()
        };
        let results = preprocess_batch(&signals, &config);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().peaks.as_slice(), &[1, 3]);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().normalized, vec![0.0, 1.0]);
    }
}
