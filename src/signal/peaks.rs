use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use crate::error::{PreprocessError, Result, Stage};

pub const DEFAULT_MIN_PROMINENCE: f64 = 0.0;
pub const DEFAULT_MIN_SPACING: usize = 1;

// ---------------------------------------------------------------------------
// PeakSet – ascending, duplicate-free peak indices
// ---------------------------------------------------------------------------

/// Indices of local maxima, ascending with no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PeakSet(Vec<usize>);

impl PeakSet {
    /// Build from arbitrary indices; sorts and removes duplicates.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let set: BTreeSet<usize> = indices.into_iter().collect();
        PeakSet(set.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl<'a> IntoIterator for &'a PeakSet {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A located peak with its height and prominence, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakSummary {
    pub index: usize,
    pub height: f64,
    pub prominence: f64,
}

// ---------------------------------------------------------------------------
// Peak location
// ---------------------------------------------------------------------------

/// Find strict interior local maxima of `signal`.
///
/// A candidate `i` qualifies when `signal[i]` is strictly greater than both
/// neighbours, so plateaus never count. Candidates whose [`prominence`] is
/// below `min_prominence` are discarded. Afterwards any two peaks closer than
/// `min_spacing` indices are resolved by keeping the higher one, or the
/// earlier one on a tie.
///
/// Signals with fewer than three samples have no interior and yield an empty
/// set.
pub fn find_peaks(signal: &[f64], min_prominence: f64, min_spacing: usize) -> Result<PeakSet> {
    if signal.is_empty() {
        return Err(PreprocessError::EmptyInput {
            stage: Stage::PeakLocator,
        });
    }
    if !min_prominence.is_finite() || min_prominence < 0.0 {
        return Err(PreprocessError::invalid(
            Stage::PeakLocator,
            format!("minimum prominence must be finite and non-negative, got {min_prominence}"),
        ));
    }
    if signal.len() < 3 {
        return Ok(PeakSet::default());
    }

    let mut candidates: Vec<usize> = (1..signal.len() - 1)
        .filter(|&i| signal[i] > signal[i - 1] && signal[i] > signal[i + 1])
        .collect();
    let n_maxima = candidates.len();

    if min_prominence > 0.0 {
        candidates.retain(|&i| prominence(signal, i) >= min_prominence);
    }

    let peaks = if min_spacing > 1 {
        enforce_spacing(signal, candidates, min_spacing)
    } else {
        PeakSet(candidates)
    };

    debug!(
        "{} of {} local maxima kept (min prominence {}, min spacing {})",
        peaks.len(),
        n_maxima,
        min_prominence,
        min_spacing
    );
    Ok(peaks)
}

/// Height of the peak at `index` above the lower of its two adjacent local
/// minima.
///
/// Each minimum is found by walking downhill from the peak until the next
/// sample no longer decreases or the signal ends. A flat run therefore stops
/// the walk: a plateau partway down a slope counts as the adjacent minimum
/// even if the signal falls further beyond it.
pub fn prominence(signal: &[f64], index: usize) -> f64 {
    let mut left = index;
    while left > 0 && signal[left - 1] < signal[left] {
        left -= 1;
    }
    let mut right = index;
    while right + 1 < signal.len() && signal[right + 1] < signal[right] {
        right += 1;
    }
    signal[index] - signal[left].min(signal[right])
}

/// Attach height and prominence to each peak.
pub fn describe_peaks(signal: &[f64], peaks: &PeakSet) -> Vec<PeakSummary> {
    peaks
        .iter()
        .filter(|&&index| index < signal.len())
        .map(|&index| PeakSummary {
            index,
            height: signal[index],
            prominence: prominence(signal, index),
        })
        .collect()
}

/// Greedy spacing filter: visit candidates from highest to lowest and keep
/// each one that is at least `min_spacing` away from every peak kept so far.
fn enforce_spacing(signal: &[f64], mut candidates: Vec<usize>, min_spacing: usize) -> PeakSet {
    // Stable sort: equal heights stay in ascending index order.
    candidates.sort_by(|&a, &b| signal[b].total_cmp(&signal[a]));

    let reach = min_spacing - 1;
    let mut kept: BTreeSet<usize> = BTreeSet::new();
    for i in candidates {
        let lo = i.saturating_sub(reach);
        let hi = i.saturating_add(reach);
        if kept.range(lo..=hi).next().is_none() {
            kept.insert(i);
        }
    }
    PeakSet(kept.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_strict_maxima() {
        let peaks = find_peaks(&[1.0, 3.0, 1.0, 5.0, 1.0, 3.0, 1.0], 0.0, 1).unwrap();
        assert_eq!(peaks.as_slice(), &[1, 3, 5]);
    }

    #[test]
    fn test_plateau_is_not_a_peak() {
        let peaks = find_peaks(&[0.0, 2.0, 2.0, 0.0, 1.0, 0.0], 0.0, 1).unwrap();
        assert_eq!(peaks.as_slice(), &[4]);
    }

    #[test]
    fn test_edges_are_not_peaks() {
        let peaks = find_peaks(&[9.0, 1.0, 2.0, 1.0, 9.0], 0.0, 1).unwrap();
        assert_eq!(peaks.as_slice(), &[2]);
    }

    #[test]
    fn test_short_signals_have_no_peaks() {
        assert!(find_peaks(&[1.0], 0.0, 1).unwrap().is_empty());
        assert!(find_peaks(&[1.0, 2.0], 0.0, 1).unwrap().is_empty());
    }

    #[test]
    fn test_empty_signal_is_an_error() {
        assert_eq!(
            find_peaks(&[], 0.0, 1).unwrap_err(),
            PreprocessError::EmptyInput {
                stage: Stage::PeakLocator
            }
        );
    }

    #[test]
    fn test_prominence_uses_lower_adjacent_minimum() {
        // Peak at 2: left minimum 0.0 (index 0), right minimum 3.0 (index 3).
        let signal = [0.0, 1.0, 4.0, 3.0, 6.0, 0.0];
        assert_eq!(prominence(&signal, 2), 4.0);
        assert_eq!(prominence(&signal, 4), 6.0);
    }

    #[test]
    fn test_prominence_stops_at_valley_plateau() {
        // Left side falls 6 -> 2 -> 2 -> 0 but the walk halts on the 2.0
        // plateau, so the left minimum is 2.0 rather than 0.0.
        let signal = [0.0, 2.0, 2.0, 6.0, 4.0, 5.0];
        assert_eq!(prominence(&signal, 3), 4.0);
        assert!(find_peaks(&signal, 4.5, 1).unwrap().is_empty());
        assert_eq!(find_peaks(&signal, 4.0, 1).unwrap().as_slice(), &[3]);
    }

    #[test]
    fn test_prominence_filter() {
        let signal = [0.0, 5.0, 4.5, 4.8, 4.5, 0.0];
        let all = find_peaks(&signal, 0.0, 1).unwrap();
        assert_eq!(all.as_slice(), &[1, 3]);

        // Index 1 rises 5.0 above the left edge; index 3 only 0.3 above its
        // left valley but 4.8 above the right edge.
        let filtered = find_peaks(&signal, 4.9, 1).unwrap();
        assert_eq!(filtered.as_slice(), &[1]);
    }

    #[test]
    fn test_spacing_drops_lower_peak() {
        let signal = [0.0, 2.0, 0.0, 5.0, 0.0, 3.0, 0.0];
        let peaks = find_peaks(&signal, 0.0, 3).unwrap();
        assert_eq!(peaks.as_slice(), &[3]);

        let peaks = find_peaks(&signal, 0.0, 2).unwrap();
        assert_eq!(peaks.as_slice(), &[1, 3, 5]);
    }

    #[test]
    fn test_spacing_tie_keeps_earlier() {
        let signal = [0.0, 4.0, 0.0, 4.0, 0.0];
        let peaks = find_peaks(&signal, 0.0, 3).unwrap();
        assert_eq!(peaks.as_slice(), &[1]);
    }

    #[test]
    fn test_spacing_holds_between_all_reported_peaks() {
        let signal: Vec<f64> = (0..200)
            .map(|i| {
                let x = i as f64 * 0.37;
                x.sin() * 3.0 + (x * 5.3).cos()
            })
            .collect();
        for spacing in [1, 2, 5, 11, 40] {
            let peaks = find_peaks(&signal, 0.0, spacing).unwrap();
            for pair in peaks.as_slice().windows(2) {
                assert!(pair[0] < pair[1]);
                assert!(pair[1] - pair[0] >= spacing);
            }
            for &i in &peaks {
                assert!(signal[i] > signal[i - 1] && signal[i] > signal[i + 1]);
            }
        }
    }

    #[test]
    fn test_negative_prominence_rejected() {
        let err = find_peaks(&[1.0, 2.0, 1.0], -1.0, 1).unwrap_err();
        assert_eq!(err.stage(), Stage::PeakLocator);
        assert!(find_peaks(&[1.0, 2.0, 1.0], f64::NAN, 1).is_err());
    }

    #[test]
    fn test_describe_peaks() {
        let signal = [1.0, 3.0, 1.0, 5.0, 2.0];
        let peaks = find_peaks(&signal, 0.0, 1).unwrap();
        let summaries = describe_peaks(&signal, &peaks);
        assert_eq!(
            summaries,
            vec![
                PeakSummary {
                    index: 1,
                    height: 3.0,
                    prominence: 2.0
                },
                PeakSummary {
                    index: 3,
                    height: 5.0,
                    prominence: 4.0
                },
            ]
        );
    }

    #[test]
    fn test_peak_set_from_indices_sorts_and_dedups() {
        let set = PeakSet::from_indices([5, 1, 3, 1]);
        assert_eq!(set.as_slice(), &[1, 3, 5]);
        assert!(set.contains(3));
        assert!(!set.contains(2));
    }
}
