/// Signal stages: smoothing, peak location and normalization.
///
/// Architecture:
/// ```text
///   raw intensities  &[f64]
///        │
///        ▼
///   ┌──────────┐
///   │  smooth   │  trailing moving average → Vec<f64>
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌───────────┐  ┌──────────┐
///   │ normalize  │  │  peaks    │  strict maxima → PeakSet
///   └───────────┘  └──────────┘
///        │
///        ▼
///   values in [0, 1]
/// ```
///
/// Every stage borrows its input and returns a freshly owned result.

pub mod normalize;
pub mod peaks;
pub mod smooth;

pub use normalize::{normalize, normalize_with_policy, FlatPolicy};
pub use peaks::{describe_peaks, find_peaks, prominence, PeakSet, PeakSummary};
pub use smooth::{smooth, WindowSize};
