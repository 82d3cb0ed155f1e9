//! Preprocessing for one-dimensional instrument intensity traces.
//!
//! A raw scan goes through three stages:
//! [`smooth`](fn@signal::smooth) removes high-frequency noise,
//! [`find_peaks`](fn@signal::find_peaks) reports local maxima of the smoothed
//! trace, and [`normalize`](fn@signal::normalize) rescales it into `[0, 1]`.
//! [`preprocess`] runs all three in that order.
//!
//! ```
//! use spectral_prep::{preprocess, PreprocessConfig};
//!
//! let out = preprocess(&[1.0, 3.0, 1.0, 5.0, 1.0, 3.0, 1.0], &PreprocessConfig {
//!     window_size: 1,
//!     ..Default::default()
//! })?;
//! assert_eq!(out.peaks.as_slice(), &[1, 3, 5]);
//! # Ok::<(), spectral_prep::PreprocessError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod signal;

pub use config::PreprocessConfig;
pub use error::{PreprocessError, Result, Stage};
pub use pipeline::{preprocess, preprocess_batch, PreprocessOutput};
pub use signal::{FlatPolicy, PeakSet, PeakSummary};
