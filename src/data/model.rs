use serde::{Deserialize, Serialize};

use crate::error::PreprocessError;
use crate::pipeline::PreprocessOutput;
use crate::signal::{describe_peaks, PeakSummary};

// ---------------------------------------------------------------------------
// Scan – one raw intensity trace
// ---------------------------------------------------------------------------

/// A single raw trace as handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    /// Label used in reports (file column header, record name, or `scan_<n>`).
    pub name: String,
    /// Intensity samples in acquisition order.
    pub intensities: Vec<f64>,
}

impl Scan {
    pub fn new(name: impl Into<String>, intensities: Vec<f64>) -> Self {
        Scan {
            name: name.into(),
            intensities,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.intensities.len()
    }

    /// Whether the scan has no samples.
    pub fn is_empty(&self) -> bool {
        self.intensities.is_empty()
    }
}

impl AsRef<[f64]> for Scan {
    fn as_ref(&self) -> &[f64] {
        &self.intensities
    }
}

// ---------------------------------------------------------------------------
// ScanReport – pipeline result for one scan
// ---------------------------------------------------------------------------

/// Serializable per-scan result. Exactly one of `error` or the output fields
/// is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub name: String,
    pub len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub peaks: Vec<PeakSummary>,
    pub smoothed: Vec<f64>,
    pub normalized: Vec<f64>,
}

impl ScanReport {
    pub fn from_output(scan: &Scan, output: &PreprocessOutput) -> Self {
        ScanReport {
            name: scan.name.clone(),
            len: scan.len(),
            error: None,
            peaks: describe_peaks(&output.smoothed, &output.peaks),
            smoothed: output.smoothed.clone(),
            normalized: output.normalized.clone(),
        }
    }

    pub fn failed(scan: &Scan, error: &PreprocessError) -> Self {
        ScanReport {
            name: scan.name.clone(),
            len: scan.len(),
            error: Some(error.to_string()),
            peaks: Vec::new(),
            smoothed: Vec::new(),
            normalized: Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
