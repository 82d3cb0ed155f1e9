use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{PreprocessError, Result, Stage};
use crate::signal::normalize::FlatPolicy;
use crate::signal::peaks::{DEFAULT_MIN_PROMINENCE, DEFAULT_MIN_SPACING};
use crate::signal::smooth::DEFAULT_WINDOW_SIZE;

// ---------------------------------------------------------------------------
// PreprocessConfig – the recognized pipeline options
// ---------------------------------------------------------------------------

/// Pipeline parameters. Missing fields in a config file take the defaults
/// below.
///
/// ```json
/// { "window_size": 5, "min_prominence": 0.02, "min_spacing": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreprocessConfig {
    /// Number of samples averaged by the smoother (default 3).
    pub window_size: usize,
    /// Minimum prominence of a reported peak (default 0, no filtering).
    pub min_prominence: f64,
    /// Minimum index distance between reported peaks (default 1, no filtering).
    pub min_spacing: usize,
    /// Handling of constant signals in the normalizer (default: error).
    pub flat_policy: FlatPolicy,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            min_prominence: DEFAULT_MIN_PROMINENCE,
            min_spacing: DEFAULT_MIN_SPACING,
            flat_policy: FlatPolicy::default(),
        }
    }
}

impl PreprocessConfig {
    /// Read a JSON config file.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: PreprocessConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Check the parameters that do not depend on the signal length.
    /// Whether the window fits is only known once a signal is supplied.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(PreprocessError::invalid(
                Stage::Smoother,
                "window size must be at least 1",
            ));
        }
        if !self.min_prominence.is_finite() || self.min_prominence < 0.0 {
            return Err(PreprocessError::invalid(
                Stage::PeakLocator,
                format!(
                    "minimum prominence must be finite and non-negative, got {}",
                    self.min_prominence
                ),
            ));
        }
        Ok(())
    }
}
