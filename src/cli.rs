use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use spectral_prep::{FlatPolicy, PreprocessConfig};

#[derive(Parser)]
#[command(
    name = "spectral-prep",
    version,
    about = "Smooth, peak-pick and normalize instrument intensity traces",
    long_about = "Reads plain numeric scans (.json or .csv), runs smoothing, peak detection\n\
                  and min-max normalization on each, and writes a JSON or CSV report."
)]
pub struct Cli {
    /// Input file with one or more scans (.json or .csv)
    pub input: PathBuf,

    /// JSON config file; command-line flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of samples averaged by the smoother
    #[arg(long)]
    pub window_size: Option<usize>,

    /// Minimum prominence of a reported peak
    #[arg(long)]
    pub min_prominence: Option<f64>,

    /// Minimum index distance between reported peaks
    #[arg(long)]
    pub min_spacing: Option<usize>,

    /// Handling of constant signals: error, zero or midpoint
    #[arg(long)]
    pub flat_policy: Option<FlatPolicy>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One record per scan with peaks and both output traces
    Json,
    /// One row per sample: scan,index,raw,smoothed,normalized,is_peak
    Csv,
}

impl Cli {
    /// Start from the config file (or defaults) and apply flag overrides.
    pub fn resolve_config(&self) -> anyhow::Result<PreprocessConfig> {
        let mut config = match &self.config {
            Some(path) => PreprocessConfig::from_json_file(path)?,
            None => PreprocessConfig::default(),
        };
        if let Some(w) = self.window_size {
            config.window_size = w;
        }
        if let Some(p) = self.min_prominence {
            config.min_prominence = p;
        }
        if let Some(s) = self.min_spacing {
            config.min_spacing = s;
        }
        if let Some(policy) = self.flat_policy {
            config.flat_policy = policy;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "spectral-prep",
            "scans.json",
            "--window-size",
            "5",
            "--min-spacing",
            "4",
            "--flat-policy",
            "zero",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.window_size, 5);
        assert_eq!(config.min_spacing, 4);
        assert_eq!(config.min_prominence, 0.0);
        assert_eq!(config.flat_policy, FlatPolicy::Zero);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let cli = Cli::parse_from(["spectral-prep", "scans.csv", "--window-size", "0"]);
        assert!(cli.resolve_config().is_err());
    }
}
