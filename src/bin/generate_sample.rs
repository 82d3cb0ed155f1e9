use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use spectral_prep::data::model::Scan;
use spectral_prep::data::synthetic::{synthetic_scan, SyntheticPeak};

const SEED: u64 = 42;
const N_SAMPLES: usize = 600;

/// Usage: `generate_sample [OUTPUT]` (default `sample_scans.json`).
fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_scans.json"));

    let mut rng = StdRng::seed_from_u64(SEED);

    let analytes = [
        (
            "sample_a",
            [
                SyntheticPeak::new(120.0, 6.0, 80.0),
                SyntheticPeak::new(310.0, 4.0, 45.0),
                SyntheticPeak::new(450.0, 9.0, 30.0),
            ],
        ),
        (
            "sample_b",
            [
                SyntheticPeak::new(150.0, 5.0, 60.0),
                SyntheticPeak::new(280.0, 7.0, 70.0),
                SyntheticPeak::new(500.0, 3.5, 40.0),
            ],
        ),
        (
            "sample_c",
            [
                SyntheticPeak::new(90.0, 8.0, 95.0),
                SyntheticPeak::new(330.0, 5.0, 35.0),
                SyntheticPeak::new(410.0, 4.0, 55.0),
            ],
        ),
    ];
    let loads = [0.5, 1.0, 2.0];

    let mut scans = Vec::new();
    for (name, peaks) in &analytes {
        for &load in &loads {
            let scaled: Vec<SyntheticPeak> = peaks
                .iter()
                .map(|p| SyntheticPeak::new(p.center, p.width, p.amplitude * load))
                .collect();
            let intensities = synthetic_scan(N_SAMPLES, &scaled, 5.0, 2.0 * load, &mut rng);
            scans.push(Scan::new(format!("{name}_x{load}"), intensities));
        }
    }

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    serde_json::to_writer(std::io::BufWriter::new(file), &scans)
        .context("writing sample scans")?;

    info!("generated {} scans with seed {SEED}", scans.len());
    println!(
        "Wrote {} scans ({N_SAMPLES} samples each) to {}",
        scans.len(),
        output_path.display()
    );
    Ok(())
}
