mod cli;
mod output;

use clap::Parser;
use log::{error, info, warn};

use cli::Cli;
use spectral_prep::data::loader::load_scans;
use spectral_prep::data::model::ScanReport;
use spectral_prep::preprocess_batch;

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(0) => {}
        Ok(failed) => {
            warn!("{failed} scan(s) failed");
            std::process::exit(1);
        }
        Err(e) => {
            error!("{e:#}");
            std::process::exit(2);
        }
    }
}

/// Process every scan in the input file and write the report.
/// Returns the number of scans that failed.
fn run(cli: &Cli) -> anyhow::Result<usize> {
    let config = cli.resolve_config()?;
    info!("Using {config:?}");

    let scans = load_scans(&cli.input)?;
    let results = preprocess_batch(&scans, &config);

    let reports: Vec<ScanReport> = scans
        .iter()
        .zip(&results)
        .map(|(scan, result)| match result {
            Ok(output) => ScanReport::from_output(scan, output),
            Err(e) => {
                error!("scan '{}': {e}", scan.name);
                ScanReport::failed(scan, e)
            }
        })
        .collect();
    let failed = reports.iter().filter(|r| r.is_failure()).count();

    let raw: Vec<&[f64]> = scans.iter().map(|s| s.intensities.as_slice()).collect();
    let sink = output::open_sink(cli.output.as_deref())?;
    output::write_reports(sink, cli.format, &reports, &raw)?;

    info!(
        "{} of {} scans preprocessed",
        scans.len() - failed,
        scans.len()
    );
    Ok(failed)
}
