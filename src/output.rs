use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use spectral_prep::data::model::ScanReport;

use crate::cli::OutputFormat;

/// One sample of one scan in the long-format CSV report.
#[derive(Serialize)]
struct SampleRow<'a> {
    scan: &'a str,
    index: usize,
    raw: f64,
    smoothed: f64,
    normalized: f64,
    is_peak: bool,
}

/// Open the report destination: a file, or stdout.
pub fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("creating {}", p.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    })
}

/// Write the reports in `format`. `raw` holds the input samples of each scan,
/// in the same order as `reports`.
pub fn write_reports<W: Write>(
    sink: W,
    format: OutputFormat,
    reports: &[ScanReport],
    raw: &[&[f64]],
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(sink, reports),
        OutputFormat::Csv => write_csv(sink, reports, raw),
    }
}

fn write_json<W: Write>(mut sink: W, reports: &[ScanReport]) -> Result<()> {
    serde_json::to_writer_pretty(&mut sink, reports).context("serializing JSON report")?;
    sink.write_all(b"\n")?;
    sink.flush()?;
    Ok(())
}

/// Failed scans have no samples to report and are left out.
fn write_csv<W: Write>(sink: W, reports: &[ScanReport], raw: &[&[f64]]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    for (report, samples) in reports.iter().zip(raw) {
        if report.is_failure() {
            continue;
        }
        for (index, &value) in samples.iter().enumerate() {
            writer
                .serialize(SampleRow {
                    scan: &report.name,
                    index,
                    raw: value,
                    smoothed: report.smoothed[index],
                    normalized: report.normalized[index],
                    is_peak: report.peaks.iter().any(|p| p.index == index),
                })
                .with_context(|| format!("writing CSV row for {} [{index}]", report.name))?;
        }
    }
    writer.flush().context("flushing CSV report")?;
    Ok(())
}
