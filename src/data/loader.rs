use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde_json::Value as JsonValue;

use super::model::Scan;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load raw scans from a plain numeric file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[..]` (one scan), `[[..], ..]`, or
///   `[{ "name": "..", "intensities": [..] }, ..]`
/// * `.csv`  – header row; every column is one scan named by its header
pub fn load_scans(path: &Path) -> Result<Vec<Scan>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let scans = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    if scans.is_empty() {
        bail!("{} contains no scans", path.display());
    }
    info!("Loaded {} scans from {}", scans.len(), path.display());
    Ok(scans)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<Scan>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Parse the JSON layouts accepted by [`load_scans`].
pub fn parse_json(text: &str) -> Result<Vec<Scan>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let items = root.as_array().context("Expected top-level JSON array")?;

    match items.first() {
        None => Ok(Vec::new()),
        Some(JsonValue::Number(_)) => {
            debug!("JSON layout: single scan");
            let intensities = json_array_to_f64(Some(&root), 0, "scan")?;
            Ok(vec![Scan::new("scan_0", intensities)])
        }
        Some(JsonValue::Array(_)) => {
            debug!("JSON layout: array of scans");
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let intensities = json_array_to_f64(Some(item), i, "scan")?;
                    Ok(Scan::new(format!("scan_{i}"), intensities))
                })
                .collect()
        }
        Some(JsonValue::Object(_)) => {
            debug!("JSON layout: scan records");
            items
                .iter()
                .enumerate()
                .map(|(i, item)| json_record_to_scan(item, i))
                .collect()
        }
        Some(other) => bail!("Unexpected JSON element: {other}"),
    }
}

fn json_record_to_scan(rec: &JsonValue, row: usize) -> Result<Scan> {
    let obj = rec
        .as_object()
        .with_context(|| format!("Row {row} is not a JSON object"))?;

    let intensities = json_array_to_f64(obj.get("intensities"), row, "intensities")?;
    let name = match obj.get("name") {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => format!("scan_{row}"),
        Some(other) => other.to_string(),
    };
    Ok(Scan::new(name, intensities))
}

fn json_array_to_f64(val: Option<&JsonValue>, row: usize, col: &str) -> Result<Vec<f64>> {
    let arr = val
        .and_then(|v| v.as_array())
        .with_context(|| format!("Row {row}: missing or invalid '{col}' array"))?;

    arr.iter()
        .enumerate()
        .map(|(j, v)| {
            v.as_f64()
                .with_context(|| format!("Row {row}, {col}[{j}]: not a number"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with scan names, one scan per column.
/// Columns may have different lengths; a column ends at its first blank
/// cell and must stay blank afterwards.
fn load_csv(path: &Path) -> Result<Vec<Scan>> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    read_csv(reader)
}

/// Parse the CSV layout accepted by [`load_scans`] from any reader.
pub fn parse_csv<R: std::io::Read>(input: R) -> Result<Vec<Scan>> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Scan>> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    let mut ended = vec![false; headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() > headers.len() {
            bail!(
                "CSV row {row_no}: {} cells but only {} headers",
                record.len(),
                headers.len()
            );
        }

        for (col_idx, column) in columns.iter_mut().enumerate() {
            let cell = record.get(col_idx).unwrap_or("");
            if cell.is_empty() {
                ended[col_idx] = true;
                continue;
            }
            if ended[col_idx] {
                bail!(
                    "CSV row {row_no}, column '{}': value after a blank cell",
                    headers[col_idx]
                );
            }
            let value = cell.parse::<f64>().with_context(|| {
                format!(
                    "CSV row {row_no}, column '{}': '{cell}' is not a number",
                    headers[col_idx]
                )
            })?;
            column.push(value);
        }
    }

    Ok(headers
        .into_iter()
        .zip(columns)
        .map(|(name, intensities)| Scan::new(name, intensities))
        .collect())
}
