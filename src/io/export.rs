//! CSV export of the per-segment result table.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calc::types::{PhaseType, SegmentResult};

/// Column header of the exported result table.
pub const COLUMNS: [&str; 5] = [
    "Location",
    "Phase Type",
    "Loss (kW)",
    "Efficiency (%)",
    "Annual Benefit",
];

/// One exported row, keyed by the public column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Phase Type")]
    pub phase: PhaseType,
    #[serde(rename = "Loss (kW)")]
    pub loss_kw: f64,
    #[serde(rename = "Efficiency (%)")]
    pub efficiency_pct: f64,
    #[serde(rename = "Annual Benefit")]
    pub annual_benefit: f64,
}

impl From<&SegmentResult> for ResultRecord {
    fn from(r: &SegmentResult) -> Self {
        Self {
            location: r.location.clone(),
            phase: r.phase,
            loss_kw: r.loss_kw,
            efficiency_pct: r.efficiency_pct,
            annual_benefit: r.annual_benefit,
        }
    }
}

/// Exports segment results to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv<'a>(
    results: impl IntoIterator<Item = &'a SegmentResult>,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes segment results as CSV to any writer.
///
/// Writes the header even when there are no rows. Numbers use the shortest
/// representation that parses back to the same `f64`.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv<'a>(
    results: impl IntoIterator<Item = &'a SegmentResult>,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for r in results {
        wtr.serialize(ResultRecord::from(r))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Parses a previously exported result table.
///
/// # Errors
///
/// Returns a `csv::Error` if the header or a row does not match the export layout.
pub fn read_csv(reader: impl Read) -> Result<Vec<ResultRecord>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let headers = rdr.headers()?.clone();
    if headers.iter().ne(COLUMNS) {
        return Err(csv::Error::from(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unexpected header: {headers:?}"),
        )));
    }
    rdr.deserialize().collect()
}
