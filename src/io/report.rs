//! JSON analysis report.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::analysis::Analysis;
use crate::calc::assessment::Assessment;
use crate::calc::summary::ProjectSummary;
use crate::calc::types::{Assumptions, SegmentResult};

/// Complete report: inputs, project totals, conclusion, and segment rows.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub assumptions: Assumptions,
    /// Location filter applied to `results`, if any.
    pub location: Option<&'a str>,
    pub summary: ProjectSummary,
    pub assessment: Assessment,
    pub results: Vec<&'a SegmentResult>,
}

impl<'a> Report<'a> {
    /// Builds a report over the rows selected by `location`.
    pub fn new(analysis: &'a Analysis, location: Option<&'a str>) -> Self {
        let results: Vec<&SegmentResult> = analysis.filtered(location).collect();
        Self {
            assumptions: analysis.assumptions,
            location,
            summary: analysis.summary,
            assessment: Assessment::from_results(results.iter().copied(), analysis.summary.roi_pct),
            results,
        }
    }
}

/// Writes the report as pretty-printed JSON to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json(report: &Report<'_>, mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()
}

/// Writes the report as JSON to a file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_json(report: &Report<'_>, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_json(report, io::BufWriter::new(file))
}
