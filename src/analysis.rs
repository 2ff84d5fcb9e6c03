//! One complete analysis: workbook + assumptions → segment results and project summary.

use tracing::{info, warn};

use crate::calc::assessment::Assessment;
use crate::calc::cable::CableTable;
use crate::calc::loss::analyze_segments;
use crate::calc::summary::ProjectSummary;
use crate::calc::types::{Assumptions, LossBasis, SegmentResult};
use crate::config::AnalysisConfig;
use crate::io::workbook::Workbook;

/// Results of analyzing one workbook under one set of assumptions.
///
/// Created fresh per run and never mutated; a new workbook means a new `Analysis`.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Assumptions the results were computed with.
    pub assumptions: Assumptions,
    /// One result per network segment, in sheet order.
    pub results: Vec<SegmentResult>,
    /// Project-wide totals over all segments.
    pub summary: ProjectSummary,
}

impl Analysis {
    /// Analyzes every segment of the workbook and aggregates the project summary.
    pub fn run(workbook: &Workbook, cables: &CableTable, assumptions: Assumptions) -> Self {
        let results = analyze_segments(&workbook.segments, cables, &assumptions);
        let summary = ProjectSummary::from_results(&workbook.cost_lines, &results);

        let unmatched = results
            .iter()
            .filter(|r| r.basis == LossBasis::UnmatchedCable)
            .count();
        if unmatched > 0 {
            warn!(unmatched, "segments with unknown cable type computed as lossless");
        }
        info!(
            segments = results.len(),
            total_cost = summary.total_cost,
            roi_pct = summary.roi_pct,
            "analysis complete"
        );

        Self {
            assumptions,
            results,
            summary,
        }
    }

    /// Runs the analysis with the cable table and assumptions of a configuration.
    pub fn with_config(workbook: &Workbook, config: &AnalysisConfig) -> Self {
        Self::run(workbook, &config.cable_table(), config.assumptions)
    }

    /// Results for one location (exact match), or all results for `None`.
    pub fn filtered<'a>(
        &'a self,
        location: Option<&'a str>,
    ) -> impl Iterator<Item = &'a SegmentResult> + 'a {
        self.results
            .iter()
            .filter(move |r| location.is_none_or(|loc| r.location == loc))
    }

    /// Distinct locations in first-seen order.
    pub fn locations(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for r in &self.results {
            if !seen.contains(&r.location.as_str()) {
                seen.push(&r.location);
            }
        }
        seen
    }

    /// Conclusion over the selected rows against the project ROI.
    pub fn assessment(&self, location: Option<&str>) -> Assessment {
        Assessment::from_results(self.filtered(location), self.summary.roi_pct)
    }
}
