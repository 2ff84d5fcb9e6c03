//! Project-wide cost, benefit, and ROI aggregation.

use std::fmt;

use serde::Serialize;

use super::currency::Rupiah;
use super::types::{CostLine, SegmentResult};

/// Project totals derived from the cost ledger and the per-segment results.
///
/// Recomputed from scratch whenever inputs change; holds no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectSummary {
    /// Sum of all cost-line totals (currency).
    pub total_cost: f64,
    /// Sum of all segment annual benefits (currency per year).
    pub total_annual_benefit: f64,
    /// Return on investment: annual benefit as a percentage of total cost.
    pub roi_pct: f64,
}

impl ProjectSummary {
    /// Aggregates cost lines and segment results.
    ///
    /// # Arguments
    ///
    /// * `cost_lines` - Cost ledger rows
    /// * `results` - Per-segment analysis results
    ///
    /// # Returns
    ///
    /// A `ProjectSummary` whose `roi_pct` is 0 when the total cost is not positive.
    pub fn from_results(cost_lines: &[CostLine], results: &[SegmentResult]) -> Self {
        let total_cost: f64 = cost_lines.iter().map(|line| line.total).sum();
        let total_annual_benefit: f64 = results.iter().map(|r| r.annual_benefit).sum();

        let roi_pct = if total_cost > 0.0 {
            total_annual_benefit / total_cost * 100.0
        } else {
            0.0
        };

        Self {
            total_cost,
            total_annual_benefit,
            roi_pct,
        }
    }
}

impl fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Project Summary ---")?;
        writeln!(f, "Total cost:            {}", Rupiah(self.total_cost))?;
        writeln!(
            f,
            "Annual benefit:        {}",
            Rupiah(self.total_annual_benefit)
        )?;
        write!(f, "ROI:                   {:.2}%", self.roi_pct)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::calc::types::{LossBasis, PhaseType};

    fn make_result(annual_benefit: f64) -> SegmentResult {
        SegmentResult {
            location: "X".to_string(),
            phase: PhaseType::ThreePhase,
            loss_kw: annual_benefit / (8760.0 * 1500.0),
            efficiency_pct: 99.0,
            annual_benefit,
            basis: LossBasis::Computed,
        }
    }

    #[test]
    fn roi_from_totals() {
        let costs = vec![
            CostLine::with_total(60_000_000.0),
            CostLine::with_total(40_000_000.0),
        ];
        let results = vec![make_result(10_000_000.0), make_result(5_000_000.0)];
        let summary = ProjectSummary::from_results(&costs, &results);
        assert_eq!(summary.total_cost, 100_000_000.0);
        assert_eq!(summary.total_annual_benefit, 15_000_000.0);
        assert_relative_eq!(summary.roi_pct, 15.0);
    }

    #[test]
    fn zero_cost_gives_zero_roi() {
        let results = vec![make_result(1_000_000.0)];
        let summary = ProjectSummary::from_results(&[CostLine::with_total(0.0)], &results);
        assert_eq!(summary.roi_pct, 0.0);
        assert_eq!(summary.total_annual_benefit, 1_000_000.0);
    }

    #[test]
    fn negative_cost_gives_zero_roi() {
        let summary =
            ProjectSummary::from_results(&[CostLine::with_total(-5.0)], &[make_result(1.0)]);
        assert_eq!(summary.roi_pct, 0.0);
    }

    #[test]
    fn empty_inputs() {
        let summary = ProjectSummary::from_results(&[], &[]);
        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.total_annual_benefit, 0.0);
        assert_eq!(summary.roi_pct, 0.0);
    }

    #[test]
    fn display_formats_currency_and_percent() {
        let summary = ProjectSummary {
            total_cost: 100_000_000.0,
            total_annual_benefit: 15_000_000.0,
            roi_pct: 15.0,
        };
        let s = summary.to_string();
        assert!(s.contains("Total cost:            Rp 100,000,000"));
        assert!(s.contains("ROI:                   15.00%"));
    }
}
