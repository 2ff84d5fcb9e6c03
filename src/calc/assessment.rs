//! Qualitative verdicts on efficiency, losses, and project feasibility.

use std::fmt;

use serde::Serialize;

use super::types::SegmentResult;

/// Verdict on the mean efficiency of the analyzed segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyRating {
    /// Mean efficiency above 95%.
    Excellent,
    /// Mean efficiency above 90%.
    Good,
    NeedsImprovement,
}

impl EfficiencyRating {
    pub fn from_mean_pct(mean_pct: f64) -> Self {
        if mean_pct > 95.0 {
            Self::Excellent
        } else if mean_pct > 90.0 {
            Self::Good
        } else {
            Self::NeedsImprovement
        }
    }
}

/// Verdict on the mean loss of the analyzed segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LossRating {
    /// Mean loss below 1 kW.
    VeryLow,
    /// Mean loss below 3 kW.
    Acceptable,
    High,
}

impl LossRating {
    pub fn from_mean_kw(mean_kw: f64) -> Self {
        if mean_kw < 1.0 {
            Self::VeryLow
        } else if mean_kw < 3.0 {
            Self::Acceptable
        } else {
            Self::High
        }
    }
}

/// Verdict on project feasibility from ROI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiRating {
    /// ROI above 20%.
    Feasible,
    /// ROI above 10%.
    MarginallyFeasible,
    NotFeasible,
}

impl RoiRating {
    pub fn from_roi_pct(roi_pct: f64) -> Self {
        if roi_pct > 20.0 {
            Self::Feasible
        } else if roi_pct > 10.0 {
            Self::MarginallyFeasible
        } else {
            Self::NotFeasible
        }
    }
}

/// Combined conclusion over a set of segment results and the project ROI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    /// Arithmetic mean of segment efficiencies (%), 0 for no segments.
    pub mean_efficiency_pct: f64,
    /// Arithmetic mean of segment losses (kW), 0 for no segments.
    pub mean_loss_kw: f64,
    /// Project ROI (%).
    pub roi_pct: f64,
    pub efficiency: EfficiencyRating,
    pub loss: LossRating,
    pub roi: RoiRating,
}

impl Assessment {
    /// Rates the given results against the project ROI.
    pub fn from_results<'a>(
        results: impl IntoIterator<Item = &'a SegmentResult>,
        roi_pct: f64,
    ) -> Self {
        let (n, efficiency_sum, loss_sum) = results
            .into_iter()
            .fold((0_usize, 0.0_f64, 0.0_f64), |(n, eff, loss), r| {
                (n + 1, eff + r.efficiency_pct, loss + r.loss_kw)
            });
        let (mean_efficiency_pct, mean_loss_kw) = if n == 0 {
            (0.0, 0.0)
        } else {
            (efficiency_sum / n as f64, loss_sum / n as f64)
        };

        Self {
            mean_efficiency_pct,
            mean_loss_kw,
            roi_pct,
            efficiency: EfficiencyRating::from_mean_pct(mean_efficiency_pct),
            loss: LossRating::from_mean_kw(mean_loss_kw),
            roi: RoiRating::from_roi_pct(roi_pct),
        }
    }

    pub fn efficiency_message(&self) -> String {
        let pct = self.mean_efficiency_pct;
        match self.efficiency {
            EfficiencyRating::Excellent => format!("System efficiency is excellent ({pct:.2}%)."),
            EfficiencyRating::Good => format!("System efficiency is good ({pct:.2}%)."),
            EfficiencyRating::NeedsImprovement => {
                format!("System efficiency needs improvement ({pct:.2}%).")
            }
        }
    }

    pub fn loss_message(&self) -> String {
        let kw = self.mean_loss_kw;
        match self.loss {
            LossRating::VeryLow => {
                format!("Power loss is very low ({kw:.2} kW); the network is efficient.")
            }
            LossRating::Acceptable => {
                format!("Power loss is {kw:.2} kW, within acceptable limits.")
            }
            LossRating::High => format!(
                "Power loss is high ({kw:.2} kW); review cable sizing and loading."
            ),
        }
    }

    pub fn roi_message(&self) -> String {
        let roi = self.roi_pct;
        match self.roi {
            RoiRating::Feasible => format!("The project is economically feasible (ROI {roi:.2}%)."),
            RoiRating::MarginallyFeasible => {
                format!("The project is marginally feasible (ROI {roi:.2}%).")
            }
            RoiRating::NotFeasible => format!("The project is not feasible (ROI {roi:.2}%)."),
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Conclusion ---")?;
        writeln!(f, "{}", self.efficiency_message())?;
        writeln!(f, "{}", self.loss_message())?;
        write!(f, "{}", self.roi_message())
    }
}
