//! Core analysis types: network segments, cost lines, assumptions, and results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Electrical supply topology of a segment.
///
/// Serialized with the canonical workbook labels `"1 Phase"` and `"3 Phase"`.
///
/// # Examples
///
/// ```
/// use grid_loss_roi::calc::types::PhaseType;
///
/// assert_eq!(PhaseType::from_label("3 phase"), Some(PhaseType::ThreePhase));
/// assert_eq!(PhaseType::from_label(" 1 PHASE "), Some(PhaseType::SinglePhase));
/// assert_eq!(PhaseType::from_label("split"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum PhaseType {
    #[serde(rename = "1 Phase")]
    SinglePhase,
    #[default]
    #[serde(rename = "3 Phase")]
    ThreePhase,
}

impl PhaseType {
    /// Phase assigned to a segment whose phase label is present but not recognized.
    ///
    /// Such segments are computed with the single-phase current formula.
    pub const UNRECOGNIZED_FALLBACK: Self = Self::SinglePhase;

    /// Canonical workbook label.
    pub fn label(self) -> &'static str {
        match self {
            Self::SinglePhase => "1 Phase",
            Self::ThreePhase => "3 Phase",
        }
    }

    /// Normalizes a raw phase label, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything other than the two canonical labels.
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "1 PHASE" => Some(Self::SinglePhase),
            "3 PHASE" => Some(Self::ThreePhase),
            _ => None,
        }
    }
}

impl fmt::Display for PhaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PhaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| format!("must be \"1 Phase\" or \"3 Phase\", got \"{s}\""))
    }
}

impl TryFrom<String> for PhaseType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One row of the network sheet: a cable run feeding a location.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSegment {
    /// Location fed by this segment.
    pub location: String,
    /// Cable identifier, looked up by exact key in the cable table.
    pub cable_type: String,
    /// Run length (m).
    pub length_m: f64,
    /// Total connected load (kVA).
    pub load_kva: f64,
    /// Nominal voltage (V).
    pub voltage_v: f64,
    /// Supply topology after normalization.
    pub phase: PhaseType,
}

impl NetworkSegment {
    /// Cable identifier filled into empty cable cells. Never present in a cable table.
    pub const UNMATCHED_CABLE: &'static str = "-";
    /// Voltage filled into empty voltage cells (V).
    pub const DEFAULT_VOLTAGE_V: f64 = 380.0;

    /// Creates a segment from already-cleaned values.
    pub fn new(
        location: impl Into<String>,
        cable_type: impl Into<String>,
        length_m: f64,
        load_kva: f64,
        voltage_v: f64,
        phase: PhaseType,
    ) -> Self {
        Self {
            location: location.into(),
            cable_type: cable_type.into(),
            length_m,
            load_kva,
            voltage_v,
            phase,
        }
    }
}

/// One row of the cost ledger.
///
/// Only `total` takes part in the analysis; the remaining cells are kept verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostLine {
    /// Line total in currency units.
    pub total: f64,
    /// Every other `(header, value)` pair of the row, in sheet order.
    pub columns: Vec<(String, String)>,
}

impl CostLine {
    /// Creates a cost line without pass-through columns.
    pub fn with_total(total: f64) -> Self {
        Self {
            total,
            columns: Vec::new(),
        }
    }
}

/// Session-wide economic and electrical assumptions.
///
/// Passed explicitly into every calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Assumptions {
    /// Electricity tariff (currency per kWh, >= 0).
    pub tariff_per_kwh: f64,
    /// Power factor used to turn kVA into real power (0.0–1.0).
    pub power_factor: f64,
    /// Phase applied to every segment when the workbook has no phase column.
    pub default_phase: PhaseType,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            tariff_per_kwh: 1500.0,
            power_factor: 0.8,
            default_phase: PhaseType::ThreePhase,
        }
    }
}

/// Which branch of the loss calculation produced a segment's loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LossBasis {
    /// I²R loss computed from the cable resistance and line current.
    Computed,
    /// Cable type not in the cable table; loss is zero.
    UnmatchedCable,
    /// Load is zero or negative; loss is zero.
    NoLoad,
}

/// Derived losses and economics for one network segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentResult {
    /// Location fed by the segment.
    pub location: String,
    /// Phase used for the current calculation.
    pub phase: PhaseType,
    /// Resistive loss (kW).
    pub loss_kw: f64,
    /// Share of real power not lost to resistance (%). Unbounded.
    pub efficiency_pct: f64,
    /// Yearly monetary value of the loss (currency).
    pub annual_benefit: f64,
    /// Branch that produced `loss_kw`.
    pub basis: LossBasis,
}

impl fmt::Display for SegmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) | loss={:.2} kW  efficiency={:.2}%  benefit={:.0}/yr",
            self.location, self.phase, self.loss_kw, self.efficiency_pct, self.annual_benefit,
        )
    }
}
