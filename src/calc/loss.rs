//! Per-segment resistive loss, efficiency, and annual benefit.
//!
//! Every function here is pure: outputs depend only on the arguments.

use tracing::debug;

use super::cable::CableTable;
use super::types::{Assumptions, LossBasis, NetworkSegment, PhaseType, SegmentResult};

/// Hours in a non-leap year.
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Added to the efficiency denominator so zero-load segments do not divide by zero.
pub const EFFICIENCY_EPSILON: f64 = 1e-6;

/// Line current (A) drawn by an apparent-power load.
///
/// * Three-phase: `I = S / (√3 · V)`
/// * Single-phase: `I = S / V`
///
/// # Arguments
///
/// * `load_kva` - Apparent power (kVA)
/// * `voltage_v` - Nominal voltage (V)
/// * `phase` - Supply topology
pub fn line_current_a(load_kva: f64, voltage_v: f64, phase: PhaseType) -> f64 {
    let load_va = load_kva * 1000.0;
    match phase {
        PhaseType::ThreePhase => load_va / (3.0_f64.sqrt() * voltage_v),
        PhaseType::SinglePhase => load_va / voltage_v,
    }
}

/// Resistive loss of a segment together with the branch that produced it.
///
/// An unmatched cable or a non-positive load yields zero loss. Otherwise
/// the loss is `I² · R` with `R` scaled from Ω/km to the run length. No
/// clamping is applied: a near-zero voltage produces a very large or
/// infinite loss.
///
/// # Returns
///
/// `(loss_kw, basis)`.
pub fn segment_loss(segment: &NetworkSegment, cables: &CableTable) -> (f64, LossBasis) {
    let Some(ohms_per_km) = cables.ohms_per_km(&segment.cable_type) else {
        return (0.0, LossBasis::UnmatchedCable);
    };
    if segment.load_kva <= 0.0 {
        return (0.0, LossBasis::NoLoad);
    }

    let resistance_ohm = ohms_per_km * (segment.length_m / 1000.0);
    let current_a = line_current_a(segment.load_kva, segment.voltage_v, segment.phase);
    let loss_w = current_a.powi(2) * resistance_ohm;
    (loss_w / 1000.0, LossBasis::Computed)
}

/// Resistive loss of a segment (kW).
///
/// # Examples
///
/// ```
/// use grid_loss_roi::calc::cable::CableTable;
/// use grid_loss_roi::calc::loss::compute_segment_loss;
/// use grid_loss_roi::calc::types::{NetworkSegment, PhaseType};
///
/// let seg = NetworkSegment::new("A", "NYY 3x70 mm²", 500.0, 50.0, 380.0, PhaseType::ThreePhase);
/// let loss = compute_segment_loss(&seg, &CableTable::reference());
/// assert!((loss - 0.7733).abs() < 1e-3);
/// ```
pub fn compute_segment_loss(segment: &NetworkSegment, cables: &CableTable) -> f64 {
    segment_loss(segment, cables).0
}

/// Efficiency (%) of a segment given its loss.
///
/// `100 · (1 − loss / (load · pf + ε))`. Not bounded to `[0, 100]`.
pub fn compute_efficiency(segment: &NetworkSegment, loss_kw: f64, power_factor: f64) -> f64 {
    100.0 * (1.0 - loss_kw / (segment.load_kva * power_factor + EFFICIENCY_EPSILON))
}

/// Yearly monetary value of a continuous loss.
pub fn compute_annual_benefit(loss_kw: f64, tariff_per_kwh: f64) -> f64 {
    loss_kw * HOURS_PER_YEAR * tariff_per_kwh
}

/// Computes loss, efficiency, and annual benefit for one segment.
pub fn analyze_segment(
    segment: &NetworkSegment,
    cables: &CableTable,
    assumptions: &Assumptions,
) -> SegmentResult {
    let (loss_kw, basis) = segment_loss(segment, cables);
    let efficiency_pct = compute_efficiency(segment, loss_kw, assumptions.power_factor);
    let annual_benefit = compute_annual_benefit(loss_kw, assumptions.tariff_per_kwh);

    debug!(
        location = %segment.location,
        cable = %segment.cable_type,
        ?basis,
        loss_kw,
        efficiency_pct,
        "analyzed segment"
    );

    SegmentResult {
        location: segment.location.clone(),
        phase: segment.phase,
        loss_kw,
        efficiency_pct,
        annual_benefit,
        basis,
    }
}

/// Analyzes every segment, preserving input order.
pub fn analyze_segments(
    segments: &[NetworkSegment],
    cables: &CableTable,
    assumptions: &Assumptions,
) -> Vec<SegmentResult> {
    segments
        .iter()
        .map(|segment| analyze_segment(segment, cables, assumptions))
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    fn nyy70(length_m: f64, load_kva: f64, phase: PhaseType) -> NetworkSegment {
        NetworkSegment::new("Gardu A", "NYY 3x70 mm²", length_m, load_kva, 380.0, phase)
    }

    #[test]
    fn reference_three_phase_example() {
        // R = 0.268 * 0.5 = 0.134 Ω, I ≈ 75.97 A
        let seg = nyy70(500.0, 50.0, PhaseType::ThreePhase);
        let cables = CableTable::reference();
        let current = line_current_a(seg.load_kva, seg.voltage_v, seg.phase);
        assert_abs_diff_eq!(current, 75.967, epsilon = 1e-3);

        let (loss, basis) = segment_loss(&seg, &cables);
        assert_eq!(basis, LossBasis::Computed);
        assert_relative_eq!(loss, 0.773_314_866, max_relative = 1e-8);
        assert_abs_diff_eq!(loss, 0.7735, epsilon = 1e-3);
    }

    #[test]
    fn zero_load_is_lossless_and_fully_efficient() {
        let seg = nyy70(500.0, 0.0, PhaseType::ThreePhase);
        let result = analyze_segment(&seg, &CableTable::reference(), &Assumptions::default());
        assert_eq!(result.loss_kw, 0.0);
        assert_eq!(result.efficiency_pct, 100.0);
        assert_eq!(result.annual_benefit, 0.0);
        assert_eq!(result.basis, LossBasis::NoLoad);
    }

    #[test]
    fn negative_load_is_lossless() {
        let seg = nyy70(500.0, -10.0, PhaseType::ThreePhase);
        assert_eq!(
            segment_loss(&seg, &CableTable::reference()),
            (0.0, LossBasis::NoLoad)
        );
    }

    #[test]
    fn unmatched_cable_is_lossless_and_fully_efficient() {
        let seg = NetworkSegment::new("B", "-", 800.0, 120.0, 380.0, PhaseType::ThreePhase);
        let result = analyze_segment(&seg, &CableTable::reference(), &Assumptions::default());
        assert_eq!(result.loss_kw, 0.0);
        assert_eq!(result.efficiency_pct, 100.0);
        assert_eq!(result.basis, LossBasis::UnmatchedCable);
    }

    #[test]
    fn zero_length_is_lossless_but_computed() {
        let seg = nyy70(0.0, 50.0, PhaseType::ThreePhase);
        let (loss, basis) = segment_loss(&seg, &CableTable::reference());
        assert_eq!(loss, 0.0);
        assert_eq!(basis, LossBasis::Computed);
    }

    #[test]
    fn positive_length_and_load_give_positive_loss() {
        let cables = CableTable::reference();
        for (len, load) in [(1.0, 0.1), (250.0, 10.0), (2000.0, 400.0)] {
            for phase in [PhaseType::SinglePhase, PhaseType::ThreePhase] {
                assert!(compute_segment_loss(&nyy70(len, load, phase), &cables) > 0.0);
            }
        }
    }

    #[test]
    fn three_phase_loss_is_a_third_of_single_phase() {
        let cables = CableTable::reference();
        let single = compute_segment_loss(&nyy70(500.0, 50.0, PhaseType::SinglePhase), &cables);
        let three = compute_segment_loss(&nyy70(500.0, 50.0, PhaseType::ThreePhase), &cables);
        assert_relative_eq!(three, single / 3.0, max_relative = 1e-12);

        let i1 = line_current_a(50.0, 380.0, PhaseType::SinglePhase);
        let i3 = line_current_a(50.0, 380.0, PhaseType::ThreePhase);
        assert_relative_eq!(i3, i1 / 3.0_f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn near_zero_voltage_is_not_clamped() {
        let seg = NetworkSegment::new("C", "NYY 3x35 mm²", 100.0, 10.0, 0.0, PhaseType::SinglePhase);
        let loss = compute_segment_loss(&seg, &CableTable::reference());
        assert!(loss.is_infinite());
    }

    #[test]
    fn efficiency_formula_keeps_epsilon() {
        let seg = nyy70(500.0, 50.0, PhaseType::ThreePhase);
        let eff = compute_efficiency(&seg, 0.8, 0.8);
        assert_relative_eq!(eff, 100.0 * (1.0 - 0.8 / (40.0 + 1e-6)), max_relative = 1e-12);
        assert_relative_eq!(eff, 98.0, max_relative = 1e-6);
    }

    #[test]
    fn efficiency_is_unbounded_below() {
        let seg = NetworkSegment::new("D", "-", 0.0, 0.0, 380.0, PhaseType::ThreePhase);
        let eff = compute_efficiency(&seg, 1.0, 0.8);
        assert!(eff < -1e7);
    }

    #[test]
    fn annual_benefit_is_linear() {
        let base = compute_annual_benefit(0.5, 1500.0);
        assert_relative_eq!(base, 0.5 * 8760.0 * 1500.0);
        assert_relative_eq!(compute_annual_benefit(1.0, 1500.0), 2.0 * base);
        assert_relative_eq!(compute_annual_benefit(0.5, 3000.0), 2.0 * base);
        assert_eq!(compute_annual_benefit(0.0, 1500.0), 0.0);
    }

    #[test]
    fn analyze_segments_preserves_order() {
        let segments = vec![
            NetworkSegment::new("First", "-", 0.0, 0.0, 380.0, PhaseType::ThreePhase),
            nyy70(500.0, 50.0, PhaseType::ThreePhase),
            NetworkSegment::new("Last", "NYY 3x35 mm²", 300.0, 25.0, 220.0, PhaseType::SinglePhase),
        ];
        let results =
            analyze_segments(&segments, &CableTable::reference(), &Assumptions::default());
        let locations: Vec<&str> = results.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(locations, ["First", "Gardu A", "Last"]);
        assert_eq!(results[2].phase, PhaseType::SinglePhase);
    }
}
