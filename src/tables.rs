//! Terminal rendering of the result table.

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::calc::currency::Rupiah;
use crate::calc::types::{LossBasis, SegmentResult};

/// Builds the per-segment result table.
///
/// Loss and efficiency are shown with two decimals, the annual benefit in
/// whole rupiah. Segments that fell back to zero loss are dimmed.
#[must_use]
pub fn build_results_table<'a>(results: impl IntoIterator<Item = &'a SegmentResult>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        "Location",
        "Phase Type",
        "Loss (kW)",
        "Efficiency (%)",
        "Annual Benefit",
    ]);
    for r in results {
        let efficiency_color = if r.efficiency_pct > 95.0 {
            Color::Green
        } else if r.efficiency_pct > 90.0 {
            Color::DarkYellow
        } else {
            Color::Red
        };
        let location = match r.basis {
            LossBasis::Computed => Cell::new(&r.location),
            LossBasis::UnmatchedCable | LossBasis::NoLoad => {
                Cell::new(&r.location).add_attribute(Attribute::Dim)
            }
        };
        table.add_row(vec![
            location,
            Cell::new(r.phase),
            Cell::new(format!("{:.2}", r.loss_kw)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", r.efficiency_pct))
                .set_alignment(CellAlignment::Right)
                .fg(efficiency_color),
            Cell::new(Rupiah(r.annual_benefit)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
