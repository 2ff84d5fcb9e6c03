//! Distribution-network loss, efficiency, and ROI analysis of construction budgets.

pub mod analysis;
/// Loss & economics calculator.
pub mod calc;
pub mod cli;
pub mod config;
pub mod error;
/// Workbook input, CSV export, and JSON report.
pub mod io;
pub mod tables;
