/// CSV export of the result table.
pub mod export;
pub mod report;
/// Cost ledger and network sheet input.
pub mod workbook;
