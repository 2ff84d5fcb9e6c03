/// Qualitative verdicts over analysis results.
pub mod assessment;
/// Cable resistance reference table.
pub mod cable;
pub mod currency;
/// Loss & economics calculator.
pub mod loss;
pub mod summary;
pub mod types;
