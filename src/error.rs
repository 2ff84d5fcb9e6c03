//! Input-validation errors raised while reading a workbook.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal problem with the submitted workbook. No results are produced.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("sheet `{sheet}` not found (expected file {path})")]
    MissingSheet { sheet: &'static str, path: PathBuf },

    #[error("sheet `{sheet}` is missing required column(s): {}", .columns.join(", "))]
    MissingColumns {
        sheet: &'static str,
        columns: Vec<&'static str>,
    },

    #[error("sheet `{sheet}`, row {row}, column `{column}`: `{value}` is not a number")]
    InvalidNumber {
        sheet: &'static str,
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("cannot read sheet `{sheet}`: {source}")]
    Csv {
        sheet: &'static str,
        #[source]
        source: csv::Error,
    },
}
