//! Workbook input: the cost ledger and network sheets stored as CSV files.
//!
//! A workbook is a directory holding `costs.csv` and `network.csv`. Headers
//! are matched case-insensitively against a canonical name or an alias.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{info, warn};

use crate::calc::types::{CostLine, NetworkSegment, PhaseType};
use crate::error::InputError;

/// Sheet holding the cost ledger.
pub const COST_SHEET: &str = "costs";
/// Sheet holding the network segments.
pub const NETWORK_SHEET: &str = "network";

/// A workbook column: canonical header plus accepted aliases.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl Column {
    fn matches(&self, header: &str) -> bool {
        let header = header.trim();
        header.eq_ignore_ascii_case(self.name)
            || self.aliases.iter().any(|a| header.eq_ignore_ascii_case(a))
    }

    fn find(&self, headers: &StringRecord) -> Option<usize> {
        headers.iter().position(|h| self.matches(h))
    }
}

pub const TOTAL: Column = Column {
    name: "Total",
    aliases: &["Total (Rp)"],
};
pub const LOCATION: Column = Column {
    name: "Location",
    aliases: &["Nama Lokasi"],
};
pub const CABLE_TYPE: Column = Column {
    name: "Cable Type",
    aliases: &["Jenis Kabel"],
};
pub const LENGTH_M: Column = Column {
    name: "Length (m)",
    aliases: &["Panjang Jaringan (m)"],
};
pub const LOAD_KVA: Column = Column {
    name: "Load (kVA)",
    aliases: &["Beban Total (kVA)"],
};
pub const VOLTAGE_V: Column = Column {
    name: "Voltage (V)",
    aliases: &["Tegangan (V)"],
};
pub const PHASE_TYPE: Column = Column {
    name: "Phase Type",
    aliases: &["Tipe Phase"],
};

/// Parsed, cleaned contents of both sheets.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    /// Cost ledger rows, in sheet order.
    pub cost_lines: Vec<CostLine>,
    /// Network segments, in sheet order, with defaults filled and phase normalized.
    pub segments: Vec<NetworkSegment>,
    /// Whether the network sheet carried a phase column.
    pub has_phase_column: bool,
}

impl Workbook {
    /// Reads `costs.csv` and `network.csv` from a workbook directory.
    ///
    /// Both sheet files must exist before either is parsed.
    ///
    /// # Errors
    ///
    /// Returns an `InputError` for a missing sheet, a missing required
    /// column, a non-numeric value in a numeric column, or malformed CSV.
    pub fn open(dir: &Path, default_phase: PhaseType) -> Result<Self, InputError> {
        let cost_path = dir.join(format!("{COST_SHEET}.csv"));
        let network_path = dir.join(format!("{NETWORK_SHEET}.csv"));
        for (sheet, path) in [(COST_SHEET, &cost_path), (NETWORK_SHEET, &network_path)] {
            if !path.is_file() {
                return Err(InputError::MissingSheet {
                    sheet,
                    path: path.clone(),
                });
            }
        }

        let costs = open_sheet(COST_SHEET, &cost_path)?;
        let network = open_sheet(NETWORK_SHEET, &network_path)?;
        let workbook = Self::from_readers(costs, network, default_phase)?;
        info!(
            workbook = %dir.display(),
            cost_lines = workbook.cost_lines.len(),
            segments = workbook.segments.len(),
            "loaded workbook"
        );
        Ok(workbook)
    }

    /// Parses both sheets from arbitrary readers.
    ///
    /// # Errors
    ///
    /// See [`Workbook::open`].
    pub fn from_readers(
        costs: impl Read,
        network: impl Read,
        default_phase: PhaseType,
    ) -> Result<Self, InputError> {
        let cost_lines = read_cost_lines(costs)?;
        let (segments, has_phase_column) = read_network_segments(network, default_phase)?;
        Ok(Self {
            cost_lines,
            segments,
            has_phase_column,
        })
    }
}

fn open_sheet(sheet: &'static str, path: &Path) -> Result<File, InputError> {
    File::open(path).map_err(|e| InputError::Csv {
        sheet,
        source: e.into(),
    })
}

fn sheet_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn headers(sheet: &'static str, rdr: &mut csv::Reader<impl Read>) -> Result<StringRecord, InputError> {
    rdr.headers()
        .cloned()
        .map_err(|source| InputError::Csv { sheet, source })
}

/// Resolves every required column or reports all that are missing.
fn require_columns<const N: usize>(
    sheet: &'static str,
    headers: &StringRecord,
    columns: [Column; N],
) -> Result<[usize; N], InputError> {
    let found = columns.map(|c| c.find(headers));
    let missing: Vec<&'static str> = columns
        .iter()
        .zip(&found)
        .filter(|(_, idx)| idx.is_none())
        .map(|(c, _)| c.name)
        .collect();
    if !missing.is_empty() {
        return Err(InputError::MissingColumns {
            sheet,
            columns: missing,
        });
    }
    Ok(found.map(|idx| idx.unwrap_or_default()))
}

/// Parses a numeric cell; an empty cell yields `default`.
///
/// `NaN` and infinities are rejected like any other non-number.
fn number_cell(
    record: &StringRecord,
    idx: usize,
    default: f64,
    sheet: &'static str,
    row: usize,
    column: &'static str,
) -> Result<f64, InputError> {
    let raw = record.get(idx).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::InvalidNumber {
            sheet,
            row,
            column,
            value: raw.to_string(),
        })
}

fn text_cell<'r>(record: &'r StringRecord, idx: usize) -> Option<&'r str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Reads the cost ledger.
///
/// Only the total column is interpreted; empty totals count as zero and
/// every other cell is carried through verbatim.
///
/// # Errors
///
/// Returns an `InputError` when the total column is missing, a total is
/// not numeric, or the CSV is malformed.
pub fn read_cost_lines(reader: impl Read) -> Result<Vec<CostLine>, InputError> {
    let mut rdr = sheet_reader(reader);
    let headers = headers(COST_SHEET, &mut rdr)?;
    let [total_idx] = require_columns(COST_SHEET, &headers, [TOTAL])?;

    let mut lines = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|source| InputError::Csv {
            sheet: COST_SHEET,
            source,
        })?;
        let row = i + 2;
        let total = number_cell(&record, total_idx, 0.0, COST_SHEET, row, TOTAL.name)?;
        let columns = headers
            .iter()
            .enumerate()
            .filter(|&(idx, _)| idx != total_idx)
            .map(|(idx, h)| (h.to_string(), record.get(idx).unwrap_or("").to_string()))
            .collect();
        lines.push(CostLine { total, columns });
    }
    Ok(lines)
}

/// Reads the network sheet into cleaned segments.
///
/// Empty cells are filled before computation: cable `"-"`, length 0,
/// load 0, voltage 380. Phase labels are normalized case-insensitively.
/// Without a phase column every segment gets `default_phase`; an empty
/// phase cell also gets `default_phase`; an unrecognized label becomes
/// [`PhaseType::UNRECOGNIZED_FALLBACK`].
///
/// # Returns
///
/// `(segments, has_phase_column)`.
///
/// # Errors
///
/// Returns an `InputError` when a required column is missing, a numeric
/// cell is not a number, or the CSV is malformed.
pub fn read_network_segments(
    reader: impl Read,
    default_phase: PhaseType,
) -> Result<(Vec<NetworkSegment>, bool), InputError> {
    let mut rdr = sheet_reader(reader);
    let headers = headers(NETWORK_SHEET, &mut rdr)?;
    let [loc_idx, cable_idx, len_idx, load_idx, volt_idx] = require_columns(
        NETWORK_SHEET,
        &headers,
        [LOCATION, CABLE_TYPE, LENGTH_M, LOAD_KVA, VOLTAGE_V],
    )?;
    let phase_idx = PHASE_TYPE.find(&headers);
    if phase_idx.is_none() {
        warn!(
            "column `{}` not found; assuming \"{default_phase}\" for every segment",
            PHASE_TYPE.name
        );
    }

    let mut segments = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|source| InputError::Csv {
            sheet: NETWORK_SHEET,
            source,
        })?;
        let row = i + 2;

        let location = text_cell(&record, loc_idx).unwrap_or_default();
        let cable_type =
            text_cell(&record, cable_idx).unwrap_or(NetworkSegment::UNMATCHED_CABLE);
        let length_m = number_cell(&record, len_idx, 0.0, NETWORK_SHEET, row, LENGTH_M.name)?;
        let load_kva = number_cell(&record, load_idx, 0.0, NETWORK_SHEET, row, LOAD_KVA.name)?;
        let voltage_v = number_cell(
            &record,
            volt_idx,
            NetworkSegment::DEFAULT_VOLTAGE_V,
            NETWORK_SHEET,
            row,
            VOLTAGE_V.name,
        )?;
        let phase = match phase_idx.and_then(|idx| text_cell(&record, idx)) {
            None => default_phase,
            Some(raw) => PhaseType::from_label(raw).unwrap_or_else(|| {
                warn!(
                    row,
                    location,
                    label = raw,
                    "unrecognized phase type; computing as \"{}\"",
                    PhaseType::UNRECOGNIZED_FALLBACK
                );
                PhaseType::UNRECOGNIZED_FALLBACK
            }),
        };

        segments.push(NetworkSegment::new(
            location, cable_type, length_m, load_kva, voltage_v, phase,
        ));
    }
    Ok((segments, phase_idx.is_some()))
}
