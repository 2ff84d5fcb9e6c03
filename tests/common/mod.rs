//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use grid_loss_roi::calc::types::{NetworkSegment, PhaseType};

/// Path of the bundled sample workbook.
pub fn sample_workbook() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("workbooks/sample")
}

/// Header of a network sheet with the optional phase column.
pub const NETWORK_HEADER: &str = "Location,Cable Type,Length (m),Load (kVA),Voltage (V),Phase Type";

/// Writes a workbook directory with the given sheet contents.
///
/// Pass `None` to leave a sheet out.
pub fn write_workbook(costs: Option<&str>, network: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    if let Some(costs) = costs {
        fs::write(dir.path().join("costs.csv"), costs).expect("costs sheet should be written");
    }
    if let Some(network) = network {
        fs::write(dir.path().join("network.csv"), network)
            .expect("network sheet should be written");
    }
    dir
}

/// The reference segment: NYY 3x70 mm², 500 m, 50 kVA, 380 V.
pub fn reference_segment(phase: PhaseType) -> NetworkSegment {
    NetworkSegment::new("Gardu A", "NYY 3x70 mm²", 500.0, 50.0, 380.0, phase)
}
