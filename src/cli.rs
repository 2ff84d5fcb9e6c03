use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::calc::types::PhaseType;
use crate::config::AnalysisConfig;

/// Distribution-network loss and ROI analysis of a construction budget workbook.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Workbook directory containing `costs.csv` and `network.csv`.
    pub workbook: PathBuf,

    /// TOML file with assumptions and extra cable resistances.
    #[clap(long, env = "GRID_LOSS_ROI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Electricity tariff per kWh (overrides the config file).
    #[clap(long)]
    pub tariff: Option<f64>,

    /// Power factor in [0, 1] (overrides the config file).
    #[clap(long)]
    pub power_factor: Option<f64>,

    /// Phase assumed when the network sheet has no phase column: "1 Phase" or "3 Phase".
    #[clap(long)]
    pub default_phase: Option<PhaseType>,

    /// Only show and export segments of this location.
    #[clap(long)]
    pub location: Option<String>,

    /// Write the result table to this CSV file.
    #[clap(long)]
    pub csv_out: Option<PathBuf>,

    /// Write the full report to this JSON file.
    #[clap(long)]
    pub report_out: Option<PathBuf>,

    /// Increase log verbosity (`-v` for debug).
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Applies command-line assumption overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut AnalysisConfig) {
        let a = &mut config.assumptions;
        if let Some(tariff) = self.tariff {
            a.tariff_per_kwh = tariff;
        }
        if let Some(pf) = self.power_factor {
            a.power_factor = pf;
        }
        if let Some(phase) = self.default_phase {
            a.default_phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workbook_only() {
        let args = Args::try_parse_from(["grid-loss-roi", "workbooks/sample"])
            .expect("parse should succeed");
        assert_eq!(args.workbook, PathBuf::from("workbooks/sample"));
        assert!(args.location.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn overrides_apply_to_config() {
        let args = Args::try_parse_from([
            "grid-loss-roi",
            "wb",
            "--tariff",
            "1000",
            "--power-factor",
            "0.9",
            "--default-phase",
            "1 phase",
            "-vv",
        ])
        .expect("parse should succeed");
        let mut config = AnalysisConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.assumptions.tariff_per_kwh, 1000.0);
        assert_eq!(config.assumptions.power_factor, 0.9);
        assert_eq!(config.assumptions.default_phase, PhaseType::SinglePhase);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn rejects_unknown_phase() {
        let result = Args::try_parse_from(["grid-loss-roi", "wb", "--default-phase", "2 Phase"]);
        assert!(result.is_err());
    }

    #[test]
    fn requires_workbook() {
        assert!(Args::try_parse_from(["grid-loss-roi"]).is_err());
    }
}
