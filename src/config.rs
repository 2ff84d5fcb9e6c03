//! TOML-based analysis configuration: assumptions and cable table overrides.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::calc::cable::CableTable;
use crate::calc::types::{Assumptions, NetworkSegment};

/// Top-level analysis configuration parsed from TOML.
///
/// All fields have defaults matching the reference deployment. Load from
/// TOML with [`AnalysisConfig::from_toml_file`] or use
/// [`AnalysisConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Tariff, power factor, and default phase.
    #[serde(default)]
    pub assumptions: Assumptions,
    /// Cable resistances (Ω/km) merged over the reference table.
    #[serde(default)]
    pub cables: BTreeMap<String, f64>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"assumptions.power_factor"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl AnalysisConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Reference cable table with the configured entries merged over it.
    pub fn cable_table(&self) -> CableTable {
        let mut table = CableTable::reference();
        table.extend(
            self.cables
                .iter()
                .filter(|(name, _)| name.as_str() != NetworkSegment::UNMATCHED_CABLE)
                .map(|(name, &ohms)| (name.clone(), ohms)),
        );
        table
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let a = &self.assumptions;

        if !a.tariff_per_kwh.is_finite() || a.tariff_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "assumptions.tariff_per_kwh".into(),
                message: "must be a finite number >= 0".into(),
            });
        }
        if !(0.0..=1.0).contains(&a.power_factor) {
            errors.push(ConfigError {
                field: "assumptions.power_factor".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }

        for (name, &ohms) in &self.cables {
            if name == NetworkSegment::UNMATCHED_CABLE {
                errors.push(ConfigError {
                    field: format!("cables.\"{name}\""),
                    message: "reserved for rows without a cable type".into(),
                });
            }
            if !ohms.is_finite() || ohms < 0.0 {
                errors.push(ConfigError {
                    field: format!("cables.\"{name}\""),
                    message: "resistance must be a finite number >= 0".into(),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::types::PhaseType;

    #[test]
    fn default_config_valid() {
        let cfg = AnalysisConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
        assert_eq!(cfg.cable_table(), CableTable::reference());
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[assumptions]
tariff_per_kwh = 1444.7
power_factor = 0.85
default_phase = "1 phase"

[cables]
"NYY 3x95 mm²" = 0.193
"#;
        let cfg = AnalysisConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.assumptions.tariff_per_kwh), Some(1444.7));
        assert_eq!(cfg.as_ref().map(|c| c.assumptions.power_factor), Some(0.85));
        assert_eq!(
            cfg.as_ref().map(|c| c.assumptions.default_phase),
            Some(PhaseType::SinglePhase)
        );
        let cables = cfg.as_ref().map(AnalysisConfig::cable_table);
        assert_eq!(cables.as_ref().map(CableTable::len), Some(4));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[assumptions]
tariff_per_kwh = 2000.0
"#;
        let cfg = AnalysisConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.assumptions.tariff_per_kwh), Some(2000.0));
        assert_eq!(cfg.as_ref().map(|c| c.assumptions.power_factor), Some(0.8));
        assert_eq!(
            cfg.as_ref().map(|c| c.assumptions.default_phase),
            Some(PhaseType::ThreePhase)
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[assumptions]
tariff = 1500
"#;
        assert!(AnalysisConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn invalid_phase_label_rejected() {
        let toml = r#"
[assumptions]
default_phase = "2 Phase"
"#;
        let err = AnalysisConfig::from_toml_str(toml).err();
        assert!(err.is_some_and(|e| e.message.contains("2 Phase")));
    }

    #[test]
    fn configured_cable_overrides_reference() {
        let mut cfg = AnalysisConfig::default();
        cfg.cables.insert("NYY 3x70 mm²".to_string(), 0.3);
        assert_eq!(cfg.cable_table().ohms_per_km("NYY 3x70 mm²"), Some(0.3));
    }

    #[test]
    fn unmatched_marker_cannot_become_a_cable() {
        let cfg = AnalysisConfig::from_toml_str("[cables]\n\"-\" = 0.5\n")
            .expect("config should parse");
        let errors = cfg.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "cables.\"-\"");
        assert!(!cfg.cable_table().contains(NetworkSegment::UNMATCHED_CABLE));
    }

    #[test]
    fn validation_catches_negative_tariff() {
        let mut cfg = AnalysisConfig::default();
        cfg.assumptions.tariff_per_kwh = -1.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "assumptions.tariff_per_kwh"));
    }

    #[test]
    fn validation_catches_power_factor_out_of_range() {
        let mut cfg = AnalysisConfig::default();
        cfg.assumptions.power_factor = 1.2;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "assumptions.power_factor"));
    }

    #[test]
    fn validation_catches_bad_cable_resistance() {
        let mut cfg = AnalysisConfig::default();
        cfg.cables.insert("Broken".to_string(), f64::NAN);
        cfg.cables.insert("Negative".to_string(), -0.1);
        let errors = cfg.validate();
        assert_eq!(errors.iter().filter(|e| e.field.starts_with("cables.")).count(), 2);
    }

    #[test]
    fn power_factor_bounds_are_inclusive() {
        let mut cfg = AnalysisConfig::default();
        for pf in [0.0, 1.0] {
            cfg.assumptions.power_factor = pf;
            assert!(cfg.validate().is_empty());
        }
    }
}
