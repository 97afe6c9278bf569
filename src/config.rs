use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::ColumnMapping;

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ExportConfig {
    pub out_dir: String,
    pub format: String, // sjis|utf8bom|both
    pub windows_name: String,
    pub mac_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: ".".into(),
            format: "both".into(),
            windows_name: "processed_data_windows.csv".into(),
            mac_name: "processed_data_mac.csv".into(),
        }
    }
}

impl ExportConfig {
    pub fn wants_shift_jis(&self) -> bool {
        matches!(self.format.as_str(), "sjis" | "both")
    }

    pub fn wants_utf8_bom(&self) -> bool {
        matches!(self.format.as_str(), "utf8bom" | "both")
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct AppConfig {
    pub input: String,
    #[serde(default)]
    pub columns: ColumnMapping,
    #[serde(default)]
    pub export: ExportConfig,
    /// Partitioning date; the binary falls back to the local wall-clock
    /// date when unset.
    pub reference_date: Option<NaiveDate>,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "input" });
        }
        match self.export.format.as_str() {
            "sjis" | "utf8bom" | "both" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "export.format",
                    reason: format!("unsupported: {}", other),
                });
            }
        }
        if self.export.windows_name.trim().is_empty() || self.export.mac_name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "export file name",
            });
        }
        if self.columns.deadline_date.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "columns.deadline_date",
            });
        }
        if self.columns.address.trim().is_empty() || self.columns.phone.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "columns.address/phone",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AppConfig {
        AppConfig {
            input: "export.csv".into(),
            ..Default::default()
        }
    }

    #[test]
    fn default_with_input_validates() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn empty_input_is_rejected() {
        let cfg = AppConfig::default();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingField { field: "input" })
        ));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let mut cfg = valid();
        cfg.export.format = "xlsx".into();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { field: "export.format", .. })
        ));
    }

    #[test]
    fn format_selection_helpers() {
        let mut cfg = valid();
        assert!(cfg.export.wants_shift_jis() && cfg.export.wants_utf8_bom());
        cfg.export.format = "sjis".into();
        assert!(cfg.export.wants_shift_jis() && !cfg.export.wants_utf8_bom());
    }
}
