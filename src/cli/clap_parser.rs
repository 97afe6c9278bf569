use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::config::{AppConfig, ExportConfig};
use crate::error::ConfigError;
use crate::models::ColumnMapping;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, ValueEnum, Debug)]
pub enum FormatOpt {
    Sjis,
    // keep the CLI token aligned with ExportConfig.format
    #[value(name = "utf8bom")]
    Utf8Bom,
    Both,
}

impl FormatOpt {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sjis => "sjis",
            Self::Utf8Bom => "utf8bom",
            Self::Both => "both",
        }
    }
}

impl std::fmt::Display for FormatOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "store-linker",
    version,
    about = "Links same-day store records to earlier records for the same physical store",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Input CSV export (UTF-8 or Shift_JIS)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    /// Directory for the export artifacts (env: STORE_LINKER_OUT_DIR)
    #[arg(
        long = "out-dir",
        value_name = "DIR",
        env = "STORE_LINKER_OUT_DIR",
        default_value = "."
    )]
    pub out_dir: PathBuf,
    /// Which artifacts to produce
    #[arg(long, value_name = "FORMAT", default_value_t = FormatOpt::Both)]
    pub format: FormatOpt,
    /// Reference date, YYYY-MM-DD; defaults to today (env: STORE_LINKER_DATE)
    #[arg(long = "date", value_name = "DATE", env = "STORE_LINKER_DATE")]
    pub date: Option<String>,
}

impl Cli {
    pub fn to_app_config(&self) -> Result<AppConfig, ConfigError> {
        let reference_date = self
            .date
            .as_deref()
            .map(|raw| {
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                    ConfigError::InvalidValue {
                        field: "date",
                        reason: format!("{:?} is not a YYYY-MM-DD date", raw),
                    }
                })
            })
            .transpose()?;

        let cfg = AppConfig {
            input: self.input.display().to_string(),
            columns: ColumnMapping::default(),
            export: ExportConfig {
                out_dir: self.out_dir.display().to_string(),
                format: self.format.as_str().into(),
                ..ExportConfig::default()
            },
            reference_date,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

pub fn parse_cli_to_app_config() -> Result<AppConfig, ConfigError> {
    let cli = Cli::parse();
    cli.to_app_config()
}
