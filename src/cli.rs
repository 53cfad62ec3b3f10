use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::RunConfig;
use crate::error::ConfigError;
use crate::models::{Direction, ReportMode};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, ValueEnum, Debug)]
pub enum FormatOpt {
    Csv,
    Xlsx,
    Both,
}

impl FormatOpt {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Both => "both",
        }
    }
}

impl std::fmt::Display for FormatOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, ValueEnum, Debug)]
pub enum DirectionOpt {
    PtdToSds,
    SdsToPtd,
    SdsToSds,
}

impl From<DirectionOpt> for Direction {
    fn from(d: DirectionOpt) -> Self {
        match d {
            DirectionOpt::PtdToSds => Direction::PtdToSds,
            DirectionOpt::SdsToPtd => Direction::SdsToPtd,
            DirectionOpt::SdsToSds => Direction::SdsToSds,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, ValueEnum, Debug)]
pub enum ReportOpt {
    Items,
    Issues,
}

impl From<ReportOpt> for ReportMode {
    fn from(r: ReportOpt) -> Self {
        match r {
            ReportOpt::Items => ReportMode::Items,
            ReportOpt::Issues => ReportMode::Issues,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "ptd_sds_compare",
    version,
    about = "PTD vs SDS clinical trial metadata comparison (CLI)",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// PTD input: xlsx with a "Form Definitions" sheet, or tab-separated text (env: PTD_FILE)
    #[arg(long, value_name = "FILE", env = "PTD_FILE")]
    pub ptd: Option<PathBuf>,
    /// SDS input (env: SDS_FILE)
    #[arg(long, value_name = "FILE", env = "SDS_FILE")]
    pub sds: Option<PathBuf>,
    /// Second SDS input, required for sds-to-sds runs (env: SDS2_FILE)
    #[arg(long, value_name = "FILE", env = "SDS2_FILE")]
    pub sds2: Option<PathBuf>,
    /// Comparison direction: which dataset supplies the column basis
    #[arg(long, value_enum, default_value_t = DirectionOpt::PtdToSds, env = "COMPARE_DIRECTION")]
    pub direction: DirectionOpt,
    /// Report layout: per-item sheets or a consolidated issues sheet
    #[arg(long, value_enum, default_value_t = ReportOpt::Issues)]
    pub report: ReportOpt,
    /// Compare only these item names (comma separated); default is every item
    #[arg(long, value_name = "ITEMS", value_delimiter = ',')]
    pub items: Vec<String>,
    /// Output path (env: OUT_PATH)
    #[arg(long, value_name = "OUT", default_value = "comparison_report.xlsx", env = "OUT_PATH")]
    pub out: String,
    /// Output format
    #[arg(long, value_enum, default_value_t = FormatOpt::Xlsx)]
    pub format: FormatOpt,
    /// Skip the PTD "used in trial" row filter
    #[arg(long)]
    pub no_trial_filter: bool,
}

impl Cli {
    pub fn to_run_config(&self) -> Result<RunConfig, ConfigError> {
        let cfg = RunConfig {
            ptd_path: self.ptd.clone(),
            sds_path: self.sds.clone(),
            sds2_path: self.sds2.clone(),
            direction: self.direction.into(),
            report: self.report.into(),
            items: self.items.iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect(),
            out_path: self.out.clone(),
            format: self.format,
            trial_filter: !self.no_trial_filter,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

pub fn parse_run_config() -> Result<RunConfig, ConfigError> {
    let cli = Cli::parse();
    cli.to_run_config()
}
