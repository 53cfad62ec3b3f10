use std::path::PathBuf;

use crate::cli::FormatOpt;
use crate::error::ConfigError;
use crate::models::{Direction, ReportMode};

/// Validated settings for one comparison run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub ptd_path: Option<PathBuf>,
    pub sds_path: Option<PathBuf>,
    pub sds2_path: Option<PathBuf>,
    pub direction: Direction,
    pub report: ReportMode,
    pub items: Vec<String>,
    pub out_path: String,
    pub format: FormatOpt,
    pub trial_filter: bool,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.out_path.trim().is_empty() {
            return Err(ConfigError::EmptyOutPath);
        }
        match self.direction {
            Direction::SdsToSds => {
                if self.sds_path.is_none() {
                    return Err(ConfigError::MissingInput("--sds"));
                }
                if self.sds2_path.is_none() {
                    return Err(ConfigError::MissingInput("--sds2"));
                }
            }
            Direction::PtdToSds | Direction::SdsToPtd => {
                if self.ptd_path.is_none() {
                    return Err(ConfigError::MissingInput("--ptd"));
                }
                if self.sds_path.is_none() {
                    return Err(ConfigError::MissingInput("--sds"));
                }
            }
        }
        Ok(())
    }
}
