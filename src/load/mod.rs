pub mod paste;
pub mod xlsx;

use std::path::Path;

use crate::error::LoadError;
use crate::models::{Dataset, Role};

/// Loads one dataset, dispatching on the file extension: `.xlsx` goes
/// through the workbook reader (expecting a "Form Definitions" sheet),
/// anything else is treated as tab-separated text with a header line.
pub fn load_dataset(path: &Path, role: Role) -> Result<Dataset, LoadError> {
    let is_xlsx = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    if is_xlsx {
        xlsx::load_form_definitions(path, role)
    } else {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        paste::parse_tsv(&text)
    }
}
