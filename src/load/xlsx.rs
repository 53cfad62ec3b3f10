use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use log::info;

use crate::error::LoadError;
use crate::models::{Dataset, Role};
use crate::normalize::number_to_string;

pub const FORM_DEFINITIONS_SHEET: &str = "Form Definitions";

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            if s.is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(number_to_string(*f)),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(format!("{:?}", e)),
    }
}

/// Reads the "Form Definitions" sheet of an xlsx workbook into a dataset.
/// PTD exports carry a title line above the real headers, so for that role
/// the first sheet row is skipped and the second row provides the headers;
/// all other roles take headers from the first row.
pub fn load_form_definitions(path: &Path, role: Role) -> Result<Dataset, LoadError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();
    if !sheet_names.iter().any(|s| s == FORM_DEFINITIONS_SHEET) {
        return Err(LoadError::MissingSheet {
            wanted: FORM_DEFINITIONS_SHEET.to_string(),
            available: sheet_names,
        });
    }
    let range = workbook.worksheet_range(FORM_DEFINITIONS_SHEET)?;

    let header_row = match role {
        Role::Ptd => 1,
        Role::Sds => 0,
    };
    let mut rows = range.rows().skip(header_row);
    let Some(header_cells) = rows.next() else {
        return Err(LoadError::EmptyInput);
    };
    let mut headers: Vec<String> = header_cells
        .iter()
        .map(|c| cell_to_string(c).unwrap_or_default().trim().to_string())
        .collect();
    while headers.last().is_some_and(|h| h.is_empty()) {
        headers.pop();
    }
    if headers.is_empty() {
        return Err(LoadError::EmptyInput);
    }

    let mut dataset = Dataset::new(headers);
    for cells in rows {
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let values = cells.iter().map(cell_to_string).collect();
        dataset.push_row(values);
    }
    info!(
        "loaded {} rows x {} columns from {}",
        dataset.rows.len(),
        dataset.columns.len(),
        path.display()
    );
    Ok(dataset)
}
