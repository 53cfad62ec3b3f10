use log::{info, warn};

use crate::models::Dataset;

/// Columns stripped from PTD uploads before comparison.
pub const DROPPED_COLUMNS: [&str; 2] = ["Modification Comments", "Library Source"];

/// Accepted header spellings for the trial-inclusion indicator, checked in
/// order. Exports are inconsistent about the trailing space and the long
/// suffix, so all three are tolerated.
pub const TRIAL_COLUMN_CANDIDATES: [&str; 3] = [
    "Used in trial (Y, N, Mod)",
    "Used in trial (Y, N, Mod) ",
    "Used in trial",
];

#[derive(Debug)]
pub struct PreprocessOutcome {
    pub dataset: Dataset,
    pub original_rows: usize,
    pub filtered_rows: usize,
    /// Header the trial filter keyed on, None when no candidate matched and
    /// filtering was skipped.
    pub trial_column: Option<String>,
}

/// PTD-specific conditioning: drops the fixed comment/source columns, then
/// keeps only rows marked as used in the trial. A missing indicator column
/// is non-fatal; the dataset passes through unfiltered with a warning.
pub fn preprocess_ptd(mut dataset: Dataset, apply_trial_filter: bool) -> PreprocessOutcome {
    for dropped in DROPPED_COLUMNS {
        if dataset.has_column(dropped) {
            dataset.columns.retain(|c| c != dropped);
            for row in &mut dataset.rows {
                row.shift_remove(dropped);
            }
        }
    }

    let original_rows = dataset.rows.len();
    if !apply_trial_filter {
        return PreprocessOutcome {
            filtered_rows: original_rows,
            original_rows,
            dataset,
            trial_column: None,
        };
    }

    let trial_column = TRIAL_COLUMN_CANDIDATES
        .iter()
        .find(|c| dataset.has_column(c))
        .map(|c| c.to_string());

    let Some(column) = trial_column else {
        warn!(
            "no trial-inclusion column found (looked for {:?}); skipping PTD row filter",
            TRIAL_COLUMN_CANDIDATES
        );
        return PreprocessOutcome {
            filtered_rows: original_rows,
            original_rows,
            dataset,
            trial_column: None,
        };
    };

    dataset.rows.retain(|row| {
        matches!(row.get(&column), Some(Some(v)) if v.trim().to_uppercase() == "Y")
    });
    let filtered_rows = dataset.rows.len();
    info!(
        "PTD trial filter on '{}': {} rows -> {}",
        column, original_rows, filtered_rows
    );

    PreprocessOutcome {
        dataset,
        original_rows,
        filtered_rows,
        trial_column: Some(column),
    }
}
