use std::collections::HashMap;

use log::warn;

use crate::models::{
    ComparisonRecord, Dataset, MatchStatus, MatchedBy, Row, FORM_LABEL, IGNORED_COLUMNS,
    ITEM_GROUP_LABEL, ITEM_NAME,
};
use crate::normalize::normalize_scalar;

/// Key columns the row matcher falls back through, in precedence order.
const KEY_COLUMNS: [&str; 3] = [ITEM_NAME, ITEM_GROUP_LABEL, FORM_LABEL];

/// Value -> row indices, built once per dataset for each key column the
/// dataset actually has. Replaces per-item linear scans while preserving
/// the same matching semantics.
#[derive(Debug, Default)]
pub struct DatasetIndex {
    keys: HashMap<&'static str, HashMap<String, Vec<usize>>>,
}

impl DatasetIndex {
    pub fn build(dataset: &Dataset) -> Self {
        let mut keys: HashMap<&'static str, HashMap<String, Vec<usize>>> = HashMap::new();
        for key in KEY_COLUMNS {
            if !dataset.has_column(key) {
                continue;
            }
            let mut by_value: HashMap<String, Vec<usize>> = HashMap::new();
            for (i, row) in dataset.rows.iter().enumerate() {
                if let Some(Some(v)) = row.get(key) {
                    by_value.entry(v.clone()).or_default().push(i);
                }
            }
            keys.insert(key, by_value);
        }
        Self { keys }
    }

    /// Row indices holding `value` in `key`, in dataset order.
    pub fn lookup(&self, key: &str, value: &str) -> &[usize] {
        self.keys
            .get(key)
            .and_then(|m| m.get(value))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// Picks the first row for a key hit; duplicate hits are used first-wins
/// and reported once via the log.
fn first_row<'a>(dataset: &'a Dataset, indices: &[usize], key: &str, value: &str) -> Option<&'a Row> {
    if indices.len() > 1 {
        warn!("{} rows share {} = '{}'; using the first", indices.len(), key, value);
    }
    indices.first().map(|&i| &dataset.rows[i])
}

/// Three-tier row matching: exact `Item Name`, then the found row's
/// `Item Group Label`, then its `Form Label`. The exact key always wins
/// when both sides have it; fallbacks only run for one-sided hits.
pub fn find_matching_rows<'a>(
    source: &'a Dataset,
    source_index: &DatasetIndex,
    target: &'a Dataset,
    target_index: &DatasetIndex,
    item: &str,
) -> (Option<&'a Row>, Option<&'a Row>, MatchedBy) {
    let source_row = first_row(source, source_index.lookup(ITEM_NAME, item), ITEM_NAME, item);
    let target_row = first_row(target, target_index.lookup(ITEM_NAME, item), ITEM_NAME, item);

    match (source_row, target_row) {
        (Some(s), Some(t)) => (Some(s), Some(t), MatchedBy::ItemName),
        (None, None) => (None, None, MatchedBy::None),
        (Some(s), None) => {
            for (key, matched_by) in [
                (ITEM_GROUP_LABEL, MatchedBy::ItemGroupLabel),
                (FORM_LABEL, MatchedBy::FormLabel),
            ] {
                if let Some(t) = fallback_lookup(s, target, target_index, key) {
                    return (Some(s), Some(t), matched_by);
                }
            }
            // Item exists only in the source; still a valid one-sided hit.
            (Some(s), None, MatchedBy::ItemName)
        }
        (None, Some(t)) => {
            for (key, matched_by) in [
                (ITEM_GROUP_LABEL, MatchedBy::ItemGroupLabel),
                (FORM_LABEL, MatchedBy::FormLabel),
            ] {
                if let Some(s) = fallback_lookup(t, source, source_index, key) {
                    return (Some(s), Some(t), matched_by);
                }
            }
            (None, Some(t), MatchedBy::ItemName)
        }
    }
}

/// Reads `key` off the row found on one side and looks that value up on the
/// other side.
fn fallback_lookup<'a>(
    found: &Row,
    other: &'a Dataset,
    other_index: &DatasetIndex,
    key: &str,
) -> Option<&'a Row> {
    let value = found.get(key)?.as_deref()?;
    first_row(other, other_index.lookup(key, value), key, value)
}

/// Classifies one scalar pair. Total over well-formed inputs: every call
/// lands on exactly one of the four statuses.
pub fn compare_values(
    source: Option<&str>,
    target: Option<&str>,
    source_label: &str,
    target_label: &str,
) -> (MatchStatus, &'static str, String) {
    match (source, target) {
        (None, None) => (MatchStatus::Match, MatchStatus::Match.symbol(), String::new()),
        (None, Some(_)) => (
            MatchStatus::MissingSource,
            MatchStatus::MissingSource.symbol(),
            format!("Missing in {}", source_label),
        ),
        (Some(_), None) => (
            MatchStatus::MissingTarget,
            MatchStatus::MissingTarget.symbol(),
            format!("Missing in {}", target_label),
        ),
        (Some(a), Some(b)) => {
            if normalize_scalar(a) == normalize_scalar(b) {
                (MatchStatus::Match, MatchStatus::Match.symbol(), String::new())
            } else {
                (
                    MatchStatus::Mismatch,
                    MatchStatus::Mismatch.symbol(),
                    "Values differ".to_string(),
                )
            }
        }
    }
}

/// Builds the full column-by-column comparison for one row pair, iterating
/// the source dataset's column order minus the fixed ignore-set.
pub fn build_comparison(
    source_row: Option<&Row>,
    target_row: Option<&Row>,
    source: &Dataset,
    target: &Dataset,
    source_label: &str,
    target_label: &str,
) -> Vec<ComparisonRecord> {
    let mut records = Vec::new();
    for column in &source.columns {
        if IGNORED_COLUMNS.contains(&column.as_str()) {
            continue;
        }
        let source_value = source_row.and_then(|r| r.get(column)).and_then(|v| v.clone());
        let target_in_schema = target.has_column(column);
        let target_value = if target_in_schema {
            target_row.and_then(|r| r.get(column)).and_then(|v| v.clone())
        } else {
            None
        };

        let (status, symbol, mut note) = compare_values(
            source_value.as_deref(),
            target_value.as_deref(),
            source_label,
            target_label,
        );
        if !target_in_schema {
            // Schema absence gets explanatory wording instead of the plain
            // missing-value note; the status classification is unchanged.
            note = format!("Column not present in {}", target_label);
        }

        records.push(ComparisonRecord {
            column: column.clone(),
            source_value,
            target_value,
            target_in_schema,
            status,
            symbol,
            note,
        });
    }
    records
}
