use indexmap::IndexMap;
use log::warn;

use crate::matching::{build_comparison, find_matching_rows, DatasetIndex};
use crate::models::{Dataset, ItemComparison, MatchedBy, ITEM_NAME};

/// Which items a run compares and how unmatched ones are handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelection {
    /// Every `Item Name` seen in either dataset; items with no source row
    /// are skipped.
    All,
    /// An explicit list; unmatched items are still reported, flagged with
    /// `MatchedBy::None` and empty sides.
    Selected(Vec<String>),
}

/// Explicit per-run context: both datasets, their display labels, and the
/// key indexes built once at construction. Created fresh for a comparison
/// run and discarded after export.
pub struct CompareSession {
    pub source: Dataset,
    pub target: Dataset,
    pub source_label: String,
    pub target_label: String,
    source_index: DatasetIndex,
    target_index: DatasetIndex,
}

impl CompareSession {
    pub fn new(source: Dataset, target: Dataset, source_label: &str, target_label: &str) -> Self {
        let source_index = DatasetIndex::build(&source);
        let target_index = DatasetIndex::build(&target);
        Self {
            source,
            target,
            source_label: source_label.to_string(),
            target_label: target_label.to_string(),
            source_index,
            target_index,
        }
    }

    /// Sorted union of `Item Name` values across both datasets.
    pub fn all_items(&self) -> Vec<String> {
        if !self.source.has_column(ITEM_NAME) && !self.target.has_column(ITEM_NAME) {
            warn!("neither dataset has an '{}' column; nothing to compare", ITEM_NAME);
            return Vec::new();
        }
        let mut items = self.source.distinct_values(ITEM_NAME);
        for v in self.target.distinct_values(ITEM_NAME) {
            if !items.contains(&v) {
                items.push(v);
            }
        }
        items.sort();
        items
    }

    /// Runs the matcher and comparison builder for one item.
    pub fn compare_item(&self, item: &str) -> ItemComparison {
        let (source_row, target_row, matched_by) = find_matching_rows(
            &self.source,
            &self.source_index,
            &self.target,
            &self.target_index,
            item,
        );
        let records = if source_row.is_some() || target_row.is_some() {
            build_comparison(
                source_row,
                target_row,
                &self.source,
                &self.target,
                &self.source_label,
                &self.target_label,
            )
        } else {
            Vec::new()
        };
        ItemComparison {
            item: item.to_string(),
            matched_by,
            in_source: source_row.is_some(),
            in_target: target_row.is_some(),
            source_row: source_row.cloned(),
            records,
        }
    }

    /// Compares the selected items sequentially, invoking `progress` after
    /// each one with (done, total, item).
    pub fn compare_items<F>(
        &self,
        selection: &ItemSelection,
        mut progress: F,
    ) -> IndexMap<String, ItemComparison>
    where
        F: FnMut(usize, usize, &str),
    {
        let (items, skip_unmatched) = match selection {
            ItemSelection::All => (self.all_items(), true),
            ItemSelection::Selected(list) => (list.clone(), false),
        };
        let total = items.len();
        let mut out = IndexMap::new();
        for (done, item) in items.iter().enumerate() {
            let comparison = self.compare_item(item);
            if skip_unmatched && !comparison.in_source {
                // Bulk runs keep only items the source actually defines.
                progress(done + 1, total, item);
                continue;
            }
            if comparison.matched_by == MatchedBy::None {
                warn!("no matching records found for '{}'", item);
            }
            out.insert(item.clone(), comparison);
            progress(done + 1, total, item);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: &[&str], rows: &[&[&str]]) -> Dataset {
        let mut ds = Dataset::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            ds.push_row(
                row.iter()
                    .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
                    .collect(),
            );
        }
        ds
    }

    #[test]
    fn all_items_is_sorted_union() {
        let source = dataset(&["Item Name"], &[&["WEIGHT"], &["AGE"]]);
        let target = dataset(&["Item Name"], &[&["AGE"], &["HEIGHT"]]);
        let session = CompareSession::new(source, target, "PTD", "SDS");
        assert_eq!(session.all_items(), vec!["AGE", "HEIGHT", "WEIGHT"]);
    }

    #[test]
    fn bulk_selection_skips_source_missing_items() {
        let source = dataset(&["Item Name", "Units"], &[&["AGE", "years"]]);
        let target = dataset(&["Item Name", "Units"], &[&["AGE", "years"], &["HEIGHT", "cm"]]);
        let session = CompareSession::new(source, target, "PTD", "SDS");
        let all = session.compare_items(&ItemSelection::All, |_, _, _| {});
        assert!(all.contains_key("AGE"));
        assert!(!all.contains_key("HEIGHT"));
    }

    #[test]
    fn explicit_selection_reports_unmatched_items() {
        let source = dataset(&["Item Name"], &[&["AGE"]]);
        let target = dataset(&["Item Name"], &[&["AGE"]]);
        let session = CompareSession::new(source, target, "PTD", "SDS");
        let sel = ItemSelection::Selected(vec!["GHOST".into()]);
        let out = session.compare_items(&sel, |_, _, _| {});
        let ghost = &out["GHOST"];
        assert_eq!(ghost.matched_by, MatchedBy::None);
        assert!(!ghost.in_source && !ghost.in_target);
        assert!(ghost.records.is_empty());
    }
}
