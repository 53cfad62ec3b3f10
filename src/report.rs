use indexmap::IndexMap;

use crate::models::{
    IssueRow, ItemComparison, MatchStatus, Row, SummaryRow, FORM_LABEL, FORM_NAME,
    ITEM_GROUP_LABEL, ITEM_GROUP_NAME,
};

/// Derives the per-item counts. Match percentage is 0.0 for an item with
/// nothing compared rather than a division error.
pub fn derive_summary(comparison: &ItemComparison) -> SummaryRow {
    let mut matches = 0usize;
    let mut mismatches = 0usize;
    let mut missing_source = 0usize;
    let mut missing_target = 0usize;
    for rec in &comparison.records {
        match rec.status {
            MatchStatus::Match => matches += 1,
            MatchStatus::Mismatch => mismatches += 1,
            MatchStatus::MissingSource => missing_source += 1,
            MatchStatus::MissingTarget => missing_target += 1,
        }
    }
    let total = comparison.records.len();
    let match_pct = if total == 0 {
        0.0
    } else {
        matches as f64 / total as f64 * 100.0
    };
    SummaryRow {
        item: comparison.item.clone(),
        matched_by: comparison.matched_by,
        in_source: comparison.in_source,
        in_target: comparison.in_target,
        total,
        matches,
        mismatches,
        missing_source,
        missing_target,
        match_pct,
    }
}

pub fn summarize(comparisons: &IndexMap<String, ItemComparison>) -> Vec<SummaryRow> {
    comparisons.values().map(derive_summary).collect()
}

fn context_field(row: Option<&Row>, column: &str) -> String {
    row.and_then(|r| r.get(column))
        .and_then(|v| v.clone())
        .unwrap_or_default()
}

fn display_value(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Filters to items below 100% and, within them, to the records that are
/// not matches. Each issue row carries the item's form/group context from
/// its source row and a human-readable issue type.
pub fn collect_issues(
    comparisons: &IndexMap<String, ItemComparison>,
    source_label: &str,
    target_label: &str,
) -> Vec<IssueRow> {
    let mut issues = Vec::new();
    for comparison in comparisons.values() {
        let summary = derive_summary(comparison);
        if summary.total > 0 && summary.match_pct >= 100.0 {
            continue;
        }
        let src_row = comparison.source_row.as_ref();
        for rec in &comparison.records {
            if rec.status == MatchStatus::Match {
                continue;
            }
            let source_value = display_value(&rec.source_value);
            let target_value = if rec.target_in_schema {
                display_value(&rec.target_value)
            } else {
                format!("Column not in {}", target_label)
            };
            let issue_type = match rec.status {
                MatchStatus::Mismatch => {
                    format!("Value mismatch: '{}' vs '{}'", source_value, target_value)
                }
                MatchStatus::MissingTarget if !rec.target_in_schema => {
                    format!("Column not present in {}: '{}'", target_label, source_value)
                }
                MatchStatus::MissingTarget => {
                    format!("Missing in {}: '{}'", target_label, source_value)
                }
                MatchStatus::MissingSource => {
                    format!("Missing in {}: '{}'", source_label, target_value)
                }
                MatchStatus::Match => unreachable!(),
            };
            issues.push(IssueRow {
                item: comparison.item.clone(),
                form_name: context_field(src_row, FORM_NAME),
                form_label: context_field(src_row, FORM_LABEL),
                item_group_name: context_field(src_row, ITEM_GROUP_NAME),
                item_group_label: context_field(src_row, ITEM_GROUP_LABEL),
                column: rec.column.clone(),
                source_value,
                target_value,
                status: rec.status,
                issue_type,
            });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComparisonRecord, MatchedBy};

    fn record(column: &str, status: MatchStatus) -> ComparisonRecord {
        ComparisonRecord {
            column: column.into(),
            source_value: Some("a".into()),
            target_value: Some("b".into()),
            target_in_schema: true,
            status,
            symbol: status.symbol(),
            note: String::new(),
        }
    }

    fn comparison(item: &str, records: Vec<ComparisonRecord>) -> ItemComparison {
        ItemComparison {
            item: item.into(),
            matched_by: MatchedBy::ItemName,
            in_source: true,
            in_target: true,
            source_row: None,
            records,
        }
    }

    #[test]
    fn zero_records_yield_zero_percent() {
        let summary = derive_summary(&comparison("EMPTY", vec![]));
        assert_eq!(summary.total, 0);
        assert_eq!(summary.match_pct, 0.0);
    }

    #[test]
    fn fully_matched_items_are_excluded_from_issues() {
        let mut map = IndexMap::new();
        map.insert(
            "AGE".to_string(),
            comparison("AGE", vec![record("Units", MatchStatus::Match)]),
        );
        map.insert(
            "WEIGHT".to_string(),
            comparison(
                "WEIGHT",
                vec![
                    record("Units", MatchStatus::Match),
                    record("Label", MatchStatus::Mismatch),
                ],
            ),
        );
        let issues = collect_issues(&map, "PTD", "SDS");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].item, "WEIGHT");
        assert_eq!(issues[0].column, "Label");
    }

    #[test]
    fn issue_counts_round_trip_against_records() {
        let mut map = IndexMap::new();
        map.insert(
            "X".to_string(),
            comparison(
                "X",
                vec![
                    record("A", MatchStatus::Mismatch),
                    record("B", MatchStatus::MissingTarget),
                    record("C", MatchStatus::MissingSource),
                    record("D", MatchStatus::Match),
                ],
            ),
        );
        let issues = collect_issues(&map, "PTD", "SDS");
        let direct: usize = map
            .values()
            .flat_map(|c| &c.records)
            .filter(|r| r.status != MatchStatus::Match)
            .count();
        assert_eq!(issues.len(), direct);
    }
}
