use indexmap::IndexMap;

use ptd_sds_compare::models::{Dataset, MatchStatus};
use ptd_sds_compare::report::{collect_issues, summarize};
use ptd_sds_compare::session::{CompareSession, ItemSelection};

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

fn demo_session() -> CompareSession {
    let cols = [
        "Item Name",
        "Item Group Label",
        "Form Label",
        "Form Name",
        "Item Group Name",
        "Units",
        "Label",
    ];
    let source = dataset(
        &cols,
        &[
            &["AGE", "DEMOG", "Demography", "DM", "Demographics", "years", "Age"],
            &["WEIGHT", "VITALS", "Vitals", "VS", "Vital Signs", "kg", "Weight"],
            &["HEIGHT", "VITALS", "Vitals", "VS", "Vital Signs", "cm", "Height"],
        ],
    );
    let target = dataset(
        &cols,
        &[
            &["AGE", "DEMOG", "Demography", "DM", "Demographics", "years", "Age"],
            &["WEIGHT", "VITALS", "Vitals", "VS", "Vital Signs", "KG ", "Weight"],
            &["HEIGHT", "VITALS", "Vitals", "VS", "Vital Signs", "", "Height"],
        ],
    );
    CompareSession::new(source, target, "PTD", "SDS")
}

#[test]
fn summary_counts_tally_with_underlying_records() {
    let session = demo_session();
    let comparisons = session.compare_items(&ItemSelection::All, |_, _, _| {});
    let summary = summarize(&comparisons);
    for s in &summary {
        let records = &comparisons[&s.item].records;
        assert_eq!(s.total, records.len());
        assert_eq!(
            s.matches,
            records.iter().filter(|r| r.status == MatchStatus::Match).count()
        );
        assert_eq!(
            s.mismatches,
            records.iter().filter(|r| r.status == MatchStatus::Mismatch).count()
        );
        assert_eq!(
            s.missing_source,
            records
                .iter()
                .filter(|r| r.status == MatchStatus::MissingSource)
                .count()
        );
        assert_eq!(
            s.missing_target,
            records
                .iter()
                .filter(|r| r.status == MatchStatus::MissingTarget)
                .count()
        );
    }
}

#[test]
fn issue_rows_round_trip_status_counts() {
    let session = demo_session();
    let comparisons = session.compare_items(&ItemSelection::All, |_, _, _| {});
    let issues = collect_issues(&comparisons, "PTD", "SDS");

    let direct: usize = comparisons
        .values()
        .flat_map(|c| &c.records)
        .filter(|r| r.status != MatchStatus::Match)
        .count();
    assert_eq!(issues.len(), direct);

    for status in [
        MatchStatus::Mismatch,
        MatchStatus::MissingSource,
        MatchStatus::MissingTarget,
    ] {
        let exported = issues.iter().filter(|i| i.status == status).count();
        let tallied = comparisons
            .values()
            .flat_map(|c| &c.records)
            .filter(|r| r.status == status)
            .count();
        assert_eq!(exported, tallied, "status {}", status);
    }
}

#[test]
fn fully_matched_items_do_not_appear_in_issues() {
    let session = demo_session();
    let comparisons = session.compare_items(&ItemSelection::All, |_, _, _| {});
    let issues = collect_issues(&comparisons, "PTD", "SDS");
    assert!(issues.iter().all(|i| i.item != "AGE"));
}

#[test]
fn issue_rows_carry_context_from_the_source_row() {
    let session = demo_session();
    let comparisons = session.compare_items(&ItemSelection::All, |_, _, _| {});
    let issues = collect_issues(&comparisons, "PTD", "SDS");
    let weight = issues.iter().find(|i| i.item == "WEIGHT").unwrap();
    assert_eq!(weight.form_name, "VS");
    assert_eq!(weight.form_label, "Vitals");
    assert_eq!(weight.item_group_name, "Vital Signs");
    assert_eq!(weight.item_group_label, "VITALS");
}

#[test]
fn issue_type_wording_by_status() {
    let session = demo_session();
    let comparisons = session.compare_items(&ItemSelection::All, |_, _, _| {});
    let issues = collect_issues(&comparisons, "PTD", "SDS");

    // WEIGHT Units: "kg" vs "KG " trims to a case mismatch.
    let weight = issues
        .iter()
        .find(|i| i.item == "WEIGHT" && i.column == "Units")
        .unwrap();
    assert_eq!(weight.status, MatchStatus::Mismatch);
    assert_eq!(weight.issue_type, "Value mismatch: 'kg' vs 'KG '");

    // HEIGHT Units is blank on the target side.
    let height = issues
        .iter()
        .find(|i| i.item == "HEIGHT" && i.column == "Units")
        .unwrap();
    assert_eq!(height.status, MatchStatus::MissingTarget);
    assert_eq!(height.issue_type, "Missing in SDS: 'cm'");
}

#[test]
fn empty_comparison_map_produces_empty_tables() {
    let comparisons: IndexMap<String, ptd_sds_compare::models::ItemComparison> = IndexMap::new();
    assert!(summarize(&comparisons).is_empty());
    assert!(collect_issues(&comparisons, "PTD", "SDS").is_empty());
}
