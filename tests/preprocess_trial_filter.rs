use ptd_sds_compare::models::Dataset;
use ptd_sds_compare::preprocess::preprocess_ptd;

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
fn keeps_only_rows_used_in_trial_case_insensitively() {
    let ds = dataset(
        &["Item Name", "Used in trial (Y, N, Mod)"],
        &[
            &["A", "Y"],
            &["B", "N"],
            &["C", "Mod"],
            &["D", "y"],
        ],
    );
    let outcome = preprocess_ptd(ds, true);
    assert_eq!(outcome.original_rows, 4);
    assert_eq!(outcome.filtered_rows, 2);
    let kept: Vec<_> = outcome
        .dataset
        .rows
        .iter()
        .map(|r| r["Item Name"].clone().unwrap())
        .collect();
    assert_eq!(kept, vec!["A", "D"]);
}

#[test]
fn trailing_space_and_short_header_spellings_are_accepted() {
    for header in ["Used in trial (Y, N, Mod) ", "Used in trial"] {
        let ds = dataset(&["Item Name", header], &[&["A", " Y "], &["B", "N"]]);
        let outcome = preprocess_ptd(ds, true);
        assert_eq!(outcome.trial_column.as_deref(), Some(header));
        assert_eq!(outcome.filtered_rows, 1);
    }
}

#[test]
fn missing_indicator_column_passes_through_unfiltered() {
    let ds = dataset(&["Item Name"], &[&["A"], &["B"]]);
    let outcome = preprocess_ptd(ds, true);
    assert_eq!(outcome.trial_column, None);
    assert_eq!(outcome.original_rows, 2);
    assert_eq!(outcome.filtered_rows, 2);
}

#[test]
fn fixed_columns_are_dropped_when_present() {
    let ds = dataset(
        &["Item Name", "Modification Comments", "Library Source", "Units"],
        &[&["A", "changed", "lib1", "kg"]],
    );
    let outcome = preprocess_ptd(ds, false);
    assert_eq!(outcome.dataset.columns, vec!["Item Name", "Units"]);
    assert!(!outcome.dataset.rows[0].contains_key("Modification Comments"));
    assert!(!outcome.dataset.rows[0].contains_key("Library Source"));
}

#[test]
fn filter_can_be_disabled_while_columns_still_drop() {
    let ds = dataset(
        &["Item Name", "Used in trial (Y, N, Mod)", "Library Source"],
        &[&["A", "N", "lib"]],
    );
    let outcome = preprocess_ptd(ds, false);
    assert_eq!(outcome.filtered_rows, 1);
    assert!(!outcome.dataset.has_column("Library Source"));
}
