use anyhow::Result;
use csv::Writer;

use crate::export::xlsx_export::ReportContext;
use crate::models::{IssueRow, SummaryRow};

pub fn export_summary_csv(path: &str, rows: &[SummaryRow], ctx: &ReportContext) -> Result<()> {
    let mut w = Writer::from_path(path)?;
    w.write_record([
        "Item Name".to_string(),
        "Matched By".to_string(),
        format!("In {}", ctx.source_label),
        format!("In {}", ctx.target_label),
        "Total Columns".to_string(),
        "Matches".to_string(),
        "Mismatches".to_string(),
        format!("Missing in {}", ctx.target_label),
        format!("Missing in {}", ctx.source_label),
        "Match %".to_string(),
    ])?;
    for s in rows {
        w.write_record([
            s.item.clone(),
            s.matched_by.as_str().to_string(),
            s.in_source.to_string(),
            s.in_target.to_string(),
            s.total.to_string(),
            s.matches.to_string(),
            s.mismatches.to_string(),
            s.missing_target.to_string(),
            s.missing_source.to_string(),
            format!("{:.1}", s.match_pct),
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_issues_csv(path: &str, issues: &[IssueRow], ctx: &ReportContext) -> Result<()> {
    let mut w = Writer::from_path(path)?;
    w.write_record([
        "Item Name".to_string(),
        "Form Name".to_string(),
        "Form Label".to_string(),
        "Item Group Name".to_string(),
        "Item Group Label".to_string(),
        "Column Name".to_string(),
        format!("{} Value", ctx.source_label),
        format!("{} Value", ctx.target_label),
        "Status".to_string(),
        "Issue Type".to_string(),
    ])?;
    for i in issues {
        w.write_record([
            i.item.clone(),
            i.form_name.clone(),
            i.form_label.clone(),
            i.item_group_name.clone(),
            i.item_group_label.clone(),
            i.column.clone(),
            i.source_value.clone(),
            i.target_value.clone(),
            i.status.as_str().to_string(),
            i.issue_type.clone(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
