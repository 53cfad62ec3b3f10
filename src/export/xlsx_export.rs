use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};

use crate::models::{IssueRow, ItemComparison, SummaryRow};

/// Excel refuses sheet names beyond 31 characters.
const SHEET_NAME_LIMIT: usize = 31;
/// Width cap for auto-sized issue-sheet columns.
const MAX_COLUMN_WIDTH: usize = 60;

/// Run metadata written alongside the summary counts.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub source_label: String,
    pub target_label: String,
    pub source_rows: usize,
    pub target_rows: usize,
    pub generated_utc: DateTime<Utc>,
}

fn ensure_parent_dir(path: &str) -> Result<()> {
    let p = Path::new(path);
    if let Some(parent) = p.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn header_format() -> Format {
    Format::new().set_bold().set_align(FormatAlign::Center)
}

/// Truncates to the xlsx limit, replaces characters Excel rejects, and
/// de-duplicates against names already used in the workbook.
fn safe_sheet_name(used: &mut HashSet<String>, wanted: &str) -> String {
    let cleaned: String = wanted
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    let mut name: String = cleaned.chars().take(SHEET_NAME_LIMIT).collect();
    let mut n = 2;
    while used.contains(&name) {
        let suffix = format!("~{}", n);
        name = cleaned
            .chars()
            .take(SHEET_NAME_LIMIT - suffix.len())
            .collect::<String>()
            + &suffix;
        n += 1;
    }
    used.insert(name.clone());
    name
}

fn write_summary_sheet(ws: &mut Worksheet, rows: &[SummaryRow], ctx: &ReportContext) -> Result<()> {
    let hfmt = header_format();
    let headers = [
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
    ];
    for (c, h) in headers.iter().enumerate() {
        ws.write_string_with_format(0, c as u16, h, &hfmt)?;
    }
    for (i, s) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        ws.write_string(r, 0, &s.item)?;
        ws.write_string(r, 1, s.matched_by.as_str())?;
        ws.write_string(r, 2, if s.in_source { "\u{2713}" } else { "\u{2717}" })?;
        ws.write_string(r, 3, if s.in_target { "\u{2713}" } else { "\u{2717}" })?;
        ws.write_number(r, 4, s.total as f64)?;
        ws.write_number(r, 5, s.matches as f64)?;
        ws.write_number(r, 6, s.mismatches as f64)?;
        ws.write_number(r, 7, s.missing_target as f64)?;
        ws.write_number(r, 8, s.missing_source as f64)?;
        ws.write_string(r, 9, &format!("{:.1}%", s.match_pct))?;
    }
    // Run metadata below the table.
    let mut r = rows.len() as u32 + 2;
    let kv = |ws: &mut Worksheet, r: &mut u32, k: &str, v: &str| -> Result<()> {
        ws.write_string(*r, 0, k)?;
        ws.write_string(*r, 1, v)?;
        *r += 1;
        Ok(())
    };
    kv(ws, &mut r, &format!("{} rows", ctx.source_label), &ctx.source_rows.to_string())?;
    kv(ws, &mut r, &format!("{} rows", ctx.target_label), &ctx.target_rows.to_string())?;
    kv(ws, &mut r, "Generated (UTC)", &ctx.generated_utc.to_rfc3339())?;
    Ok(())
}

fn write_item_sheet(ws: &mut Worksheet, comparison: &ItemComparison, ctx: &ReportContext) -> Result<()> {
    let hfmt = header_format();
    let headers = [
        "Column Name".to_string(),
        format!("{} Value", ctx.source_label),
        format!("{} Value", ctx.target_label),
        "Status".to_string(),
        "Match".to_string(),
        "Note".to_string(),
    ];
    for (c, h) in headers.iter().enumerate() {
        ws.write_string_with_format(0, c as u16, h, &hfmt)?;
    }
    for (i, rec) in comparison.records.iter().enumerate() {
        let r = (i + 1) as u32;
        ws.write_string(r, 0, &rec.column)?;
        ws.write_string(r, 1, rec.source_value.as_deref().unwrap_or(""))?;
        let target_display = if rec.target_in_schema {
            rec.target_value.clone().unwrap_or_default()
        } else {
            format!("Column not in {}", ctx.target_label)
        };
        ws.write_string(r, 2, &target_display)?;
        ws.write_string(r, 3, rec.status.as_str())?;
        ws.write_string(r, 4, rec.symbol)?;
        ws.write_string(r, 5, &rec.note)?;
    }
    Ok(())
}

fn write_issues_sheet(ws: &mut Worksheet, issues: &[IssueRow], ctx: &ReportContext) -> Result<()> {
    let hfmt = header_format();
    let headers = [
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
    ];
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for (c, h) in headers.iter().enumerate() {
        ws.write_string_with_format(0, c as u16, h, &hfmt)?;
    }

    if issues.is_empty() {
        ws.write_string(1, 0, "No issues found - all compared columns match.")?;
        return Ok(());
    }

    for (i, issue) in issues.iter().enumerate() {
        let r = (i + 1) as u32;
        let cells = [
            issue.item.as_str(),
            issue.form_name.as_str(),
            issue.form_label.as_str(),
            issue.item_group_name.as_str(),
            issue.item_group_label.as_str(),
            issue.column.as_str(),
            issue.source_value.as_str(),
            issue.target_value.as_str(),
            issue.status.as_str(),
            issue.issue_type.as_str(),
        ];
        for (c, v) in cells.iter().enumerate() {
            ws.write_string(r, c as u16, *v)?;
            widths[c] = widths[c].max(v.chars().count());
        }
    }
    for (c, w) in widths.iter().enumerate() {
        let capped = (*w).min(MAX_COLUMN_WIDTH);
        ws.set_column_width(c as u16, (capped + 2) as f64)?;
    }
    Ok(())
}

/// Legacy layout: a "Summary" sheet plus one detail sheet per compared item.
pub fn export_items_xlsx(
    out_path: &str,
    comparisons: &IndexMap<String, ItemComparison>,
    summary: &[SummaryRow],
    ctx: &ReportContext,
) -> Result<()> {
    ensure_parent_dir(out_path)?;
    let mut workbook = Workbook::new();
    let mut used = HashSet::new();

    let mut ws = workbook.add_worksheet();
    ws.set_name(safe_sheet_name(&mut used, "Summary"))?;
    write_summary_sheet(&mut ws, summary, ctx)?;

    for comparison in comparisons.values() {
        let mut ws = workbook.add_worksheet();
        ws.set_name(safe_sheet_name(&mut used, &comparison.item))?;
        write_item_sheet(&mut ws, comparison, ctx)?;
    }

    workbook.save(out_path)?;
    Ok(())
}

/// Comprehensive layout: "Comparison Summary" plus a single consolidated
/// "Issues Only" sheet.
pub fn export_issues_xlsx(
    out_path: &str,
    summary: &[SummaryRow],
    issues: &[IssueRow],
    ctx: &ReportContext,
) -> Result<()> {
    ensure_parent_dir(out_path)?;
    let mut workbook = Workbook::new();

    let mut ws = workbook.add_worksheet();
    ws.set_name("Comparison Summary")?;
    write_summary_sheet(&mut ws, summary, ctx)?;

    let mut ws = workbook.add_worksheet();
    ws.set_name("Issues Only")?;
    write_issues_sheet(&mut ws, issues, ctx)?;

    workbook.save(out_path)?;
    Ok(())
}
