use anyhow::{Context, Result};
use env_logger::Env;
use log::{error, info};

use ptd_sds_compare::cli;
use ptd_sds_compare::config::RunConfig;
use ptd_sds_compare::export::csv_export::{export_issues_csv, export_summary_csv};
use ptd_sds_compare::export::xlsx_export::{export_issues_xlsx, export_items_xlsx, ReportContext};
use ptd_sds_compare::load::load_dataset;
use ptd_sds_compare::models::{Dataset, Direction, ReportMode, Role};
use ptd_sds_compare::preprocess::preprocess_ptd;
use ptd_sds_compare::report;
use ptd_sds_compare::session::{CompareSession, ItemSelection};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Loads the two datasets in source/target order for the configured
/// direction. PTD inputs are preprocessed; SDS-to-SDS runs load both sides
/// as plain SDS.
fn load_inputs(cfg: &RunConfig) -> Result<(Dataset, Dataset)> {
    let load = |path: &std::path::PathBuf, role: Role| -> Result<Dataset> {
        load_dataset(path, role).with_context(|| format!("loading {}", path.display()))
    };

    match cfg.direction {
        Direction::PtdToSds | Direction::SdsToPtd => {
            let ptd_path = cfg.ptd_path.as_ref().context("PTD input path not set")?;
            let sds_path = cfg.sds_path.as_ref().context("SDS input path not set")?;
            let raw_ptd = load(ptd_path, Role::Ptd)?;
            let outcome = preprocess_ptd(raw_ptd, cfg.trial_filter);
            info!(
                "PTD dataset: {} rows loaded, {} after preprocessing",
                outcome.original_rows, outcome.filtered_rows
            );
            let ptd = outcome.dataset;
            let sds = load(sds_path, Role::Sds)?;
            info!("SDS dataset: {} rows, {} columns", sds.rows.len(), sds.columns.len());
            if cfg.direction == Direction::PtdToSds {
                Ok((ptd, sds))
            } else {
                Ok((sds, ptd))
            }
        }
        Direction::SdsToSds => {
            let a = load(cfg.sds_path.as_ref().context("SDS input path not set")?, Role::Sds)?;
            let b = load(cfg.sds2_path.as_ref().context("second SDS input path not set")?, Role::Sds)?;
            info!(
                "SDS A: {} rows | SDS B: {} rows",
                a.rows.len(),
                b.rows.len()
            );
            Ok((a, b))
        }
    }
}

fn run() -> Result<()> {
    let cfg = cli::parse_run_config()?;
    let (source_label, target_label) = cfg.direction.labels();

    let (source, target) = load_inputs(&cfg)?;
    let session = CompareSession::new(source, target, source_label, target_label);

    let selection = if cfg.items.is_empty() {
        ItemSelection::All
    } else {
        ItemSelection::Selected(cfg.items.clone())
    };
    let item_count = match &selection {
        ItemSelection::All => session.all_items().len(),
        ItemSelection::Selected(list) => list.len(),
    };
    info!(
        "comparing {} items, {} -> {}",
        item_count, source_label, target_label
    );

    let comparisons = session.compare_items(&selection, |done, total, item| {
        if done % 100 == 0 || done == total {
            info!("compared {}/{} (last: {})", done, total, item);
        }
    });

    let summary = report::summarize(&comparisons);
    let issues = report::collect_issues(&comparisons, source_label, target_label);
    let items_with_issues = summary.iter().filter(|s| s.match_pct < 100.0).count();
    info!(
        "{} items compared, {} with issues, {} issue rows",
        summary.len(),
        items_with_issues,
        issues.len()
    );

    let ctx = ReportContext {
        source_label: source_label.to_string(),
        target_label: target_label.to_string(),
        source_rows: session.source.rows.len(),
        target_rows: session.target.rows.len(),
        generated_utc: chrono::Utc::now(),
    };

    let fmt = cfg.format.as_str();
    if fmt == "xlsx" || fmt == "both" {
        let xlsx_path = if cfg.out_path.to_ascii_lowercase().ends_with(".xlsx") {
            cfg.out_path.clone()
        } else if cfg.out_path.to_ascii_lowercase().ends_with(".csv") {
            cfg.out_path.replace(".csv", ".xlsx")
        } else {
            cfg.out_path.clone() + ".xlsx"
        };
        match cfg.report {
            ReportMode::Items => export_items_xlsx(&xlsx_path, &comparisons, &summary, &ctx)?,
            ReportMode::Issues => export_issues_xlsx(&xlsx_path, &summary, &issues, &ctx)?,
        }
        info!("XLSX report written to {}", xlsx_path);
    }
    if fmt == "csv" || fmt == "both" {
        let base = cfg
            .out_path
            .trim_end_matches(".xlsx")
            .trim_end_matches(".csv")
            .to_string();
        let summary_path = format!("{}_summary.csv", base);
        let issues_path = format!("{}_issues.csv", base);
        export_summary_csv(&summary_path, &summary, &ctx)?;
        export_issues_csv(&issues_path, &issues, &ctx)?;
        info!("CSV reports written to {} and {}", summary_path, issues_path);
    }

    info!("Done.");
    Ok(())
}
