use crate::infra::InMemoryStaffDirectory;
use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;
use staff_compliance::error::AppError;
use staff_compliance::roster::RosterImporter;
use staff_compliance::training::{
    build_gap_list, parse_reporting_date, prioritize_gaps, ComplianceDashboard,
    ComplianceReportingService, GapItem, ModuleCatalog, PersonRecord, RiskFilter,
    DEFAULT_DUE_SOON_WINDOW_DAYS,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Roster CSV export with one completion-date column per module
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Evaluation date for the report (defaults to today)
    #[arg(long, value_parser = parse_reporting_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Days before expiry at which training counts as due soon
    #[arg(long, default_value_t = DEFAULT_DUE_SOON_WINDOW_DAYS)]
    pub(crate) window_days: u32,
    /// Print the dashboard as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct GapReportArgs {
    /// Roster CSV export with one completion-date column per module
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Evaluation date for the report (defaults to today)
    #[arg(long, value_parser = parse_reporting_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Restrict to one risk tier: all, high, medium or low
    #[arg(long, default_value = "all", value_parser = parse_risk)]
    pub(crate) risk: RiskFilter,
    /// Show at most this many gaps
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Days before expiry at which training counts as due soon
    #[arg(long, default_value_t = DEFAULT_DUE_SOON_WINDOW_DAYS)]
    pub(crate) window_days: u32,
    /// Print the gap list as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_risk(raw: &str) -> Result<RiskFilter, String> {
    raw.parse::<RiskFilter>().map_err(|err| err.to_string())
}

/// Roster reports evaluate the imported rows directly, so the directory stays
/// empty and rows without an employee id still count.
fn offline_service(window_days: u32) -> ComplianceReportingService<InMemoryStaffDirectory> {
    ComplianceReportingService::new(
        Arc::new(InMemoryStaffDirectory::default()),
        Arc::new(ModuleCatalog::standard()),
        window_days,
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_compliance_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        roster,
        today,
        window_days,
        json,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let records = RosterImporter::from_path(&roster)?;
    let dashboard = offline_service(window_days).evaluate(&records, today);

    if json {
        return print_json(&dashboard);
    }

    for line in render_dashboard(&dashboard) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_gap_report(args: GapReportArgs) -> Result<(), AppError> {
    let GapReportArgs {
        roster,
        today,
        risk,
        limit,
        window_days,
        json,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let records = RosterImporter::from_path(&roster)?;
    let gaps = prioritized_gaps(&records, risk, limit, window_days, today);

    if json {
        return print_json(&gaps);
    }

    println!("Training gaps as of {today} ({} shown)", gaps.len());
    for line in render_gaps(&gaps) {
        println!("{line}");
    }
    Ok(())
}

fn prioritized_gaps(
    records: &[PersonRecord],
    risk: RiskFilter,
    limit: Option<usize>,
    window_days: u32,
    today: NaiveDate,
) -> Vec<GapItem> {
    let service = offline_service(window_days);
    let mut gaps = build_gap_list(records, service.catalog(), risk, &service.context(today));
    prioritize_gaps(&mut gaps);
    if let Some(limit) = limit {
        gaps.truncate(limit);
    }
    gaps
}

pub(crate) fn render_dashboard(dashboard: &ComplianceDashboard) -> Vec<String> {
    let mut lines = vec![
        "Staff training compliance".to_string(),
        format!(
            "Evaluated {} | due-soon window {} days | headcount {}",
            dashboard.generated_on, dashboard.due_soon_window_days, dashboard.headcount
        ),
    ];

    let totals = &dashboard.totals;
    lines.push(format!(
        "Overall: {}% of {} module slots compliant ({} overdue, {} due soon, {} missing)",
        totals.overall_pct, totals.module_slots, totals.overdue, totals.due_soon, totals.missing
    ));

    lines.push(String::new());
    lines.push("Completion by risk tier".to_string());
    for tier in &dashboard.risk_tiers {
        lines.push(format!(
            "- {}: {}% ({}/{})",
            tier.risk_label, tier.completion_pct, tier.compliant, tier.total
        ));
    }

    let split = &dashboard.department_split;
    lines.push(String::new());
    lines.push(format!(
        "Clinical staff: {}% across {} people | Non-clinical staff: {}% across {} people",
        split.clinical_pct,
        split.clinical_headcount,
        split.non_clinical_pct,
        split.non_clinical_headcount
    ));

    lines.push(String::new());
    lines.push("Completion by category".to_string());
    for entry in &dashboard.category_staff_types {
        lines.push(format!(
            "- {}: clinical {}%, non-clinical {}%",
            entry.category_label, entry.clinical_pct, entry.non_clinical_pct
        ));
    }

    if !dashboard.heatmap.rows.is_empty() {
        lines.push(String::new());
        lines.push("Job title heatmap".to_string());
        for row in &dashboard.heatmap.rows {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|cell| format!("{} {}%", cell.category_label, cell.pct))
                .collect();
            lines.push(format!("- {}: {}", row.job_title, cells.join(" | ")));
        }
    }

    if dashboard.overdue_by_job_title.is_empty() {
        lines.push(String::new());
        lines.push("Overdue by job title: none".to_string());
    } else {
        lines.push(String::new());
        lines.push("Overdue by job title".to_string());
        for entry in &dashboard.overdue_by_job_title {
            lines.push(format!("- {}: {}", entry.job_title, entry.overdue));
        }
    }

    lines
}

pub(crate) fn render_gaps(gaps: &[GapItem]) -> Vec<String> {
    gaps.iter()
        .map(|gap| {
            let due = match (gap.due_date, gap.overdue_days) {
                (Some(date), Some(days)) if days > 0 => format!("due {date}, {days} days overdue"),
                (Some(date), Some(days)) => format!("due {date}, {} days left", -days),
                (Some(date), None) => format!("due {date}"),
                (None, _) => "no completion on record".to_string(),
            };
            format!(
                "- [{}] {} ({}, {}): {} {} | {}",
                gap.risk_tier.label(),
                gap.full_name,
                gap.job_title,
                gap.department,
                gap.module_label,
                gap.status_label,
                due
            )
        })
        .collect()
}
