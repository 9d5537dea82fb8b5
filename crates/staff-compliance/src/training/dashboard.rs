use super::aggregate::{
    completion_by_category_and_staff_type, completion_by_department_type,
    completion_by_risk_tier, job_title_heatmap, overdue_by_job_title, CategoryStaffTypeEntry,
    ComplianceHeatmap, DepartmentTypeSplit, JobTitleOverdueCount, RiskTierCompletion,
};
use super::catalog::ModuleCatalog;
use super::domain::{ComplianceStatus, PersonRecord, RiskFilter};
use super::gaps::{build_gap_list, prioritize_gaps, GapItem};
use super::status::EvaluationContext;
use super::summary::{completion_pct, evaluate_modules};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotTotals {
    pub module_slots: usize,
    pub compliant: usize,
    pub overdue: usize,
    pub due_soon: usize,
    pub missing: usize,
    pub overall_pct: u8,
}

/// Every population rollup for one reporting date, bundled for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceDashboard {
    pub generated_on: NaiveDate,
    pub due_soon_window_days: u32,
    pub headcount: usize,
    pub totals: SlotTotals,
    pub risk_tiers: Vec<RiskTierCompletion>,
    pub department_split: DepartmentTypeSplit,
    pub category_staff_types: Vec<CategoryStaffTypeEntry>,
    pub heatmap: ComplianceHeatmap,
    pub overdue_by_job_title: Vec<JobTitleOverdueCount>,
    pub priority_gaps: Vec<GapItem>,
}

impl ComplianceDashboard {
    pub fn build(
        records: &[PersonRecord],
        catalog: &ModuleCatalog,
        ctx: &EvaluationContext,
    ) -> Self {
        let mut priority_gaps = build_gap_list(records, catalog, RiskFilter::All, ctx);
        prioritize_gaps(&mut priority_gaps);

        Self {
            generated_on: ctx.today,
            due_soon_window_days: ctx.due_soon_window_days,
            headcount: records.len(),
            totals: slot_totals(records, catalog, ctx),
            risk_tiers: completion_by_risk_tier(records, catalog, None, ctx),
            department_split: completion_by_department_type(records, catalog, ctx),
            category_staff_types: completion_by_category_and_staff_type(records, catalog, ctx),
            heatmap: job_title_heatmap(records, catalog, ctx),
            overdue_by_job_title: overdue_by_job_title(records, catalog, ctx),
            priority_gaps,
        }
    }
}

fn slot_totals(
    records: &[PersonRecord],
    catalog: &ModuleCatalog,
    ctx: &EvaluationContext,
) -> SlotTotals {
    let mut totals = SlotTotals::default();

    for record in records {
        for (_, status) in evaluate_modules(record, catalog, ctx) {
            totals.module_slots += 1;
            match status.status {
                ComplianceStatus::Compliant => totals.compliant += 1,
                ComplianceStatus::Overdue => totals.overdue += 1,
                ComplianceStatus::DueSoon => totals.due_soon += 1,
                ComplianceStatus::Missing => totals.missing += 1,
            }
        }
    }

    totals.overall_pct = completion_pct(totals.compliant, totals.module_slots);
    totals
}
