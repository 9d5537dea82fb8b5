use super::catalog::{ModuleCatalog, TrainingModule};
use super::domain::{ComplianceStatus, PersonRecord, RiskFilter, RiskTier};
use super::status::{EvaluationContext, ModuleStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// One (person, module) pair that is not fully compliant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapItem {
    pub full_name: String,
    pub department: String,
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub risk_tier: RiskTier,
    pub module_key: &'static str,
    pub module_label: &'static str,
    pub status: ComplianceStatus,
    pub status_label: &'static str,
    pub due_date: Option<NaiveDate>,
    pub overdue_days: Option<i64>,
}

impl GapItem {
    pub(crate) fn new(
        record: &PersonRecord,
        module: &TrainingModule,
        status: ModuleStatus,
    ) -> Self {
        Self {
            full_name: record.full_name.clone(),
            department: record.department.clone(),
            job_title: record.job_title.clone(),
            employee_id: record.employee_id.clone(),
            risk_tier: module.risk_tier,
            module_key: module.key,
            module_label: module.label,
            status: status.status,
            status_label: status.status.label(),
            due_date: status.due_date,
            overdue_days: status.overdue_days,
        }
    }
}

/// Flatten every non-compliant module-slot into a list, person-major then in
/// catalog order. The list is not sorted; see [`prioritize_gaps`].
pub fn build_gap_list(
    records: &[PersonRecord],
    catalog: &ModuleCatalog,
    filter: RiskFilter,
    ctx: &EvaluationContext,
) -> Vec<GapItem> {
    let mut gaps = Vec::new();

    for record in records {
        for module in catalog.modules() {
            if !filter.admits(module.risk_tier) {
                continue;
            }

            let status = ctx.evaluate(record.completion(module.key), module.validity_months);
            if status.status.is_gap() {
                gaps.push(GapItem::new(record, module, status));
            }
        }
    }

    gaps
}

/// Stable sort: risk tier first (high to low), then due date ascending with
/// undated (missing) items ahead of dated ones.
pub fn prioritize_gaps(gaps: &mut [GapItem]) {
    gaps.sort_by(|a, b| {
        a.risk_tier
            .priority()
            .cmp(&b.risk_tier.priority())
            .then_with(|| a.due_date.cmp(&b.due_date))
    });
}
