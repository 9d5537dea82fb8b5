use super::catalog::{ModuleCatalog, TrainingModule};
use super::domain::{ComplianceStatus, PersonRecord, RiskTier, TrainingCategory};
use super::gaps::GapItem;
use super::status::{EvaluationContext, ModuleStatus};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDetail {
    pub key: &'static str,
    pub label: &'static str,
    pub risk_tier: RiskTier,
    pub category: TrainingCategory,
    pub category_label: &'static str,
    pub status: ComplianceStatus,
    pub status_label: &'static str,
    pub due_date: Option<NaiveDate>,
    pub overdue_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSummary {
    pub modules: Vec<ModuleDetail>,
    pub total: usize,
    pub compliant: usize,
    pub overdue: usize,
    pub due_soon: usize,
    pub missing: usize,
    pub pct: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCompletion {
    pub category: TrainingCategory,
    pub category_label: &'static str,
    pub total: usize,
    pub compliant: usize,
    pub pct: u8,
}

/// Rounded share of compliant slots, `0` when there are no slots at all.
pub fn completion_pct(compliant: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }

    let pct = (compliant as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Evaluate every catalog module for one person.
pub(crate) fn evaluate_modules<'a>(
    record: &'a PersonRecord,
    catalog: &'a ModuleCatalog,
    ctx: &'a EvaluationContext,
) -> impl Iterator<Item = (&'a TrainingModule, ModuleStatus)> + 'a {
    catalog.modules().iter().map(move |module| {
        let status = ctx.evaluate(record.completion(module.key), module.validity_months);
        (module, status)
    })
}

pub fn summarize_person(
    record: &PersonRecord,
    catalog: &ModuleCatalog,
    ctx: &EvaluationContext,
) -> PersonSummary {
    let mut summary = PersonSummary {
        modules: Vec::with_capacity(catalog.len()),
        total: catalog.len(),
        compliant: 0,
        overdue: 0,
        due_soon: 0,
        missing: 0,
        pct: 0,
    };

    for (module, status) in evaluate_modules(record, catalog, ctx) {
        match status.status {
            ComplianceStatus::Compliant => summary.compliant += 1,
            ComplianceStatus::Overdue => summary.overdue += 1,
            ComplianceStatus::DueSoon => summary.due_soon += 1,
            ComplianceStatus::Missing => summary.missing += 1,
        }

        let category = catalog.category_of(module.key);
        summary.modules.push(ModuleDetail {
            key: module.key,
            label: module.label,
            risk_tier: module.risk_tier,
            category,
            category_label: category.label(),
            status: status.status,
            status_label: status.status.label(),
            due_date: status.due_date,
            overdue_days: status.overdue_days,
        });
    }

    summary.pct = completion_pct(summary.compliant, summary.total);
    summary
}

/// The nearest due-soon or overdue deadline for one person. Ties keep catalog
/// order; an undated at-risk item sorts before every dated one.
pub fn find_next_due(
    record: &PersonRecord,
    catalog: &ModuleCatalog,
    ctx: &EvaluationContext,
) -> Option<GapItem> {
    evaluate_modules(record, catalog, ctx)
        .filter(|(_, status)| status.status.is_at_risk())
        .min_by_key(|(_, status)| status.due_date)
        .map(|(module, status)| GapItem::new(record, module, status))
}

pub fn summarize_categories_for_person(
    record: &PersonRecord,
    catalog: &ModuleCatalog,
    ctx: &EvaluationContext,
) -> Vec<CategoryCompletion> {
    let mut rollup: Vec<CategoryCompletion> = catalog
        .categories()
        .into_iter()
        .map(|category| CategoryCompletion {
            category,
            category_label: category.label(),
            total: 0,
            compliant: 0,
            pct: 0,
        })
        .collect();

    for (module, status) in evaluate_modules(record, catalog, ctx) {
        let category = catalog.category_of(module.key);
        if let Some(entry) = rollup.iter_mut().find(|entry| entry.category == category) {
            entry.total += 1;
            if status.status == ComplianceStatus::Compliant {
                entry.compliant += 1;
            }
        }
    }

    for entry in &mut rollup {
        entry.pct = completion_pct(entry.compliant, entry.total);
    }

    rollup
}
