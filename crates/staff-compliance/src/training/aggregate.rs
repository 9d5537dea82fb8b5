//! Population-level rollups over a collection of person records.
//!
//! Every aggregator is independent of the others and recomputes from the
//! records it is handed. Empty populations and empty catalogs produce zeroed
//! or empty structures.

use super::catalog::ModuleCatalog;
use super::domain::{ComplianceStatus, PersonRecord, RiskTier, TrainingCategory};
use super::status::EvaluationContext;
use super::summary::{completion_pct, evaluate_modules, summarize_person};
use serde::Serialize;
use std::collections::BTreeMap;

/// Label used for staff whose job title is blank.
pub const UNASSIGNED_JOB_TITLE: &str = "Unassigned";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotTally {
    pub total: usize,
    pub compliant: usize,
}

impl SlotTally {
    fn record(&mut self, status: ComplianceStatus) {
        self.total += 1;
        if status == ComplianceStatus::Compliant {
            self.compliant += 1;
        }
    }

    pub fn pct(&self) -> u8 {
        completion_pct(self.compliant, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskTierCompletion {
    pub risk_tier: RiskTier,
    pub risk_label: &'static str,
    pub total: usize,
    pub compliant: usize,
    pub completion_pct: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DepartmentTypeSplit {
    pub clinical_pct: u8,
    pub non_clinical_pct: u8,
    pub clinical_headcount: usize,
    pub non_clinical_headcount: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStaffTypeEntry {
    pub category: TrainingCategory,
    pub category_label: &'static str,
    pub clinical: SlotTally,
    pub non_clinical: SlotTally,
    pub clinical_pct: u8,
    pub non_clinical_pct: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub category: TrainingCategory,
    pub category_label: &'static str,
    pub total: usize,
    pub compliant: usize,
    pub pct: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapRow {
    pub job_title: String,
    pub cells: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceHeatmap {
    pub job_titles: Vec<String>,
    pub categories: Vec<TrainingCategory>,
    pub rows: Vec<HeatmapRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobTitleOverdueCount {
    pub job_title: String,
    pub overdue: usize,
}

fn job_title_bucket(record: &PersonRecord) -> String {
    let trimmed = record.job_title.trim();
    if trimmed.is_empty() {
        UNASSIGNED_JOB_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

fn in_department(record: &PersonRecord, department: &str) -> bool {
    record.department.trim().to_lowercase() == department.trim().to_lowercase()
}

/// Slot-weighted completion per risk tier, optionally restricted to one
/// department (matched case-insensitively).
pub fn completion_by_risk_tier(
    records: &[PersonRecord],
    catalog: &ModuleCatalog,
    department: Option<&str>,
    ctx: &EvaluationContext,
) -> Vec<RiskTierCompletion> {
    let mut tallies = [SlotTally::default(); 3];

    for record in records
        .iter()
        .filter(|record| department.map_or(true, |dept| in_department(record, dept)))
    {
        for (module, status) in evaluate_modules(record, catalog, ctx) {
            tallies[module.risk_tier.priority() as usize].record(status.status);
        }
    }

    RiskTier::ordered()
        .into_iter()
        .map(|tier| {
            let tally = tallies[tier.priority() as usize];
            RiskTierCompletion {
                risk_tier: tier,
                risk_label: tier.label(),
                total: tally.total,
                compliant: tally.compliant,
                completion_pct: tally.pct(),
            }
        })
        .collect()
}

/// Average of individual person percentages for clinical and non-clinical
/// staff. Each person counts once regardless of how many modules they hold.
pub fn completion_by_department_type(
    records: &[PersonRecord],
    catalog: &ModuleCatalog,
    ctx: &EvaluationContext,
) -> DepartmentTypeSplit {
    let mut clinical: Vec<u8> = Vec::new();
    let mut non_clinical: Vec<u8> = Vec::new();

    for record in records {
        let pct = summarize_person(record, catalog, ctx).pct;
        if record.is_clinical {
            clinical.push(pct);
        } else {
            non_clinical.push(pct);
        }
    }

    DepartmentTypeSplit {
        clinical_pct: average_pct(&clinical),
        non_clinical_pct: average_pct(&non_clinical),
        clinical_headcount: clinical.len(),
        non_clinical_headcount: non_clinical.len(),
    }
}

fn average_pct(values: &[u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }

    let sum: u64 = values.iter().map(|value| u64::from(*value)).sum();
    (sum as f64 / values.len() as f64).round().clamp(0.0, 100.0) as u8
}

pub fn completion_by_category_and_staff_type(
    records: &[PersonRecord],
    catalog: &ModuleCatalog,
    ctx: &EvaluationContext,
) -> Vec<CategoryStaffTypeEntry> {
    let categories = catalog.categories();
    let mut clinical = vec![SlotTally::default(); categories.len()];
    let mut non_clinical = vec![SlotTally::default(); categories.len()];

    for record in records {
        let tallies = if record.is_clinical {
            &mut clinical
        } else {
            &mut non_clinical
        };

        for (module, status) in evaluate_modules(record, catalog, ctx) {
            let category = catalog.category_of(module.key);
            if let Some(index) = categories.iter().position(|c| *c == category) {
                tallies[index].record(status.status);
            }
        }
    }

    categories
        .into_iter()
        .enumerate()
        .map(|(index, category)| CategoryStaffTypeEntry {
            category,
            category_label: category.label(),
            clinical: clinical[index],
            non_clinical: non_clinical[index],
            clinical_pct: clinical[index].pct(),
            non_clinical_pct: non_clinical[index].pct(),
        })
        .collect()
}

/// Job title × category grid of compliant module-slot percentages. Job titles
/// are ordered alphabetically, categories by catalog order.
pub fn job_title_heatmap(
    records: &[PersonRecord],
    catalog: &ModuleCatalog,
    ctx: &EvaluationContext,
) -> ComplianceHeatmap {
    let categories = catalog.categories();
    let mut grid: BTreeMap<String, Vec<SlotTally>> = BTreeMap::new();

    for record in records {
        let row = grid
            .entry(job_title_bucket(record))
            .or_insert_with(|| vec![SlotTally::default(); categories.len()]);

        for (module, status) in evaluate_modules(record, catalog, ctx) {
            let category = catalog.category_of(module.key);
            if let Some(index) = categories.iter().position(|c| *c == category) {
                row[index].record(status.status);
            }
        }
    }

    let rows: Vec<HeatmapRow> = grid
        .into_iter()
        .map(|(job_title, tallies)| HeatmapRow {
            job_title,
            cells: categories
                .iter()
                .zip(tallies)
                .map(|(category, tally)| HeatmapCell {
                    category: *category,
                    category_label: category.label(),
                    total: tally.total,
                    compliant: tally.compliant,
                    pct: tally.pct(),
                })
                .collect(),
        })
        .collect();

    ComplianceHeatmap {
        job_titles: rows.iter().map(|row| row.job_title.clone()).collect(),
        categories,
        rows,
    }
}

/// Overdue module-slots per job title, most overdue first. Titles with no
/// overdue slots are omitted.
pub fn overdue_by_job_title(
    records: &[PersonRecord],
    catalog: &ModuleCatalog,
    ctx: &EvaluationContext,
) -> Vec<JobTitleOverdueCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for record in records {
        let overdue = evaluate_modules(record, catalog, ctx)
            .filter(|(_, status)| status.status == ComplianceStatus::Overdue)
            .count();
        if overdue > 0 {
            *counts.entry(job_title_bucket(record)).or_default() += overdue;
        }
    }

    let mut ranked: Vec<JobTitleOverdueCount> = counts
        .into_iter()
        .map(|(job_title, overdue)| JobTitleOverdueCount { job_title, overdue })
        .collect();
    ranked.sort_by(|a, b| b.overdue.cmp(&a.overdue));
    ranked
}
