use super::common::*;
use crate::training::aggregate::{
    completion_by_category_and_staff_type, completion_by_department_type,
    completion_by_risk_tier, job_title_heatmap, overdue_by_job_title, DepartmentTypeSplit,
    SlotTally, UNASSIGNED_JOB_TITLE,
};
use crate::training::catalog::ModuleCatalog;
use crate::training::dashboard::ComplianceDashboard;
use crate::training::domain::{RiskTier, TrainingCategory};

#[test]
fn risk_tier_completion_is_slot_weighted() {
    let tiers = completion_by_risk_tier(&population(), &catalog(), None, &ctx());

    let summary: Vec<(RiskTier, usize, usize, u8)> = tiers
        .iter()
        .map(|tier| (tier.risk_tier, tier.total, tier.compliant, tier.completion_pct))
        .collect();
    assert_eq!(
        summary,
        vec![
            (RiskTier::High, 8, 4, 50),
            (RiskTier::Medium, 4, 2, 50),
            (RiskTier::Low, 4, 1, 25),
        ]
    );
}

#[test]
fn risk_tier_department_filter_ignores_case() {
    let tiers = completion_by_risk_tier(&population(), &catalog(), Some(" WARD 7 "), &ctx());

    let pcts: Vec<u8> = tiers.iter().map(|tier| tier.completion_pct).collect();
    assert_eq!(pcts, vec![75, 50, 50]);

    let estates = completion_by_risk_tier(&population(), &catalog(), Some("Estates"), &ctx());
    assert_eq!(estates[0].total, 4, "carol and dan both match 'estates'");
}

#[test]
fn risk_tier_completion_for_unknown_department_is_zeroed() {
    let tiers = completion_by_risk_tier(&population(), &catalog(), Some("Radiology"), &ctx());

    assert_eq!(tiers.len(), 3);
    assert!(tiers
        .iter()
        .all(|tier| tier.total == 0 && tier.completion_pct == 0));
}

#[test]
fn department_type_split_averages_person_percentages() {
    let split = completion_by_department_type(&population(), &catalog(), &ctx());

    assert_eq!(split.clinical_pct, 63, "(100 + 25) / 2 rounds up");
    assert_eq!(split.non_clinical_pct, 25, "(50 + 0) / 2");
    assert_eq!(split.clinical_headcount, 2);
    assert_eq!(split.non_clinical_headcount, 2);
}

#[test]
fn department_type_split_for_empty_population_is_zero() {
    let split = completion_by_department_type(&[], &catalog(), &ctx());
    assert_eq!(split, DepartmentTypeSplit::default());
    assert_eq!(split.clinical_pct, 0);
    assert_eq!(split.non_clinical_pct, 0);
}

#[test]
fn category_staff_type_tracks_both_partitions() {
    let entries = completion_by_category_and_staff_type(&population(), &catalog(), &ctx());

    let infection = entries
        .iter()
        .find(|entry| entry.category == TrainingCategory::InfectionControl)
        .expect("infection control present");
    assert_eq!(
        infection.clinical,
        SlotTally {
            total: 4,
            compliant: 3
        }
    );
    assert_eq!(infection.clinical_pct, 75);
    assert_eq!(infection.non_clinical_pct, 25);

    let governance = entries
        .iter()
        .find(|entry| entry.category == TrainingCategory::Governance)
        .expect("governance present");
    assert_eq!(governance.clinical_pct, 50);
    assert_eq!(governance.non_clinical_pct, 0);
}

#[test]
fn heatmap_buckets_blank_titles_and_orders_axes() {
    let heatmap = job_title_heatmap(&population(), &catalog(), &ctx());

    assert_eq!(
        heatmap.job_titles,
        vec!["Porter", "Staff Nurse", UNASSIGNED_JOB_TITLE]
    );
    assert_eq!(
        heatmap.categories,
        vec![
            TrainingCategory::FireSafety,
            TrainingCategory::InfectionControl,
            TrainingCategory::Governance,
        ]
    );

    let grid: Vec<Vec<u8>> = heatmap
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|cell| cell.pct).collect())
        .collect();
    assert_eq!(grid, vec![vec![100, 50, 0], vec![50, 75, 50], vec![0, 0, 0]]);

    let unassigned = &heatmap.rows[2];
    assert_eq!(unassigned.cells[1].total, 2);
}

#[test]
fn heatmap_with_empty_catalog_has_no_cells() {
    let heatmap = job_title_heatmap(&population(), &ModuleCatalog::empty(), &ctx());

    assert!(heatmap.categories.is_empty());
    assert!(heatmap.rows.iter().all(|row| row.cells.is_empty()));
    assert!(job_title_heatmap(&[], &catalog(), &ctx()).rows.is_empty());
}

#[test]
fn empty_catalog_yields_empty_or_zeroed_rollups() {
    let empty = ModuleCatalog::empty();

    assert!(completion_by_category_and_staff_type(&population(), &empty, &ctx()).is_empty());
    assert!(overdue_by_job_title(&population(), &empty, &ctx()).is_empty());

    let tiers = completion_by_risk_tier(&population(), &empty, None, &ctx());
    assert_eq!(tiers.len(), 3);
    assert!(tiers
        .iter()
        .all(|tier| tier.total == 0 && tier.completion_pct == 0));

    let split = completion_by_department_type(&population(), &empty, &ctx());
    assert_eq!(split.clinical_pct, 0);
    assert_eq!(split.non_clinical_pct, 0);
}

#[test]
fn overdue_counts_rank_job_titles() {
    let mut records = population();
    records.push(
        alice()
            .with_completion("fire_safety", OVERDUE)
            .with_completion("information_governance", OVERDUE),
    );

    let counts = overdue_by_job_title(&records, &catalog(), &ctx());
    let ranked: Vec<(&str, usize)> = counts
        .iter()
        .map(|entry| (entry.job_title.as_str(), entry.overdue))
        .collect();
    assert_eq!(ranked, vec![("Staff Nurse", 3), ("Porter", 1)]);
}

#[test]
fn aggregators_are_idempotent() {
    let records = population();
    let first = ComplianceDashboard::build(&records, &catalog(), &ctx());
    let second = ComplianceDashboard::build(&records, &catalog(), &ctx());

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn dashboard_totals_cover_every_slot() {
    let dashboard = ComplianceDashboard::build(&population(), &catalog(), &ctx());

    assert_eq!(dashboard.headcount, 4);
    assert_eq!(dashboard.generated_on, today());
    assert_eq!(dashboard.totals.module_slots, 16);
    assert_eq!(dashboard.totals.compliant, 7);
    assert_eq!(dashboard.totals.overdue, 2);
    assert_eq!(dashboard.totals.due_soon, 1);
    assert_eq!(dashboard.totals.missing, 6);
    assert_eq!(dashboard.totals.overall_pct, 44);
    assert_eq!(dashboard.priority_gaps.len(), 9);
    assert_eq!(dashboard.priority_gaps[0].risk_tier, RiskTier::High);
}

#[test]
fn dashboard_for_empty_population_is_zeroed() {
    let dashboard = ComplianceDashboard::build(&[], &catalog(), &ctx());

    assert_eq!(dashboard.headcount, 0);
    assert_eq!(dashboard.totals.overall_pct, 0);
    assert!(dashboard.priority_gaps.is_empty());
    assert!(dashboard.overdue_by_job_title.is_empty());
    assert!(dashboard
        .risk_tiers
        .iter()
        .all(|tier| tier.completion_pct == 0));
}
