use super::common::*;
use crate::training::catalog::ModuleCatalog;
use crate::training::domain::{ComplianceStatus, PersonRecord, TrainingCategory};
use crate::training::summary::{
    find_next_due, summarize_categories_for_person, summarize_person,
};

#[test]
fn nine_of_twelve_compliant_rounds_to_seventy_five() {
    let catalog = ModuleCatalog::standard();
    let record = catalog
        .modules()
        .iter()
        .take(9)
        .fold(PersonRecord::new("Nina Patel"), |record, module| {
            record.with_completion(module.key, COMPLIANT)
        });

    let summary = summarize_person(&record, &catalog, &ctx());

    assert_eq!(summary.total, 12);
    assert_eq!(summary.compliant, 9);
    assert_eq!(summary.missing, 3);
    assert_eq!(summary.pct, 75);
}

#[test]
fn summary_counts_every_status() {
    let summary = summarize_person(&bob(), &catalog(), &ctx());

    assert_eq!(summary.total, 4);
    assert_eq!(summary.compliant, 1);
    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.due_soon, 1);
    assert_eq!(summary.missing, 1);
    assert_eq!(summary.pct, 25);
    assert_eq!(
        summary
            .modules
            .iter()
            .map(|module| module.key)
            .collect::<Vec<_>>(),
        vec![
            "fire_safety",
            "hand_hygiene",
            "infection_prevention",
            "information_governance"
        ]
    );
}

#[test]
fn empty_catalog_yields_zero_pct() {
    let summary = summarize_person(&alice(), &ModuleCatalog::empty(), &ctx());

    assert_eq!(summary.total, 0);
    assert_eq!(summary.pct, 0);
    assert!(summary.modules.is_empty());
}

#[test]
fn next_due_picks_earliest_at_risk_deadline() {
    let next = find_next_due(&bob(), &catalog(), &ctx()).expect("bob has at-risk modules");

    assert_eq!(next.module_key, "fire_safety");
    assert_eq!(next.status, ComplianceStatus::Overdue);
    assert_eq!(next.due_date, Some(date(2025, 5, 1)));
}

#[test]
fn next_due_ignores_missing_and_compliant_modules() {
    assert!(find_next_due(&alice(), &catalog(), &ctx()).is_none());
    assert!(find_next_due(&dan(), &catalog(), &ctx()).is_none());
}

#[test]
fn next_due_ties_keep_catalog_order() {
    let record = PersonRecord::new("Tie Break")
        .with_completion("hand_hygiene", OVERDUE)
        .with_completion("infection_prevention", OVERDUE);

    let next = find_next_due(&record, &catalog(), &ctx()).expect("at-risk modules present");
    assert_eq!(next.module_key, "hand_hygiene");
}

#[test]
fn category_rollup_groups_modules() {
    let rollup = summarize_categories_for_person(&bob(), &catalog(), &ctx());

    let pcts: Vec<(TrainingCategory, usize, u8)> = rollup
        .iter()
        .map(|entry| (entry.category, entry.total, entry.pct))
        .collect();
    assert_eq!(
        pcts,
        vec![
            (TrainingCategory::FireSafety, 1, 0),
            (TrainingCategory::InfectionControl, 2, 50),
            (TrainingCategory::Governance, 1, 0),
        ]
    );
    assert_eq!(rollup[1].category_label, "Infection Control");
}

#[test]
fn category_rollup_is_empty_for_empty_catalog() {
    assert!(summarize_categories_for_person(&bob(), &ModuleCatalog::empty(), &ctx()).is_empty());
}
