use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::training::catalog::{ModuleCatalog, TrainingModule};
use crate::training::directory::{employee_key, DirectoryError, StaffDirectory};
use crate::training::domain::{PersonRecord, RiskTier, TrainingCategory};
use crate::training::service::ComplianceReportingService;
use crate::training::status::EvaluationContext;

pub(super) const COMPLIANT: &str = "2024-12-01";
pub(super) const DUE_SOON: &str = "2024-07-01";
pub(super) const OVERDUE: &str = "2024-05-01";

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2025, 6, 1)
}

pub(super) fn ctx() -> EvaluationContext {
    EvaluationContext::new(today())
}

/// Four twelve-month modules across three categories.
pub(super) fn catalog() -> ModuleCatalog {
    ModuleCatalog::new(
        vec![
            module("fire_safety", "Fire Safety", RiskTier::High),
            module("hand_hygiene", "Hand Hygiene", RiskTier::Medium),
            module(
                "infection_prevention",
                "Infection Prevention",
                RiskTier::High,
            ),
            module(
                "information_governance",
                "Information Governance",
                RiskTier::Low,
            ),
        ],
        [
            ("fire_safety", TrainingCategory::FireSafety),
            ("hand_hygiene", TrainingCategory::InfectionControl),
            ("infection_prevention", TrainingCategory::InfectionControl),
            ("information_governance", TrainingCategory::Governance),
        ],
    )
}

fn module(key: &'static str, label: &'static str, risk_tier: RiskTier) -> TrainingModule {
    TrainingModule {
        key,
        label,
        validity_months: 12,
        risk_tier,
    }
}

pub(super) fn alice() -> PersonRecord {
    PersonRecord::new("Alice Hart")
        .with_role("Ward 7", "Staff Nurse", true)
        .with_employee_id("E001")
        .with_completion("fire_safety", COMPLIANT)
        .with_completion("hand_hygiene", COMPLIANT)
        .with_completion("infection_prevention", COMPLIANT)
        .with_completion("information_governance", COMPLIANT)
}

pub(super) fn bob() -> PersonRecord {
    PersonRecord::new("Bob Okafor")
        .with_role("Ward 7", "Staff Nurse", true)
        .with_employee_id("E002")
        .with_completion("fire_safety", OVERDUE)
        .with_completion("hand_hygiene", DUE_SOON)
        .with_completion("infection_prevention", COMPLIANT)
}

pub(super) fn carol() -> PersonRecord {
    PersonRecord::new("Carol Singh")
        .with_role("Estates", "Porter", false)
        .with_employee_id("E003")
        .with_completion("fire_safety", COMPLIANT)
        .with_completion("hand_hygiene", COMPLIANT)
        .with_completion("infection_prevention", OVERDUE)
        .with_completion("information_governance", "not-a-date")
}

pub(super) fn dan() -> PersonRecord {
    PersonRecord::new("Dan Price").with_role("estates", "", false)
}

pub(super) fn population() -> Vec<PersonRecord> {
    vec![alice(), bob(), carol(), dan()]
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    records: Arc<Mutex<BTreeMap<String, PersonRecord>>>,
}

impl MemoryDirectory {
    pub(super) fn seeded(records: Vec<PersonRecord>) -> Self {
        let directory = Self::default();
        for record in records {
            directory.upsert(record).expect("seed record has an id");
        }
        directory
    }
}

impl StaffDirectory for MemoryDirectory {
    fn list(&self) -> Result<Vec<PersonRecord>, DirectoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, employee_id: &str) -> Result<Option<PersonRecord>, DirectoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.get(employee_id).cloned())
    }

    fn upsert(&self, record: PersonRecord) -> Result<(), DirectoryError> {
        let id = employee_key(&record)
            .ok_or(DirectoryError::MissingIdentifier)?
            .to_string();
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        guard.insert(id, record);
        Ok(())
    }
}

pub(super) struct UnavailableDirectory;

impl StaffDirectory for UnavailableDirectory {
    fn list(&self) -> Result<Vec<PersonRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("record store offline".to_string()))
    }

    fn fetch(&self, _employee_id: &str) -> Result<Option<PersonRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("record store offline".to_string()))
    }

    fn upsert(&self, _record: PersonRecord) -> Result<(), DirectoryError> {
        Err(DirectoryError::Unavailable("record store offline".to_string()))
    }
}

pub(super) fn service_with<D: StaffDirectory + 'static>(
    directory: D,
) -> Arc<ComplianceReportingService<D>> {
    Arc::new(ComplianceReportingService::new(
        Arc::new(directory),
        Arc::new(catalog()),
        60,
    ))
}

pub(super) fn seeded_service() -> Arc<ComplianceReportingService<MemoryDirectory>> {
    // dan has no employee id, so only three records can be stored
    service_with(MemoryDirectory::seeded(vec![alice(), bob(), carol()]))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
