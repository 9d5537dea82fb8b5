use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::catalog::ModuleCatalog;
use super::dashboard::ComplianceDashboard;
use super::directory::{employee_key, DirectoryError, StaffDirectory};
use super::domain::{PersonRecord, RiskFilter};
use super::gaps::{build_gap_list, prioritize_gaps, GapItem};
use super::status::EvaluationContext;
use super::summary::{
    find_next_due, summarize_categories_for_person, summarize_person, CategoryCompletion,
    PersonSummary,
};

/// Compliance detail for a single staff member.
#[derive(Debug, Clone, Serialize)]
pub struct PersonComplianceView {
    pub full_name: String,
    pub department: String,
    pub job_title: String,
    pub is_clinical: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub summary: PersonSummary,
    pub categories: Vec<CategoryCompletion>,
    pub next_due: Option<GapItem>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportingError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Service pairing the shared catalog with a staff directory.
pub struct ComplianceReportingService<D> {
    directory: Arc<D>,
    catalog: Arc<ModuleCatalog>,
    due_soon_window_days: u32,
}

impl<D> ComplianceReportingService<D>
where
    D: StaffDirectory + 'static,
{
    pub fn new(
        directory: Arc<D>,
        catalog: Arc<ModuleCatalog>,
        due_soon_window_days: u32,
    ) -> Self {
        Self {
            directory,
            catalog,
            due_soon_window_days,
        }
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    pub fn context(&self, today: NaiveDate) -> EvaluationContext {
        EvaluationContext::new(today).with_due_soon_window(self.due_soon_window_days)
    }

    /// Insert or replace a staff record keyed by employee id.
    pub fn register(&self, record: PersonRecord) -> Result<(), ReportingError> {
        let Some(employee_id) = employee_key(&record).map(str::to_owned) else {
            return Err(DirectoryError::MissingIdentifier.into());
        };

        self.directory.upsert(record)?;
        info!(%employee_id, "staff record registered");
        Ok(())
    }

    pub fn dashboard(&self, today: NaiveDate) -> Result<ComplianceDashboard, ReportingError> {
        let records = self.directory.list()?;
        debug!(headcount = records.len(), %today, "building compliance dashboard");
        Ok(self.evaluate(&records, today))
    }

    /// Dashboard over caller-supplied records without touching the directory.
    pub fn evaluate(&self, records: &[PersonRecord], today: NaiveDate) -> ComplianceDashboard {
        ComplianceDashboard::build(records, &self.catalog, &self.context(today))
    }

    pub fn gaps(
        &self,
        filter: RiskFilter,
        today: NaiveDate,
    ) -> Result<Vec<GapItem>, ReportingError> {
        let records = self.directory.list()?;
        let mut gaps = build_gap_list(&records, &self.catalog, filter, &self.context(today));
        prioritize_gaps(&mut gaps);
        debug!(count = gaps.len(), ?filter, "gap list built");
        Ok(gaps)
    }

    pub fn person(
        &self,
        employee_id: &str,
        today: NaiveDate,
    ) -> Result<PersonComplianceView, ReportingError> {
        let record = self
            .directory
            .fetch(employee_id.trim())?
            .ok_or(DirectoryError::NotFound)?;
        let ctx = self.context(today);

        Ok(PersonComplianceView {
            summary: summarize_person(&record, &self.catalog, &ctx),
            categories: summarize_categories_for_person(&record, &self.catalog, &ctx),
            next_due: find_next_due(&record, &self.catalog, &ctx),
            full_name: record.full_name,
            department: record.department,
            job_title: record.job_title,
            is_clinical: record.is_clinical,
            employee_id: record.employee_id,
        })
    }
}
