//! Training compliance evaluation and population reporting.
//!
//! Every evaluation takes an explicit [`EvaluationContext`] carrying the
//! reporting date, so identical inputs always give identical output.

pub mod aggregate;
pub mod catalog;
pub mod dashboard;
pub mod directory;
pub mod domain;
pub mod gaps;
pub mod router;
pub mod service;
pub mod status;
pub mod summary;

#[cfg(test)]
mod tests;

pub use aggregate::{
    completion_by_category_and_staff_type, completion_by_department_type,
    completion_by_risk_tier, job_title_heatmap, overdue_by_job_title, CategoryStaffTypeEntry,
    ComplianceHeatmap, DepartmentTypeSplit, HeatmapCell, HeatmapRow, JobTitleOverdueCount,
    RiskTierCompletion, SlotTally, UNASSIGNED_JOB_TITLE,
};
pub use catalog::{ModuleCatalog, TrainingModule};
pub use dashboard::{ComplianceDashboard, SlotTotals};
pub use directory::{DirectoryError, StaffDirectory};
pub use domain::{
    ComplianceStatus, PersonRecord, RiskFilter, RiskTier, TrainingCategory, UnknownRiskFilter,
};
pub use gaps::{build_gap_list, prioritize_gaps, GapItem};
pub use router::compliance_router;
pub use service::{ComplianceReportingService, PersonComplianceView, ReportingError};
pub use status::{
    evaluate, parse_completion_date, parse_reporting_date, EvaluationContext, ModuleStatus,
    DEFAULT_DUE_SOON_WINDOW_DAYS,
};
pub use summary::{
    completion_pct, find_next_due, summarize_categories_for_person, summarize_person,
    CategoryCompletion, ModuleDetail, PersonSummary,
};
