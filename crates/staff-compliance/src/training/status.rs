use super::domain::ComplianceStatus;
use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};
use serde::Serialize;

pub const DEFAULT_DUE_SOON_WINDOW_DAYS: u32 = 60;

/// Evaluated state of one module for one person.
///
/// `overdue_days` carries two meanings: a positive count of days past the due
/// date when `Overdue`, and the negated days remaining when `DueSoon`. It is
/// `None` for `Missing` and `Compliant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleStatus {
    pub status: ComplianceStatus,
    pub due_date: Option<NaiveDate>,
    pub overdue_days: Option<i64>,
}

impl ModuleStatus {
    pub const fn missing() -> Self {
        Self {
            status: ComplianceStatus::Missing,
            due_date: None,
            overdue_days: None,
        }
    }
}

/// Reference date and thresholds every evaluation is computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    pub today: NaiveDate,
    pub due_soon_window_days: u32,
}

impl EvaluationContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            due_soon_window_days: DEFAULT_DUE_SOON_WINDOW_DAYS,
        }
    }

    pub fn with_due_soon_window(mut self, days: u32) -> Self {
        self.due_soon_window_days = days;
        self
    }

    pub fn evaluate(&self, completion: Option<&str>, validity_months: u32) -> ModuleStatus {
        evaluate(
            completion,
            validity_months,
            self.due_soon_window_days,
            self.today,
        )
    }
}

/// Classify a single completion against its validity period.
pub fn evaluate(
    completion: Option<&str>,
    validity_months: u32,
    due_soon_window_days: u32,
    today: NaiveDate,
) -> ModuleStatus {
    let Some(completed_on) = completion.and_then(parse_completion_date) else {
        return ModuleStatus::missing();
    };

    let Some(due_date) = completed_on.checked_add_months(Months::new(validity_months)) else {
        return ModuleStatus::missing();
    };

    if due_date < today {
        return ModuleStatus {
            status: ComplianceStatus::Overdue,
            due_date: Some(due_date),
            overdue_days: Some((today - due_date).num_days().abs()),
        };
    }

    let days_left = (due_date - today).num_days();
    if days_left <= i64::from(due_soon_window_days) {
        ModuleStatus {
            status: ComplianceStatus::DueSoon,
            due_date: Some(due_date),
            overdue_days: Some(-days_left),
        }
    } else {
        ModuleStatus {
            status: ComplianceStatus::Compliant,
            due_date: Some(due_date),
            overdue_days: None,
        }
    }
}

/// Parse a raw completion value into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps. Blank or unparseable input yields `None`.
pub fn parse_completion_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Parse a reporting date supplied by a caller. Only `YYYY-MM-DD` is
/// accepted, unlike completion values.
pub fn parse_reporting_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{value}' as YYYY-MM-DD ({err})"))
}
