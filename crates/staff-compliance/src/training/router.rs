use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::TrainingModule;
use super::directory::{DirectoryError, StaffDirectory};
use super::domain::{PersonRecord, RiskFilter, RiskTier, TrainingCategory};
use super::service::{ComplianceReportingService, ReportingError};
use super::status::parse_reporting_date;

/// Router exposing the compliance reports over a staff directory.
pub fn compliance_router<D>(service: Arc<ComplianceReportingService<D>>) -> Router
where
    D: StaffDirectory + 'static,
{
    Router::new()
        .route("/api/v1/compliance/catalog", get(catalog_handler::<D>))
        .route("/api/v1/compliance/dashboard", get(dashboard_handler::<D>))
        .route("/api/v1/compliance/gaps", get(gaps_handler::<D>))
        .route("/api/v1/compliance/evaluate", post(evaluate_handler::<D>))
        .route("/api/v1/compliance/staff", post(register_handler::<D>))
        .route(
            "/api/v1/compliance/staff/:employee_id",
            get(person_handler::<D>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportQuery {
    #[serde(default)]
    pub(crate) today: Option<String>,
    #[serde(default)]
    pub(crate) risk: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    #[serde(default)]
    pub(crate) records: Vec<PersonRecord>,
    #[serde(default)]
    pub(crate) today: Option<String>,
}

#[derive(Debug, Serialize)]
struct CatalogEntryView {
    key: &'static str,
    label: &'static str,
    validity_months: u32,
    risk_tier: RiskTier,
    category: TrainingCategory,
    category_label: &'static str,
}

impl CatalogEntryView {
    fn new(module: &TrainingModule, category: TrainingCategory) -> Self {
        Self {
            key: module.key,
            label: module.label,
            validity_months: module.validity_months,
            risk_tier: module.risk_tier,
            category,
            category_label: category.label(),
        }
    }
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({ "error": message })),
    )
        .into_response()
}

/// Reporting date from the query, falling back to the local calendar date.
fn resolve_today(raw: Option<&str>) -> Result<NaiveDate, Response> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_reporting_date(value).map_err(bad_request),
        None => Ok(Local::now().date_naive()),
    }
}

fn reporting_error_response(error: ReportingError) -> Response {
    let status = match &error {
        ReportingError::Directory(DirectoryError::NotFound) => StatusCode::NOT_FOUND,
        ReportingError::Directory(DirectoryError::MissingIdentifier) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ReportingError::Directory(DirectoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, axum::Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn catalog_handler<D>(
    State(service): State<Arc<ComplianceReportingService<D>>>,
) -> Response
where
    D: StaffDirectory + 'static,
{
    let catalog = service.catalog();
    let modules: Vec<CatalogEntryView> = catalog
        .modules()
        .iter()
        .map(|module| CatalogEntryView::new(module, catalog.category_of(module.key)))
        .collect();

    (StatusCode::OK, axum::Json(modules)).into_response()
}

pub(crate) async fn dashboard_handler<D>(
    State(service): State<Arc<ComplianceReportingService<D>>>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    D: StaffDirectory + 'static,
{
    let today = match resolve_today(query.today.as_deref()) {
        Ok(today) => today,
        Err(response) => return response,
    };

    match service.dashboard(today) {
        Ok(dashboard) => (StatusCode::OK, axum::Json(dashboard)).into_response(),
        Err(error) => reporting_error_response(error),
    }
}

pub(crate) async fn gaps_handler<D>(
    State(service): State<Arc<ComplianceReportingService<D>>>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    D: StaffDirectory + 'static,
{
    let today = match resolve_today(query.today.as_deref()) {
        Ok(today) => today,
        Err(response) => return response,
    };

    let filter = match query.risk.as_deref().unwrap_or("all").parse::<RiskFilter>() {
        Ok(filter) => filter,
        Err(error) => return bad_request(error.to_string()),
    };

    match service.gaps(filter, today) {
        Ok(gaps) => (StatusCode::OK, axum::Json(gaps)).into_response(),
        Err(error) => reporting_error_response(error),
    }
}

pub(crate) async fn person_handler<D>(
    State(service): State<Arc<ComplianceReportingService<D>>>,
    Path(employee_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    D: StaffDirectory + 'static,
{
    let today = match resolve_today(query.today.as_deref()) {
        Ok(today) => today,
        Err(response) => return response,
    };

    match service.person(&employee_id, today) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => reporting_error_response(error),
    }
}

pub(crate) async fn register_handler<D>(
    State(service): State<Arc<ComplianceReportingService<D>>>,
    axum::Json(record): axum::Json<PersonRecord>,
) -> Response
where
    D: StaffDirectory + 'static,
{
    let employee_id = record.employee_id.clone();
    match service.register(record) {
        Ok(()) => (
            StatusCode::ACCEPTED,
            axum::Json(json!({ "employee_id": employee_id, "status": "registered" })),
        )
            .into_response(),
        Err(error) => reporting_error_response(error),
    }
}

pub(crate) async fn evaluate_handler<D>(
    State(service): State<Arc<ComplianceReportingService<D>>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    D: StaffDirectory + 'static,
{
    let today = match resolve_today(request.today.as_deref()) {
        Ok(today) => today,
        Err(response) => return response,
    };

    let dashboard = service.evaluate(&request.records, today);
    (StatusCode::OK, axum::Json(dashboard)).into_response()
}
