use crate::infra::{deserialize_optional_date, AppState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use staff_compliance::error::AppError;
use staff_compliance::roster::RosterImporter;
use staff_compliance::training::{
    build_gap_list, compliance_router, prioritize_gaps, ComplianceDashboard,
    ComplianceReportingService, GapItem, RiskFilter, StaffDirectory,
};
use std::io::Cursor;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct RosterReportRequest {
    pub(crate) roster_csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) risk: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RosterReportResponse {
    pub(crate) today: NaiveDate,
    pub(crate) dashboard: ComplianceDashboard,
    pub(crate) gaps: Vec<GapItem>,
}

pub(crate) fn with_compliance_routes<D>(service: Arc<ComplianceReportingService<D>>) -> Router
where
    D: StaffDirectory + 'static,
{
    let roster_routes = Router::new()
        .route(
            "/api/v1/compliance/roster/report",
            post(roster_report_endpoint::<D>),
        )
        .with_state(service.clone());

    compliance_router(service)
        .merge(roster_routes)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Evaluate an inline roster export without touching the directory.
pub(crate) async fn roster_report_endpoint<D>(
    State(service): State<Arc<ComplianceReportingService<D>>>,
    Json(payload): Json<RosterReportRequest>,
) -> Result<Json<RosterReportResponse>, AppError>
where
    D: StaffDirectory + 'static,
{
    let RosterReportRequest {
        roster_csv,
        today,
        risk,
    } = payload;

    let filter = risk.as_deref().unwrap_or("all").parse::<RiskFilter>()?;
    let records = RosterImporter::from_reader(Cursor::new(roster_csv.into_bytes()))?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let dashboard = service.evaluate(&records, today);
    let mut gaps = build_gap_list(&records, service.catalog(), filter, &service.context(today));
    prioritize_gaps(&mut gaps);
    info!(headcount = records.len(), gaps = gaps.len(), %today, "inline roster evaluated");

    Ok(Json(RosterReportResponse {
        today,
        dashboard,
        gaps,
    }))
}
