use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryStaffDirectory};
use crate::routes::with_compliance_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use staff_compliance::config::AppConfig;
use staff_compliance::error::AppError;
use staff_compliance::roster::RosterImporter;
use staff_compliance::telemetry;
use staff_compliance::training::{ComplianceReportingService, ModuleCatalog};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = match config.compliance.roster_path.as_ref() {
        Some(path) => {
            let (directory, skipped) =
                InMemoryStaffDirectory::seeded(RosterImporter::from_path(path)?);
            if skipped > 0 {
                warn!(skipped, path = %path.display(), "roster rows without employee id ignored");
            }
            directory
        }
        None => InMemoryStaffDirectory::default(),
    };

    let service = Arc::new(ComplianceReportingService::new(
        Arc::new(directory),
        Arc::new(ModuleCatalog::standard()),
        config.compliance.due_soon_window_days,
    ));

    let app = with_compliance_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        due_soon_window_days = config.compliance.due_soon_window_days,
        "staff compliance service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
