use crate::cli::ServeArgs;
use crate::infra::{load_knowledge_base, AppState};
use crate::routes::with_symptom_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use healthinfo::config::AppConfig;
use healthinfo::error::AppError;
use healthinfo::symptoms::SymptomCheckService;
use healthinfo::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.knowledge_base.take() {
        config.knowledge_base.path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let knowledge = Arc::new(load_knowledge_base(&config.knowledge_base)?);
    let symptom_service = Arc::new(SymptomCheckService::new(knowledge));

    let app = with_symptom_routes(symptom_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        lookup = %config.knowledge_base.lookup,
        "healthinfo symptom checker ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
