use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCrmNotifier, InMemoryLeadRepository};
use crate::routes::with_lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use poolside_ai::config::AppConfig;
use poolside_ai::error::AppError;
use poolside_ai::telemetry;
use poolside_ai::workflows::onboarding::leads::{LeadScoringService, SalesOpsConfig};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryLeadRepository::default());
    let notifier = Arc::new(InMemoryCrmNotifier::default());
    let sales_ops = SalesOpsConfig {
        hot_alert_template: config.sales.hot_alert_template.clone(),
        queue_limit: config.sales.queue_limit,
    };
    let lead_service = Arc::new(LeadScoringService::new(repository, notifier, sales_ops));

    let app = with_lead_routes(lead_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "pool lead scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
