use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use crate::cli::ServeArgs;
use crate::collections::CollectionService;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::listings::ListingService;
use crate::routes::{app_router, OpsState};
use crate::storage::JsonFileStore;
use crate::telemetry;

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let ops_state = OpsState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(JsonFileStore::open(config.storage.data_file.clone()));
    let agent = config.agent.card();
    let listings = Arc::new(ListingService::new(store.clone(), agent.clone()));
    let collections = Arc::new(CollectionService::new(
        store.clone(),
        store,
        agent,
        config.sharing.public_base_url.clone(),
    ));

    let app = app_router(listings, collections)
        .layer(Extension(ops_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        data_file = %config.storage.data_file.display(),
        "brokerage listing service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
