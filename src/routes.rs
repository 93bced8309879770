use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;

use crate::collections::router::collection_router;
use crate::collections::CollectionService;
use crate::listings::router::listing_router;
use crate::listings::ListingService;
use crate::stats;
use crate::storage::{CollectionStore, ListingStore};

/// Operational state shared by the health and metrics endpoints.
#[derive(Clone)]
pub struct OpsState {
    pub readiness: Arc<AtomicBool>,
    pub metrics: Arc<PrometheusHandle>,
}

/// Compose the full application router: listings, collections, dashboard,
/// and the operational endpoints. The caller layers `Extension<OpsState>`
/// and the prometheus middleware on top.
pub fn app_router<S, C>(
    listings: Arc<ListingService<S>>,
    collections: Arc<CollectionService<C, S>>,
) -> Router
where
    S: ListingStore + 'static,
    C: CollectionStore + 'static,
{
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/dashboard/summary",
            get(dashboard_handler::<S, C>),
        )
        .with_state((listings.clone(), collections.clone()))
        .merge(listing_router(listings))
        .merge(collection_router(collections))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<OpsState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
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

pub(crate) async fn metrics_endpoint(Extension(state): Extension<OpsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn dashboard_handler<S, C>(
    State((listings, collections)): State<(Arc<ListingService<S>>, Arc<CollectionService<C, S>>)>,
) -> impl IntoResponse
where
    S: ListingStore + 'static,
    C: CollectionStore + 'static,
{
    let stored_listings = match listings.list(&Default::default()) {
        Ok(listings) => listings,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
        }
    };
    let stored_collections = match collections.list() {
        Ok(collections) => collections,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
        }
    };

    let summary = stats::summarize(&stored_listings, &stored_collections);
    (StatusCode::OK, Json(summary)).into_response()
}
