use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use crate::catalog::CatalogQuery;
use crate::storage::{ListingStore, StoreError};

use super::service::{ListingService, ListingServiceError};
use super::{ListingCardView, ListingId};

/// Router exposing the listing editor, catalog, and public landing routes.
pub fn listing_router<S>(service: Arc<ListingService<S>>) -> Router
where
    S: ListingStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/listings",
            get(catalog_handler::<S>).post(create_handler::<S>),
        )
        .route(
            "/api/v1/listings/:listing_id",
            get(fetch_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .route("/property/:slug", get(landing_handler::<S>))
        .with_state(service)
}

fn error_response(err: ListingServiceError) -> Response {
    match err {
        ListingServiceError::Invalid(rejected) => {
            let payload = json!({
                "error": rejected.to_string(),
                "issues": rejected.issues,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        ListingServiceError::Store(StoreError::NotFound) => {
            let payload = json!({ "error": "listing not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        ListingServiceError::Store(StoreError::Conflict) => {
            let payload = json!({ "error": "listing already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn catalog_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Query(query): Query<CatalogQuery>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.list(&query) {
        Ok(listings) => {
            let cards: Vec<ListingCardView> =
                listings.iter().map(|listing| listing.card_view()).collect();
            (StatusCode::OK, axum::Json(cards)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    axum::Json(draft): axum::Json<super::ListingDraft>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.create(draft) {
        Ok(listing) => (StatusCode::CREATED, axum::Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn fetch_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.get(&ListingId(listing_id)) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(listing_id): Path<String>,
    axum::Json(draft): axum::Json<super::ListingDraft>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.update(&ListingId(listing_id), &draft) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.delete(&ListingId(listing_id)) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response(),
        Err(err) => error_response(err),
    }
}

/// Public landing page data; every hit counts as a view.
pub(crate) async fn landing_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(slug): Path<String>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.record_landing_view(&slug) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}
