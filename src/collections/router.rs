use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::json;

use crate::storage::{CollectionStore, ListingStore, StoreError};

use super::service::{CollectionService, CollectionServiceError};
use super::{CollectionId, ShareToken};

/// Router exposing the collection builder and the shared landing route.
pub fn collection_router<C, L>(service: Arc<CollectionService<C, L>>) -> Router
where
    C: CollectionStore + 'static,
    L: ListingStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/collections",
            get(list_handler::<C, L>).post(create_handler::<C, L>),
        )
        .route(
            "/api/v1/collections/:collection_id",
            get(fetch_handler::<C, L>)
                .put(update_handler::<C, L>)
                .delete(delete_handler::<C, L>),
        )
        .route("/collection/:token", get(landing_handler::<C, L>))
        .with_state(service)
}

fn error_response(err: CollectionServiceError) -> Response {
    match err {
        CollectionServiceError::Invalid(rejected) => {
            let payload = json!({
                "error": rejected.to_string(),
                "issues": rejected.issues,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        CollectionServiceError::UnknownListing(id) => {
            let payload = json!({ "error": format!("listing '{id}' does not exist") });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        CollectionServiceError::Expired => {
            let payload = json!({ "error": "collection has expired" });
            (StatusCode::GONE, axum::Json(payload)).into_response()
        }
        CollectionServiceError::Store(StoreError::NotFound) => {
            let payload = json!({ "error": "collection not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        CollectionServiceError::Store(StoreError::Conflict) => {
            let payload = json!({ "error": "collection already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<C, L>(
    State(service): State<Arc<CollectionService<C, L>>>,
) -> Response
where
    C: CollectionStore + 'static,
    L: ListingStore + 'static,
{
    match service.summaries(Utc::now().date_naive()) {
        Ok(summaries) => (StatusCode::OK, axum::Json(summaries)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<C, L>(
    State(service): State<Arc<CollectionService<C, L>>>,
    axum::Json(draft): axum::Json<super::CollectionDraft>,
) -> Response
where
    C: CollectionStore + 'static,
    L: ListingStore + 'static,
{
    match service.create(draft) {
        Ok(collection) => {
            let share_link = service.share_link(&collection);
            let payload = json!({
                "collection": collection,
                "share_link": share_link,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn fetch_handler<C, L>(
    State(service): State<Arc<CollectionService<C, L>>>,
    Path(collection_id): Path<String>,
) -> Response
where
    C: CollectionStore + 'static,
    L: ListingStore + 'static,
{
    match service.get(&CollectionId(collection_id)) {
        Ok(collection) => {
            let share_link = service.share_link(&collection);
            let payload = json!({
                "collection": collection,
                "share_link": share_link,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<C, L>(
    State(service): State<Arc<CollectionService<C, L>>>,
    Path(collection_id): Path<String>,
    axum::Json(draft): axum::Json<super::CollectionDraft>,
) -> Response
where
    C: CollectionStore + 'static,
    L: ListingStore + 'static,
{
    match service.update(&CollectionId(collection_id), &draft) {
        Ok(collection) => (StatusCode::OK, axum::Json(collection)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<C, L>(
    State(service): State<Arc<CollectionService<C, L>>>,
    Path(collection_id): Path<String>,
) -> Response
where
    C: CollectionStore + 'static,
    L: ListingStore + 'static,
{
    match service.delete(&CollectionId(collection_id)) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response(),
        Err(err) => error_response(err),
    }
}

/// Client landing page for a shared collection; every hit counts as a view.
pub(crate) async fn landing_handler<C, L>(
    State(service): State<Arc<CollectionService<C, L>>>,
    Path(token): Path<String>,
) -> Response
where
    C: CollectionStore + 'static,
    L: ListingStore + 'static,
{
    match service.landing(&ShareToken(token), Utc::now()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}
