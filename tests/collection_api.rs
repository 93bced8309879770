//! Integration coverage for the collection builder and the client-facing
//! shared landing route.

mod common {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, Response, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use realtor_pro::collections::CollectionService;
    use realtor_pro::listings::{AgentCard, ListingService};
    use realtor_pro::routes::app_router;
    use realtor_pro::storage::{InMemoryCollectionStore, InMemoryListingStore};

    pub(super) const BASE_URL: &str = "https://realty.example";

    pub(super) fn agent() -> AgentCard {
        AgentCard {
            name: "Anna Morozova".to_string(),
            phone: "+7 (912) 000-11-22".to_string(),
            telegram: None,
            photo: None,
            experience: None,
        }
    }

    pub(super) fn test_app() -> Router {
        let listing_store = Arc::new(InMemoryListingStore::default());
        let collection_store = Arc::new(InMemoryCollectionStore::default());
        let listings = Arc::new(ListingService::new(listing_store.clone(), agent()));
        let collections = Arc::new(CollectionService::new(
            collection_store,
            listing_store,
            agent(),
            BASE_URL,
        ));
        app_router(listings, collections)
    }

    pub(super) async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> Response<Body> {
        let request = match body {
            Some(payload) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).expect("payload")))
                .expect("request"),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        };
        app.clone().oneshot(request).await.expect("route executes")
    }

    pub(super) async fn read_json_body(response: Response<Body>) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    pub(super) async fn seed_listing(app: &Router) -> String {
        let draft = json!({
            "title": "2-room apartment, 54 m2",
            "description": "Cozy apartment with a balcony overlooking the park, school nearby.",
            "price": 8_700_000,
            "address": "12 Pushkina St",
            "area": 54
        });
        let response = send(app, "POST", "/api/v1/listings", Some(draft)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let listing = read_json_body(response).await;
        listing["id"].as_str().expect("listing id").to_string()
    }

    pub(super) fn collection_draft(listing_ids: &[String]) -> Value {
        json!({
            "title": "Apartments for the Ivanov family",
            "description": "Bright two-room options close to the center",
            "client_name": "Ivan Ivanov",
            "client_phone": "+7 (999) 765-43-21",
            "client_email": "ivanov@example.com",
            "listing_ids": listing_ids,
        })
    }

    pub(super) async fn create_collection(app: &Router, draft: Value) -> Value {
        let response = send(app, "POST", "/api/v1/collections", Some(draft)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        read_json_body(response).await
    }
}

use axum::http::StatusCode;
use chrono::{Days, Utc};
use common::*;
use serde_json::json;

#[tokio::test]
async fn create_returns_collection_with_share_link() {
    let app = test_app();
    let listing_id = seed_listing(&app).await;

    let payload = create_collection(&app, collection_draft(&[listing_id.clone()])).await;

    let collection = &payload["collection"];
    assert_eq!(collection["title"], "Apartments for the Ivanov family");
    assert_eq!(collection["client"]["name"], "Ivan Ivanov");
    assert_eq!(collection["view_count"], 0);
    assert_eq!(collection["listing_ids"][0], listing_id.as_str());

    let token = collection["share_token"].as_str().expect("token");
    assert_eq!(token.len(), 8);
    assert_eq!(
        payload["share_link"],
        format!("{BASE_URL}/collection/{token}")
    );
}

#[tokio::test]
async fn create_rejects_unknown_listing_references() {
    let app = test_app();
    let listing_id = seed_listing(&app).await;

    let draft = collection_draft(&[listing_id, "1699999999999".to_string()]);
    let response = send(&app, "POST", "/api/v1/collections", Some(draft)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("1699999999999"));
}

#[tokio::test]
async fn create_rejects_invalid_drafts_with_field_issues() {
    let app = test_app();
    let listing_id = seed_listing(&app).await;

    let mut draft = collection_draft(&[listing_id]);
    draft["description"] = json!("Short");
    draft["client_email"] = json!("not-an-email");

    let response = send(&app, "POST", "/api/v1/collections", Some(draft)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    let fields: Vec<&str> = payload["issues"]
        .as_array()
        .expect("issues array")
        .iter()
        .filter_map(|issue| issue["field"].as_str())
        .collect();
    assert!(fields.contains(&"description"));
    assert!(fields.contains(&"client_email"));
}

#[tokio::test]
async fn shared_landing_resolves_listings_and_counts_views() {
    let app = test_app();
    let listing_id = seed_listing(&app).await;
    let payload = create_collection(&app, collection_draft(&[listing_id.clone()])).await;
    let token = payload["collection"]["share_token"]
        .as_str()
        .expect("token")
        .to_string();

    let response = send(&app, "GET", &format!("/collection/{token}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let landing = read_json_body(response).await;
    assert_eq!(landing["title"], "Apartments for the Ivanov family");
    assert_eq!(landing["agent"]["name"], "Anna Morozova");
    let properties = landing["properties"].as_array().expect("properties");
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0]["id"], listing_id.as_str());

    send(&app, "GET", &format!("/collection/{token}"), None).await;
    let collection_id = payload["collection"]["id"].as_str().expect("id");
    let response = send(
        &app,
        "GET",
        &format!("/api/v1/collections/{collection_id}"),
        None,
    )
    .await;
    let fetched = read_json_body(response).await;
    assert_eq!(fetched["collection"]["view_count"], 2);
    assert!(fetched["collection"]["last_viewed"].is_string());
}

#[tokio::test]
async fn shared_landing_skips_deleted_listings() {
    let app = test_app();
    let first = seed_listing(&app).await;
    let second = seed_listing(&app).await;
    let payload = create_collection(&app, collection_draft(&[first.clone(), second])).await;
    let token = payload["collection"]["share_token"]
        .as_str()
        .expect("token")
        .to_string();

    let response = send(&app, "DELETE", &format!("/api/v1/listings/{first}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", &format!("/collection/{token}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let landing = read_json_body(response).await;
    assert_eq!(landing["properties"].as_array().expect("properties").len(), 1);
}

#[tokio::test]
async fn expired_landing_returns_gone_without_counting_a_view() {
    let app = test_app();
    let listing_id = seed_listing(&app).await;

    let yesterday = Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(1))
        .expect("valid date");
    let mut draft = collection_draft(&[listing_id]);
    draft["expires_at"] = json!(yesterday.format("%Y-%m-%d").to_string());

    let payload = create_collection(&app, draft).await;
    let token = payload["collection"]["share_token"]
        .as_str()
        .expect("token")
        .to_string();
    let collection_id = payload["collection"]["id"].as_str().expect("id");

    let response = send(&app, "GET", &format!("/collection/{token}"), None).await;
    assert_eq!(response.status(), StatusCode::GONE);

    let response = send(
        &app,
        "GET",
        &format!("/api/v1/collections/{collection_id}"),
        None,
    )
    .await;
    let fetched = read_json_body(response).await;
    assert_eq!(fetched["collection"]["view_count"], 0);
}

#[tokio::test]
async fn update_preserves_share_token_and_view_history() {
    let app = test_app();
    let listing_id = seed_listing(&app).await;
    let payload = create_collection(&app, collection_draft(&[listing_id.clone()])).await;
    let collection_id = payload["collection"]["id"].as_str().expect("id").to_string();
    let token = payload["collection"]["share_token"]
        .as_str()
        .expect("token")
        .to_string();

    send(&app, "GET", &format!("/collection/{token}"), None).await;

    let mut draft = collection_draft(&[listing_id]);
    draft["title"] = json!("Apartments for the Ivanov family, round two");
    let response = send(
        &app,
        "PUT",
        &format!("/api/v1/collections/{collection_id}"),
        Some(draft),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json_body(response).await;
    assert_eq!(updated["title"], "Apartments for the Ivanov family, round two");
    assert_eq!(updated["share_token"], token.as_str());
    assert_eq!(updated["view_count"], 1);
}

#[tokio::test]
async fn list_summarizes_collections_for_the_agent() {
    let app = test_app();
    let listing_id = seed_listing(&app).await;
    create_collection(&app, collection_draft(&[listing_id])).await;

    let response = send(&app, "GET", "/api/v1/collections", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let summaries = read_json_body(response).await;
    let summaries = summaries.as_array().expect("summary array");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["client_name"], "Ivan Ivanov");
    assert_eq!(summaries[0]["listing_count"], 1);
    assert_eq!(summaries[0]["status"], "active");
    assert!(summaries[0]["share_link"]
        .as_str()
        .expect("share link")
        .starts_with(BASE_URL));
}

#[tokio::test]
async fn delete_reports_success_then_fetch_misses() {
    let app = test_app();
    let listing_id = seed_listing(&app).await;
    let payload = create_collection(&app, collection_draft(&[listing_id])).await;
    let collection_id = payload["collection"]["id"].as_str().expect("id").to_string();

    let response = send(
        &app,
        "DELETE",
        &format!("/api/v1/collections/{collection_id}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["success"], true);

    let response = send(
        &app,
        "GET",
        &format!("/api/v1/collections/{collection_id}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
