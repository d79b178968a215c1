//! Tests for the record store client

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::BackfillError;
use crate::services::record_store::RealRecordStore;
use crate::traits::RecordStore;

async fn configured_store(server: &MockServer) -> RealRecordStore {
    let store = RealRecordStore::new();
    store.configure(&server.uri(), "test-store-key").await.unwrap();
    store
}

fn record_json(id: i64, category: &str, image_url: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "category": category,
        "image_url": image_url,
        "updated_at": "2026-01-15T10:00:00Z",
    })
}

#[tokio::test]
async fn test_fetch_missing_image_filters_on_null_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .and(query_param("image_url", "is.null"))
        .and(header("apikey", "test-store-key"))
        .and(header("Authorization", "Bearer test-store-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([record_json(1, "sedan", None)])),
        )
        .mount(&server)
        .await;

    let store = configured_store(&server).await;
    let records = store.fetch_missing_image().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 1);
    assert_eq!(records[0].category, "sedan");
    assert!(!records[0].has_image());
}

#[tokio::test]
async fn test_fetch_all_orders_by_identifier() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .and(query_param("order", "id.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            record_json(1, "sedan", None),
            record_json(2, "truck", Some("http://x/2.png")),
        ])))
        .mount(&server)
        .await;

    let store = configured_store(&server).await;
    let records = store.fetch_all().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, 1);
    assert_eq!(records[1].id, 2);
}

#[tokio::test]
async fn test_fetch_one_maps_empty_result_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .and(query_param("id", "eq.42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = configured_store(&server).await;
    let err = store.fetch_one(42).await.unwrap_err();

    assert!(matches!(err, BackfillError::NotFound { id: 42 }));
}

#[tokio::test]
async fn test_update_image_skips_existing_without_overwrite() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .and(query_param("id", "eq.2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([record_json(2, "truck", Some("http://x/2.png"))])),
        )
        .mount(&server)
        .await;
    // No write may happen for a record that already has an image
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let store = configured_store(&server).await;
    let updated = store.update_image(2, "http://x/new.png", false).await.unwrap();

    assert!(!updated);
}

#[tokio::test]
async fn test_update_image_overwrites_when_forced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .and(query_param("id", "eq.2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([record_json(2, "truck", Some("http://x/2.png"))])),
        )
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/vehicles"))
        .and(query_param("id", "eq.2"))
        .and(header("Prefer", "return=representation"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([record_json(2, "truck", Some("http://x/new.png"))])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = configured_store(&server).await;
    let updated = store.update_image(2, "http://x/new.png", true).await.unwrap();

    assert!(updated);
}

#[tokio::test]
async fn test_update_image_writes_when_image_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record_json(1, "sedan", None)])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/vehicles"))
        .and(query_param("id", "eq.1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([record_json(1, "sedan", Some("http://x/1.png"))])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = configured_store(&server).await;
    let updated = store.update_image(1, "http://x/1.png", false).await.unwrap();

    assert!(updated);
}

#[tokio::test]
async fn test_update_image_on_unknown_id_never_writes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .and(query_param("id", "eq.99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let store = configured_store(&server).await;
    let err = store.update_image(99, "http://x/99.png", true).await.unwrap_err();

    assert!(matches!(err, BackfillError::NotFound { id: 99 }));
}

#[tokio::test]
async fn test_reachability_probe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = configured_store(&server).await;
    assert!(store.test_reachable().await);
}

#[tokio::test]
async fn test_reachability_probe_false_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = configured_store(&server).await;
    assert!(!store.test_reachable().await);
}

#[tokio::test]
async fn test_unconfigured_store_is_unreachable() {
    let store = RealRecordStore::new();
    assert!(!store.test_reachable().await);
}
