//! Analytics endpoint integration tests.
//!
//! Run with: `cargo test -p indoc-api --test analytics_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::{seed_tenant, setup_test_app, upload, API_KEY_HEADER};

#[tokio::test]
async fn test_summary_counts_documents_and_bytes() {
    let app = setup_test_app().await;
    let (_tenant_id, api_key) = seed_tenant(app.pool(), "Acme").await;

    upload(app.client(), &api_key, "a.txt", b"12345".to_vec()).await;
    upload(app.client(), &api_key, "b.txt", b"1234567890".to_vec()).await;

    let response = app
        .client()
        .get("/analytics/summary")
        .add_header(API_KEY_HEADER, api_key.as_str())
        .await;
    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();

    assert_eq!(body["totals"]["documents"], 2);
    assert_eq!(body["totals"]["storage_bytes"], 15);
    // No worker pool in tests, so nothing reaches `ready`.
    assert_eq!(body["totals"]["ready"], 0);
}

#[tokio::test]
async fn test_summary_is_scoped_to_tenant() {
    let app = setup_test_app().await;
    let (_tenant_a, key_a) = seed_tenant(app.pool(), "Acme").await;
    let (_tenant_b, key_b) = seed_tenant(app.pool(), "Globex").await;

    upload(app.client(), &key_a, "a.txt", b"alpha".to_vec()).await;

    let response = app
        .client()
        .get("/analytics/summary")
        .add_header(API_KEY_HEADER, key_b.as_str())
        .await;
    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();

    assert_eq!(body["totals"]["documents"], 0);
    assert_eq!(body["totals"]["storage_bytes"], 0);
}

#[tokio::test]
async fn test_processing_summary_groups_by_status() {
    let app = setup_test_app().await;
    let (tenant_id, api_key) = seed_tenant(app.pool(), "Acme").await;

    let first = upload(app.client(), &api_key, "a.pdf", b"doc a".to_vec()).await;
    upload(app.client(), &api_key, "b.pdf", b"doc b".to_vec()).await;

    // Mark one document ready, as a worker would after processing.
    let first_id =
        uuid::Uuid::parse_str(first["document"]["id"].as_str().expect("id")).expect("uuid");
    sqlx::query("UPDATE documents SET status = 'ready' WHERE tenant_id = $1 AND id = $2")
        .bind(tenant_id)
        .bind(first_id)
        .execute(app.pool())
        .await
        .expect("Failed to mark document ready");

    let response = app
        .client()
        .get("/analytics/processing")
        .add_header(API_KEY_HEADER, api_key.as_str())
        .await;
    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();

    assert_eq!(body["status_counts"]["ready"], 1);
    assert_eq!(body["status_counts"]["processing"], 1);
    assert_eq!(body["processed_total"], 1);
}

#[tokio::test]
async fn test_analytics_requires_api_key() {
    let app = setup_test_app().await;

    let response = app.client().get("/analytics/summary").await;
    assert_eq!(response.status_code(), 401);
}
