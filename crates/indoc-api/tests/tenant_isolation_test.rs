//! Tenant isolation: fingerprints, listings, and lookups are scoped per tenant.
//!
//! Run with: `cargo test -p indoc-api --test tenant_isolation_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::{document_count, seed_tenant, setup_test_app, upload, API_KEY_HEADER};

#[tokio::test]
async fn test_same_content_across_tenants_is_not_a_duplicate() {
    let app = setup_test_app().await;
    let (tenant_a, key_a) = seed_tenant(app.pool(), "Acme").await;
    let (tenant_b, key_b) = seed_tenant(app.pool(), "Globex").await;

    let payload = b"shared onboarding guide".to_vec();

    let first = upload(app.client(), &key_a, "guide.pdf", payload.clone()).await;
    let second = upload(app.client(), &key_b, "guide.pdf", payload).await;

    assert_eq!(first["success"], true);
    assert_eq!(second["success"], true);
    assert_eq!(document_count(app.pool(), tenant_a).await, 1);
    assert_eq!(document_count(app.pool(), tenant_b).await, 1);
}

#[tokio::test]
async fn test_cross_tenant_lookup_is_not_found() {
    let app = setup_test_app().await;
    let (_tenant_a, key_a) = seed_tenant(app.pool(), "Acme").await;
    let (_tenant_b, key_b) = seed_tenant(app.pool(), "Globex").await;

    let body = upload(app.client(), &key_a, "secret.docx", b"acme only".to_vec()).await;
    let document_id = body["document"]["id"].as_str().expect("document id");

    let own = app
        .client()
        .get(&format!("/files/{}", document_id))
        .add_header(API_KEY_HEADER, key_a.as_str())
        .await;
    assert_eq!(own.status_code(), 200);

    let foreign = app
        .client()
        .get(&format!("/files/{}", document_id))
        .add_header(API_KEY_HEADER, key_b.as_str())
        .await;
    assert_eq!(foreign.status_code(), 404);

    let foreign_delete = app
        .client()
        .delete(&format!("/files/{}", document_id))
        .add_header(API_KEY_HEADER, key_b.as_str())
        .await;
    assert_eq!(foreign_delete.status_code(), 404);
}

#[tokio::test]
async fn test_listing_only_returns_own_documents() {
    let app = setup_test_app().await;
    let (_tenant_a, key_a) = seed_tenant(app.pool(), "Acme").await;
    let (_tenant_b, key_b) = seed_tenant(app.pool(), "Globex").await;

    upload(app.client(), &key_a, "a1.txt", b"alpha".to_vec()).await;
    upload(app.client(), &key_a, "a2.txt", b"beta".to_vec()).await;
    upload(app.client(), &key_b, "b1.txt", b"gamma".to_vec()).await;

    let response = app
        .client()
        .get("/files")
        .add_header(API_KEY_HEADER, key_b.as_str())
        .await;
    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();

    assert_eq!(body["total"], 1);
    assert_eq!(body["documents"][0]["filename"], "b1.txt");
}
