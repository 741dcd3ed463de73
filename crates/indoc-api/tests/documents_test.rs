//! Document listing, retrieval, and soft-delete integration tests.
//!
//! Run with: `cargo test -p indoc-api --test documents_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::{document_count, seed_tenant, setup_test_app, upload, API_KEY_HEADER};

#[tokio::test]
async fn test_list_files_newest_first() {
    let app = setup_test_app().await;
    let (_tenant_id, api_key) = seed_tenant(app.pool(), "Acme").await;

    upload(app.client(), &api_key, "first.txt", b"one".to_vec()).await;
    upload(app.client(), &api_key, "second.txt", b"two".to_vec()).await;

    let response = app
        .client()
        .get("/files")
        .add_header(API_KEY_HEADER, api_key.as_str())
        .await;
    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();

    assert_eq!(body["total"], 2);
    assert_eq!(body["documents"][0]["filename"], "second.txt");
    assert_eq!(body["documents"][1]["filename"], "first.txt");
}

#[tokio::test]
async fn test_get_file_returns_document() {
    let app = setup_test_app().await;
    let (_tenant_id, api_key) = seed_tenant(app.pool(), "Acme").await;

    let created = upload(app.client(), &api_key, "report.pdf", b"%PDF-1.7".to_vec()).await;
    let document_id = created["document"]["id"].as_str().expect("document id");

    let response = app
        .client()
        .get(&format!("/files/{}", document_id))
        .add_header(API_KEY_HEADER, api_key.as_str())
        .await;
    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();

    assert_eq!(body["id"], created["document"]["id"]);
    assert_eq!(body["filename"], "report.pdf");
    assert_eq!(body["file_size"], 8);
}

#[tokio::test]
async fn test_get_unknown_file_is_not_found() {
    let app = setup_test_app().await;
    let (_tenant_id, api_key) = seed_tenant(app.pool(), "Acme").await;

    let response = app
        .client()
        .get(&format!("/files/{}", uuid::Uuid::new_v4()))
        .add_header(API_KEY_HEADER, api_key.as_str())
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_delete_frees_fingerprint_for_reupload() {
    let app = setup_test_app().await;
    let (tenant_id, api_key) = seed_tenant(app.pool(), "Acme").await;

    let created = upload(app.client(), &api_key, "draft.docx", b"v1 contents".to_vec()).await;
    let document_id = created["document"]["id"].as_str().expect("document id");

    let deleted = app
        .client()
        .delete(&format!("/files/{}", document_id))
        .add_header(API_KEY_HEADER, api_key.as_str())
        .await;
    deleted.assert_status_ok();
    let body = deleted.json::<serde_json::Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], 1);
    assert_eq!(document_count(app.pool(), tenant_id).await, 0);

    // The partial unique index only covers live rows, so the same content
    // can be uploaded again.
    let again = upload(app.client(), &api_key, "draft.docx", b"v1 contents".to_vec()).await;
    assert_eq!(again["success"], true);
    assert_eq!(document_count(app.pool(), tenant_id).await, 1);
}

#[tokio::test]
async fn test_delete_cascades_to_children() {
    let app = setup_test_app().await;
    let (tenant_id, api_key) = seed_tenant(app.pool(), "Acme").await;

    let parent = upload(app.client(), &api_key, "bundle.eml", b"parent mail".to_vec()).await;
    let parent_id = parent["document"]["id"].as_str().expect("parent id");

    let part = axum_test::multipart::Part::bytes(b"attachment bytes".to_vec())
        .file_name("attachment.pdf")
        .mime_type("application/octet-stream");
    let form = axum_test::multipart::MultipartForm::new().add_part("file", part);
    let child = app
        .client()
        .post(&format!("/files/upload?parent_id={}", parent_id))
        .add_header(API_KEY_HEADER, api_key.as_str())
        .multipart(form)
        .await;
    child.assert_status_ok();
    assert_eq!(child.json::<serde_json::Value>()["success"], true);
    assert_eq!(document_count(app.pool(), tenant_id).await, 2);

    let deleted = app
        .client()
        .delete(&format!("/files/{}", parent_id))
        .add_header(API_KEY_HEADER, api_key.as_str())
        .await;
    deleted.assert_status_ok();
    assert_eq!(deleted.json::<serde_json::Value>()["deleted"], 2);
    assert_eq!(document_count(app.pool(), tenant_id).await, 0);
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let app = setup_test_app().await;
    let (_tenant_id, api_key) = seed_tenant(app.pool(), "Acme").await;

    let created = upload(app.client(), &api_key, "once.txt", b"only once".to_vec()).await;
    let document_id = created["document"]["id"].as_str().expect("document id");

    let first = app
        .client()
        .delete(&format!("/files/{}", document_id))
        .add_header(API_KEY_HEADER, api_key.as_str())
        .await;
    first.assert_status_ok();

    let second = app
        .client()
        .delete(&format!("/files/{}", document_id))
        .add_header(API_KEY_HEADER, api_key.as_str())
        .await;
    assert_eq!(second.status_code(), 404);
}
