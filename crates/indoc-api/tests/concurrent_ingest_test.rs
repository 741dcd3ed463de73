//! Concurrent upload races: the database constraint decides one winner.
//!
//! Run with: `cargo test -p indoc-api --test concurrent_ingest_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::{document_count, seed_tenant, setup_test_app, upload};

#[tokio::test]
async fn test_concurrent_identical_uploads_create_one_document() {
    let app = setup_test_app().await;
    let (tenant_id, api_key) = seed_tenant(app.pool(), "Acme").await;

    let payload = b"contract draft v7".to_vec();
    let uploads = (0..8).map(|i| {
        let client = app.client();
        let api_key = api_key.clone();
        let payload = payload.clone();
        async move {
            upload(
                client,
                &api_key,
                &format!("contract-{}.pdf", i),
                payload,
            )
            .await
        }
    });

    let bodies = futures::future::join_all(uploads).await;

    let created: Vec<_> = bodies.iter().filter(|b| b["success"] == true).collect();
    let duplicates: Vec<_> = bodies
        .iter()
        .filter(|b| b["error"] == "Duplicate file")
        .collect();

    assert_eq!(created.len(), 1, "exactly one upload should win the race");
    assert_eq!(duplicates.len(), bodies.len() - 1);
    assert_eq!(document_count(app.pool(), tenant_id).await, 1);

    // Every loser points at the winner.
    let winner_id = &created[0]["document"]["id"];
    for dup in duplicates {
        assert_eq!(&dup["existing_document"]["id"], winner_id);
    }
}

#[tokio::test]
async fn test_concurrent_distinct_uploads_all_succeed() {
    let app = setup_test_app().await;
    let (tenant_id, api_key) = seed_tenant(app.pool(), "Acme").await;

    let uploads = (0..5).map(|i| {
        let client = app.client();
        let api_key = api_key.clone();
        async move {
            upload(
                client,
                &api_key,
                &format!("notes-{}.txt", i),
                format!("unique body {}", i).into_bytes(),
            )
            .await
        }
    });

    let bodies = futures::future::join_all(uploads).await;

    assert!(bodies.iter().all(|b| b["success"] == true));
    assert_eq!(document_count(app.pool(), tenant_id).await, 5);
}
