use axum::http::StatusCode;
use axum_test::TestServer;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};

use hsi_testing::auth::MockAuth;

use crate::helpers::{admin, as_user, editor, setup_server, viewer};

async fn create_institution(server: &TestServer, auth: MockAuth, name: &str) -> i64 {
    let created: Value = as_user(server.post("/institutions"), auth)
        .json(&json!({ "name": name }))
        .await
        .json();
    created["id"].as_i64().unwrap()
}

// ── Reports ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_upload_and_download_report_content() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;
    let viewer = viewer(&state).await;
    let id = create_institution(&server, editor, "Alpha Capital").await;
    let document = b"%PDF-1.7 annual report".to_vec();

    let response = as_user(server.post(&format!("/institutions/{id}/reports")), editor)
        .json(&json!({
            "period": "2023",
            "type": "annual",
            "summary": "Solid year",
            "content": STANDARD.encode(&document),
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let report: Value = response.json();
    assert_eq!(report["type"], "annual");
    assert_eq!(report["has_content"], true);
    assert!(report.get("content").is_none());
    let report_id = report["id"].as_i64().unwrap();

    let download = as_user(
        server.get(&format!("/institutions/{id}/reports/{report_id}/content")),
        viewer,
    )
    .await;
    download.assert_status_ok();
    assert_eq!(
        download.header("content-type"),
        "application/octet-stream"
    );
    assert_eq!(download.as_bytes().as_ref(), document.as_slice());

    let list: Vec<Value> = as_user(server.get(&format!("/institutions/{id}/reports")), viewer)
        .await
        .json();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn should_report_missing_content() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;
    let id = create_institution(&server, editor, "Alpha Capital").await;

    let report: Value = as_user(server.post(&format!("/institutions/{id}/reports")), editor)
        .json(&json!({ "period": "2023" }))
        .await
        .json();
    let report_id = report["id"].as_i64().unwrap();
    assert_eq!(report["has_content"], false);

    let response = as_user(
        server.get(&format!("/institutions/{id}/reports/{report_id}/content")),
        editor,
    )
    .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let error: Value = response.json();
    assert_eq!(error["kind"], "REPORT_CONTENT_NOT_FOUND");
}

#[tokio::test]
async fn should_reject_invalid_base64_content() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;
    let id = create_institution(&server, editor, "Alpha Capital").await;

    let response = as_user(server.post(&format!("/institutions/{id}/reports")), editor)
        .json(&json!({ "content": "not base64!" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["kind"], "INVALID_CONTENT");
}

#[tokio::test]
async fn should_scope_reports_to_their_institution() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;
    let admin = admin(&state).await;
    let alpha = create_institution(&server, editor, "Alpha Capital").await;
    let bravo = create_institution(&server, editor, "Bravo Bank").await;

    let report: Value = as_user(server.post(&format!("/institutions/{alpha}/reports")), editor)
        .json(&json!({ "period": "2023" }))
        .await
        .json();
    let report_id = report["id"].as_i64().unwrap();

    as_user(
        server.get(&format!("/institutions/{bravo}/reports/{report_id}")),
        editor,
    )
    .await
    .assert_status(StatusCode::NOT_FOUND);
    as_user(
        server.delete(&format!("/institutions/{bravo}/reports/{report_id}")),
        admin,
    )
    .await
    .assert_status(StatusCode::NOT_FOUND);

    as_user(
        server.delete(&format!("/institutions/{alpha}/reports/{report_id}")),
        admin,
    )
    .await
    .assert_status(StatusCode::NO_CONTENT);
    let list: Vec<Value> = as_user(server.get(&format!("/institutions/{alpha}/reports")), editor)
        .await
        .json();
    assert!(list.is_empty());
}

// ── Key metrics ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_record_key_metrics() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;
    let id = create_institution(&server, editor, "Alpha Capital").await;

    let response = as_user(server.post(&format!("/institutions/{id}/key-metrics")), editor)
        .json(&json!({
            "capital_adequacy": 18,
            "nonperforming_loans_ratio": 4,
            "period": "2023",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    let metrics_id = created["id"].as_i64().unwrap();

    let fetched: Value = as_user(
        server.get(&format!("/institutions/{id}/key-metrics/{metrics_id}")),
        editor,
    )
    .await
    .json();
    assert_eq!(fetched["capital_adequacy"], 18);
    assert!(fetched["owners_equity"].is_null());
    assert_eq!(fetched["created_by"], editor.user_id);
}

#[tokio::test]
async fn should_hide_deleted_key_metrics() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;
    let admin = admin(&state).await;
    let id = create_institution(&server, editor, "Alpha Capital").await;

    let created: Value = as_user(server.post(&format!("/institutions/{id}/key-metrics")), editor)
        .json(&json!({ "period": "2023" }))
        .await
        .json();
    let metrics_id = created["id"].as_i64().unwrap();
    let path = format!("/institutions/{id}/key-metrics/{metrics_id}");

    as_user(server.delete(&path), admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let missing = as_user(server.get(&path), admin).await;
    missing.assert_status(StatusCode::NOT_FOUND);
    let error: Value = missing.json();
    assert_eq!(error["kind"], "KEY_METRICS_NOT_FOUND");
}

// ── Other details ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_record_governance_details() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;
    let id = create_institution(&server, editor, "Alpha Capital").await;

    as_user(
        server.post(&format!("/institutions/{id}/other-details")),
        editor,
    )
    .json(&json!({
        "managing_director": "J. Doe",
        "board_chairman": "R. Roe",
        "period": "2024",
    }))
    .await
    .assert_status(StatusCode::CREATED);

    let list: Vec<Value> = as_user(
        server.get(&format!("/institutions/{id}/other-details")),
        editor,
    )
    .await
    .json();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["managing_director"], "J. Doe");
    assert!(list[0]["directors"].is_null());
}

#[tokio::test]
async fn should_refuse_records_under_deleted_institution() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;
    let admin = admin(&state).await;
    let id = create_institution(&server, editor, "Alpha Capital").await;
    as_user(server.delete(&format!("/institutions/{id}")), admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    for path in ["reports", "key-metrics", "other-details"] {
        let response = as_user(server.post(&format!("/institutions/{id}/{path}")), editor)
            .json(&json!({ "period": "2024" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let error: Value = response.json();
        assert_eq!(error["kind"], "INSTITUTION_NOT_FOUND");

        as_user(server.get(&format!("/institutions/{id}/{path}")), editor)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn should_forbid_viewer_from_adding_records() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;
    let viewer = viewer(&state).await;
    let id = create_institution(&server, editor, "Alpha Capital").await;

    as_user(
        server.post(&format!("/institutions/{id}/other-details")),
        viewer,
    )
    .json(&json!({ "directors": "A, B" }))
    .await
    .assert_status(StatusCode::FORBIDDEN);
}
