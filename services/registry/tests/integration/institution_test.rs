use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{admin, as_user, editor, setup_server, viewer};

#[tokio::test]
async fn should_create_institution_as_editor() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;

    let response = as_user(server.post("/institutions"), editor)
        .json(&json!({
            "name": "Alpha Capital",
            "category": "bank",
            "telephone_1": "+44 20 0000 0000",
            "period_incorporated": "1999",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let institution: Value = response.json();
    assert_eq!(institution["name"], "Alpha Capital");
    assert_eq!(institution["telephone_1"], "+44 20 0000 0000");
    assert_eq!(institution["created_by"], editor.user_id);
    assert!(institution["address"].is_null());
}

#[tokio::test]
async fn should_forbid_viewer_from_creating() {
    let (server, state) = setup_server().await;
    let viewer = viewer(&state).await;

    let response = as_user(server.post("/institutions"), viewer)
        .json(&json!({ "name": "Alpha Capital" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    as_user(server.get("/institutions"), viewer)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn should_require_identity_header() {
    let (server, _state) = setup_server().await;
    let response = server.get("/institutions").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let error: Value = response.json();
    assert_eq!(error["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_list_by_name_with_sort_and_pagination() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;
    for name in ["Charlie Credit", "Alpha Capital", "Bravo Bank"] {
        as_user(server.post("/institutions"), editor)
            .json(&json!({ "name": name }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let names = |list: Vec<Value>| -> Vec<String> {
        list.iter()
            .filter_map(|i| i["name"].as_str().map(str::to_owned))
            .collect()
    };

    let asc: Vec<Value> = as_user(server.get("/institutions"), editor).await.json();
    assert_eq!(names(asc), ["Alpha Capital", "Bravo Bank", "Charlie Credit"]);

    let desc: Vec<Value> = as_user(
        server.get("/institutions?sort=desc&per-page=2&page=2"),
        editor,
    )
    .await
    .json();
    assert_eq!(names(desc), ["Alpha Capital"]);
}

#[tokio::test]
async fn should_patch_given_fields_only() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;
    let created: Value = as_user(server.post("/institutions"), editor)
        .json(&json!({ "name": "Alpha Capital", "category": "bank" }))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let response = as_user(server.patch(&format!("/institutions/{id}")), editor)
        .json(&json!({ "address": "1 High Street" }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["name"], "Alpha Capital");
    assert_eq!(updated["category"], "bank");
    assert_eq!(updated["address"], "1 High Street");

    let empty = as_user(server.patch(&format!("/institutions/{id}")), editor)
        .json(&json!({}))
        .await;
    empty.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = empty.json();
    assert_eq!(error["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_soft_delete_and_hide_institution() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;
    let admin = admin(&state).await;
    let created: Value = as_user(server.post("/institutions"), editor)
        .json(&json!({ "name": "Alpha Capital" }))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();
    let path = format!("/institutions/{id}");

    as_user(server.delete(&path), editor)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    as_user(server.delete(&path), admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let missing = as_user(server.get(&path), admin).await;
    missing.assert_status(StatusCode::NOT_FOUND);
    let error: Value = missing.json();
    assert_eq!(error["kind"], "INSTITUTION_NOT_FOUND");

    let list: Vec<Value> = as_user(server.get("/institutions"), admin).await.json();
    assert!(list.is_empty());

    as_user(server.patch(&path), admin)
        .json(&json!({ "name": "Revived" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    as_user(server.delete(&path), admin)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
