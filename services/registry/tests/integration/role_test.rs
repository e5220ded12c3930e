use axum::http::StatusCode;
use serde_json::{Value, json};

use hsi_registry::usecase::role::SeedRolesUseCase;

use crate::helpers::{admin, as_user, editor, setup_server};

#[tokio::test]
async fn should_list_seeded_roles_for_administrator() {
    let (server, state) = setup_server().await;
    let admin = admin(&state).await;

    let response = as_user(server.get("/roles"), admin).await;
    response.assert_status_ok();
    let roles: Vec<Value> = response.json();
    let names: Vec<&str> = roles.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names, ["User", "Editor", "Administrator"]);

    let defaults: Vec<&Value> = roles.iter().filter(|r| r["default"] == true).collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0]["name"], "User");
    assert_eq!(roles[2]["permissions"]["bits"], 31);
}

#[tokio::test]
async fn should_forbid_role_management_without_every_permission() {
    let (server, state) = setup_server().await;
    let editor = editor(&state).await;

    let response = as_user(server.get("/roles"), editor).await;
    response.assert_status(StatusCode::FORBIDDEN);
    let error: Value = response.json();
    assert_eq!(error["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_create_default_role_used_by_new_registrations() {
    let (server, state) = setup_server().await;
    let admin = admin(&state).await;

    let created = as_user(server.post("/roles"), admin)
        .json(&json!({
            "name": "Analyst",
            "permissions": ["view_institution", "publish_blog"],
            "default": true,
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let role: Value = created.json();
    assert_eq!(role["permissions"]["bits"], 9);

    let roles: Vec<Value> = as_user(server.get("/roles"), admin).await.json();
    let defaults: Vec<&Value> = roles.iter().filter(|r| r["default"] == true).collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0]["name"], "Analyst");

    let user: Value = server
        .post("/users")
        .json(&json!({ "name": "g", "email": "g@example.com", "password": "pw" }))
        .await
        .json();
    assert_eq!(user["role_id"], role["id"]);
}

#[tokio::test]
async fn should_reject_duplicate_role_name() {
    let (server, state) = setup_server().await;
    let admin = admin(&state).await;

    let response = as_user(server.post("/roles"), admin)
        .json(&json!({ "name": "Editor", "permissions": 8 }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let error: Value = response.json();
    assert_eq!(error["kind"], "ROLE_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_reject_unknown_permission_bits() {
    let (server, state) = setup_server().await;
    let admin = admin(&state).await;

    let response = as_user(server.post("/roles"), admin)
        .json(&json!({ "name": "Broken", "permissions": 64 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["kind"], "INVALID_PERMISSION");
}

#[tokio::test]
async fn should_edit_permissions_in_reset_add_remove_order() {
    let (server, state) = setup_server().await;
    let admin = admin(&state).await;

    let roles: Vec<Value> = as_user(server.get("/roles"), admin).await.json();
    let editor_id = roles
        .iter()
        .find(|r| r["name"] == "Editor")
        .and_then(|r| r["id"].as_i64())
        .unwrap();

    let response = as_user(
        server.patch(&format!("/roles/{editor_id}/permissions")),
        admin,
    )
    .json(&json!({
        "reset": true,
        "add": ["view_institution", "delete_institution"],
        "remove": ["delete_institution"],
    }))
    .await;
    response.assert_status_ok();
    let role: Value = response.json();
    assert_eq!(role["permissions"]["names"], json!(["view_institution"]));

    let response = as_user(
        server.patch(&format!("/roles/{editor_id}/permissions")),
        admin,
    )
    .json(&json!({}))
    .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_role() {
    let (server, state) = setup_server().await;
    let admin = admin(&state).await;

    as_user(server.put("/roles/999/default"), admin)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    as_user(server.patch("/roles/999/permissions"), admin)
        .json(&json!({ "add": 8 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_move_default_role() {
    let (server, state) = setup_server().await;
    let admin = admin(&state).await;

    let roles: Vec<Value> = as_user(server.get("/roles"), admin).await.json();
    let editor_id = roles[1]["id"].as_i64().unwrap();
    as_user(server.put(&format!("/roles/{editor_id}/default")), admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let roles: Vec<Value> = as_user(server.get("/roles"), admin).await.json();
    let defaults: Vec<i64> = roles
        .iter()
        .filter(|r| r["default"] == true)
        .filter_map(|r| r["id"].as_i64())
        .collect();
    assert_eq!(defaults, [editor_id]);
}

#[tokio::test]
async fn should_keep_edited_roles_when_reseeding() {
    let (server, state) = setup_server().await;
    let admin = admin(&state).await;

    let roles: Vec<Value> = as_user(server.get("/roles"), admin).await.json();
    let user_role_id = roles[0]["id"].as_i64().unwrap();
    as_user(
        server.patch(&format!("/roles/{user_role_id}/permissions")),
        admin,
    )
    .json(&json!({ "add": ["publish_blog"] }))
    .await
    .assert_status_ok();

    let inserted = SeedRolesUseCase {
        repo: state.role_repo(),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(inserted, 0);

    let roles: Vec<Value> = as_user(server.get("/roles"), admin).await.json();
    assert_eq!(roles.len(), 3);
    assert_eq!(roles[0]["permissions"]["bits"], 9);
}
