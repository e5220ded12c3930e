use axum::{
    Router,
    routing::{get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use hsi_core::health::healthz;
use hsi_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::login,
    health::readyz,
    institution::{
        create_institution, delete_institution, get_institution, list_institutions,
        update_institution,
    },
    key_metrics::{create_key_metrics, delete_key_metrics, get_key_metrics, list_key_metrics},
    other_detail::{create_other_detail, delete_other_detail, get_other_detail, list_other_details},
    report::{create_report, delete_report, get_report, get_report_content, list_reports},
    role::{create_role, list_roles, set_default_role, update_role_permissions},
    user::{change_password, get_me, register_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(register_user))
        .route("/users/@me", get(get_me))
        .route("/users/@me/password", patch(change_password))
        .route("/auth/login", post(login))
        // Roles
        .route("/roles", get(list_roles).post(create_role))
        .route("/roles/{id}/permissions", patch(update_role_permissions))
        .route("/roles/{id}/default", put(set_default_role))
        // Institutions
        .route(
            "/institutions",
            get(list_institutions).post(create_institution),
        )
        .route(
            "/institutions/{id}",
            get(get_institution)
                .patch(update_institution)
                .delete(delete_institution),
        )
        // Reports
        .route(
            "/institutions/{id}/reports",
            get(list_reports).post(create_report),
        )
        .route(
            "/institutions/{id}/reports/{report_id}",
            get(get_report).delete(delete_report),
        )
        .route(
            "/institutions/{id}/reports/{report_id}/content",
            get(get_report_content),
        )
        // Key metrics
        .route(
            "/institutions/{id}/key-metrics",
            get(list_key_metrics).post(create_key_metrics),
        )
        .route(
            "/institutions/{id}/key-metrics/{metrics_id}",
            get(get_key_metrics).delete(delete_key_metrics),
        )
        // Other details
        .route(
            "/institutions/{id}/other-details",
            get(list_other_details).post(create_other_detail),
        )
        .route(
            "/institutions/{id}/other-details/{detail_id}",
            get(get_other_detail).delete(delete_other_detail),
        )
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
