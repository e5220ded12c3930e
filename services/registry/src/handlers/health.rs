use axum::{extract::State, http::StatusCode};

use hsi_core::health::database_ready;

use crate::state::AppState;

/// Handler for `GET /readyz`.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}
