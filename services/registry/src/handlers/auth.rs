use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use hsi_core::extract::JsonBody;

use crate::error::RegistryError;
use crate::handlers::role::PermissionsResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::user::AuthenticateUseCase;

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub permissions: PermissionsResponse,
}

/// Verify an email/password pair. Session issuance is the gateway's concern.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, RegistryError> {
    let usecase = AuthenticateUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    let output = usecase.execute(&body.email, &body.password).await?;
    tracing::info!(user_id = output.user.id, "login succeeded");
    Ok(Json(LoginResponse {
        user: output.user.into(),
        permissions: output.permissions.into(),
    }))
}
