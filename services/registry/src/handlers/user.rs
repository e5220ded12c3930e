use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use hsi_auth_types::identity::IdentityHeaders;
use hsi_core::extract::JsonBody;
use hsi_domain::permission::Permissions;

use crate::domain::types::User;
use crate::error::RegistryError;
use crate::handlers::role::{PermissionsResponse, RoleResponse};
use crate::state::AppState;
use crate::usecase::user::{
    ChangePasswordInput, ChangePasswordUseCase, GetProfileUseCase, RegisterUserInput,
    RegisterUserUseCase,
};

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role_id: Option<i32>,
    #[serde(serialize_with = "hsi_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role_id: user.role_id,
            created_at: user.created_at,
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), RegistryError> {
    let usecase = RegisterUserUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    let user = usecase
        .execute(RegisterUserInput {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub role: Option<RoleResponse>,
    pub permissions: PermissionsResponse,
}

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, RegistryError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    let profile = usecase.execute(identity.user_id).await?;
    let permissions = profile
        .role
        .as_ref()
        .map_or(Permissions::NONE, |role| role.permissions);
    Ok(Json(MeResponse {
        user: profile.user.into(),
        role: profile.role.map(RoleResponse::from),
        permissions: permissions.into(),
    }))
}

// ── PATCH /users/@me/password ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ChangePasswordRequest>,
) -> Result<StatusCode, RegistryError> {
    let usecase = ChangePasswordUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            ChangePasswordInput {
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
