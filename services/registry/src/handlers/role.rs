use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use hsi_auth_types::identity::IdentityHeaders;
use hsi_core::extract::JsonBody;
use hsi_domain::permission::{Permission, Permissions};

use crate::domain::types::{PermissionEdit, Role};
use crate::error::RegistryError;
use crate::handlers::authorize;
use crate::state::AppState;
use crate::usecase::role::{
    CreateRoleInput, CreateRoleUseCase, ListRolesUseCase, SetDefaultRoleUseCase,
    UpdateRolePermissionsUseCase,
};

// ── Wire types ───────────────────────────────────────────────────────────────

/// Permissions as sent by clients: either a raw mask or a list of names.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum PermissionsBody {
    Bits(i32),
    Names(Vec<Permission>),
}

impl PermissionsBody {
    pub fn into_permissions(self) -> Result<Permissions, RegistryError> {
        match self {
            Self::Bits(bits) => Permissions::from_bits(bits).ok_or(RegistryError::InvalidPermission),
            Self::Names(names) => Ok(names.into_iter().collect()),
        }
    }
}

fn optional_permissions(body: Option<PermissionsBody>) -> Result<Permissions, RegistryError> {
    body.map_or(Ok(Permissions::NONE), PermissionsBody::into_permissions)
}

#[derive(Serialize)]
pub struct PermissionsResponse {
    pub bits: i32,
    pub names: Vec<Permission>,
}

impl From<Permissions> for PermissionsResponse {
    fn from(permissions: Permissions) -> Self {
        Self {
            bits: permissions.bits(),
            names: permissions.iter().collect(),
        }
    }
}

#[derive(Serialize)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
    pub default: bool,
    pub permissions: PermissionsResponse,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            default: role.is_default,
            permissions: role.permissions.into(),
        }
    }
}

// ── GET /roles ───────────────────────────────────────────────────────────────

pub async fn list_roles(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<RoleResponse>>, RegistryError> {
    authorize(&state, identity, Permissions::all()).await?;
    let usecase = ListRolesUseCase {
        repo: state.role_repo(),
    };
    let roles = usecase.execute().await?;
    Ok(Json(roles.into_iter().map(RoleResponse::from).collect()))
}

// ── POST /roles ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub permissions: Option<PermissionsBody>,
    #[serde(default)]
    pub default: bool,
}

pub async fn create_role(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateRoleRequest>,
) -> Result<(StatusCode, Json<RoleResponse>), RegistryError> {
    authorize(&state, identity, Permissions::all()).await?;
    let usecase = CreateRoleUseCase {
        repo: state.role_repo(),
    };
    let role = usecase
        .execute(CreateRoleInput {
            name: body.name,
            permissions: optional_permissions(body.permissions)?,
            is_default: body.default,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(role.into())))
}

// ── PATCH /roles/{id}/permissions ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePermissionsRequest {
    #[serde(default)]
    pub reset: bool,
    pub add: Option<PermissionsBody>,
    pub remove: Option<PermissionsBody>,
}

pub async fn update_role_permissions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(role_id): Path<i32>,
    JsonBody(body): JsonBody<UpdatePermissionsRequest>,
) -> Result<Json<RoleResponse>, RegistryError> {
    authorize(&state, identity, Permissions::all()).await?;
    let usecase = UpdateRolePermissionsUseCase {
        repo: state.role_repo(),
    };
    let role = usecase
        .execute(
            role_id,
            PermissionEdit {
                reset: body.reset,
                add: optional_permissions(body.add)?,
                remove: optional_permissions(body.remove)?,
            },
        )
        .await?;
    Ok(Json(role.into()))
}

// ── PUT /roles/{id}/default ──────────────────────────────────────────────────

pub async fn set_default_role(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(role_id): Path<i32>,
) -> Result<StatusCode, RegistryError> {
    authorize(&state, identity, Permissions::all()).await?;
    let usecase = SetDefaultRoleUseCase {
        repo: state.role_repo(),
    };
    usecase.execute(role_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
