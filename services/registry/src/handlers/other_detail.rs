use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use hsi_auth_types::identity::IdentityHeaders;
use hsi_core::extract::JsonBody;
use hsi_domain::permission::Permission;

use crate::domain::types::{Governance, OtherDetail};
use crate::error::RegistryError;
use crate::handlers::authorize;
use crate::state::AppState;
use crate::usecase::other_detail::{
    CreateOtherDetailInput, CreateOtherDetailUseCase, DeleteOtherDetailUseCase,
    GetOtherDetailUseCase, ListOtherDetailsUseCase,
};

#[derive(Serialize)]
pub struct OtherDetailResponse {
    pub id: i32,
    pub institution_id: i32,
    pub directors: Option<String>,
    pub board_members: Option<String>,
    pub managing_director: Option<String>,
    pub board_chairman: Option<String>,
    pub period: Option<String>,
    pub created_by: Option<i32>,
    #[serde(serialize_with = "hsi_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<OtherDetail> for OtherDetailResponse {
    fn from(detail: OtherDetail) -> Self {
        let governance = detail.governance;
        Self {
            id: detail.id,
            institution_id: detail.institution_id,
            directors: governance.directors,
            board_members: governance.board_members,
            managing_director: governance.managing_director,
            board_chairman: governance.board_chairman,
            period: detail.period,
            created_by: detail.created_by,
            created_at: detail.created_at,
        }
    }
}

// ── GET /institutions/{id}/other-details ─────────────────────────────────────

pub async fn list_other_details(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(institution_id): Path<i32>,
) -> Result<Json<Vec<OtherDetailResponse>>, RegistryError> {
    authorize(&state, identity, Permission::ViewInstitution).await?;
    let usecase = ListOtherDetailsUseCase {
        institutions: state.institution_repo(),
        details: state.other_detail_repo(),
    };
    let details = usecase.execute(institution_id).await?;
    Ok(Json(
        details.into_iter().map(OtherDetailResponse::from).collect(),
    ))
}

// ── GET /institutions/{id}/other-details/{detail_id} ─────────────────────────

pub async fn get_other_detail(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path((institution_id, detail_id)): Path<(i32, i32)>,
) -> Result<Json<OtherDetailResponse>, RegistryError> {
    authorize(&state, identity, Permission::ViewInstitution).await?;
    let usecase = GetOtherDetailUseCase {
        institutions: state.institution_repo(),
        details: state.other_detail_repo(),
    };
    Ok(Json(usecase.execute(institution_id, detail_id).await?.into()))
}

// ── POST /institutions/{id}/other-details ────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateOtherDetailRequest {
    pub directors: Option<String>,
    pub board_members: Option<String>,
    pub managing_director: Option<String>,
    pub board_chairman: Option<String>,
    pub period: Option<String>,
}

pub async fn create_other_detail(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(institution_id): Path<i32>,
    JsonBody(body): JsonBody<CreateOtherDetailRequest>,
) -> Result<(StatusCode, Json<OtherDetailResponse>), RegistryError> {
    let actor = authorize(&state, identity, Permission::UpdateInstitution).await?;
    let usecase = CreateOtherDetailUseCase {
        institutions: state.institution_repo(),
        details: state.other_detail_repo(),
    };
    let detail = usecase
        .execute(
            actor,
            institution_id,
            CreateOtherDetailInput {
                governance: Governance {
                    directors: body.directors,
                    board_members: body.board_members,
                    managing_director: body.managing_director,
                    board_chairman: body.board_chairman,
                },
                period: body.period,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

// ── DELETE /institutions/{id}/other-details/{detail_id} ──────────────────────

pub async fn delete_other_detail(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path((institution_id, detail_id)): Path<(i32, i32)>,
) -> Result<StatusCode, RegistryError> {
    authorize(&state, identity, Permission::DeleteInstitution).await?;
    let usecase = DeleteOtherDetailUseCase {
        repo: state.other_detail_repo(),
    };
    usecase.execute(institution_id, detail_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
