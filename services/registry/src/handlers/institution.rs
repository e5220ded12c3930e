use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use hsi_auth_types::identity::IdentityHeaders;
use hsi_core::extract::JsonBody;
use hsi_domain::pagination::{PageRequest, Sort};
use hsi_domain::permission::Permission;

use crate::domain::types::{Institution, InstitutionDetails, InstitutionPatch};
use crate::error::RegistryError;
use crate::handlers::authorize;
use crate::state::AppState;
use crate::usecase::institution::{
    CreateInstitutionInput, CreateInstitutionUseCase, DeleteInstitutionUseCase,
    GetInstitutionUseCase, ListInstitutionsUseCase, UpdateInstitutionUseCase,
};

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Default)]
pub struct InstitutionDetailsBody {
    pub address: Option<String>,
    pub telephone_1: Option<String>,
    pub telephone_2: Option<String>,
    pub email: Option<String>,
    pub headoffice: Option<String>,
    pub category: Option<String>,
    pub about: Option<String>,
    pub period_incorporated: Option<String>,
}

impl From<InstitutionDetailsBody> for InstitutionDetails {
    fn from(body: InstitutionDetailsBody) -> Self {
        Self {
            address: body.address,
            telephone_1: body.telephone_1,
            telephone_2: body.telephone_2,
            email: body.email,
            headoffice: body.headoffice,
            category: body.category,
            about: body.about,
            period_incorporated: body.period_incorporated,
        }
    }
}

impl From<InstitutionDetails> for InstitutionDetailsBody {
    fn from(details: InstitutionDetails) -> Self {
        Self {
            address: details.address,
            telephone_1: details.telephone_1,
            telephone_2: details.telephone_2,
            email: details.email,
            headoffice: details.headoffice,
            category: details.category,
            about: details.about,
            period_incorporated: details.period_incorporated,
        }
    }
}

#[derive(Serialize)]
pub struct InstitutionResponse {
    pub id: i32,
    pub name: String,
    #[serde(flatten)]
    pub details: InstitutionDetailsBody,
    pub created_by: Option<i32>,
    #[serde(serialize_with = "hsi_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Institution> for InstitutionResponse {
    fn from(institution: Institution) -> Self {
        Self {
            id: institution.id,
            name: institution.name,
            details: institution.details.into(),
            created_by: institution.created_by,
            created_at: institution.created_at,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct InstitutionListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub sort: Option<String>,
}

// ── GET /institutions ────────────────────────────────────────────────────────

pub async fn list_institutions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<InstitutionListQuery>,
) -> Result<Json<Vec<InstitutionResponse>>, RegistryError> {
    authorize(&state, identity, Permission::ViewInstitution).await?;
    let sort = query
        .sort
        .as_deref()
        .and_then(Sort::from_kebab_case)
        .unwrap_or_default();
    let page = PageRequest::from_query(query.per_page, query.page);

    let usecase = ListInstitutionsUseCase {
        repo: state.institution_repo(),
    };
    let institutions = usecase.execute(sort, page).await?;
    Ok(Json(
        institutions
            .into_iter()
            .map(InstitutionResponse::from)
            .collect(),
    ))
}

// ── GET /institutions/{id} ───────────────────────────────────────────────────

pub async fn get_institution(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<InstitutionResponse>, RegistryError> {
    authorize(&state, identity, Permission::ViewInstitution).await?;
    let usecase = GetInstitutionUseCase {
        repo: state.institution_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /institutions ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateInstitutionRequest {
    pub name: String,
    #[serde(flatten)]
    pub details: InstitutionDetailsBody,
}

pub async fn create_institution(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateInstitutionRequest>,
) -> Result<(StatusCode, Json<InstitutionResponse>), RegistryError> {
    let actor = authorize(&state, identity, Permission::AddInstitution).await?;
    let usecase = CreateInstitutionUseCase {
        repo: state.institution_repo(),
    };
    let institution = usecase
        .execute(
            actor,
            CreateInstitutionInput {
                name: body.name,
                details: body.details.into(),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(institution.into())))
}

// ── PATCH /institutions/{id} ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateInstitutionRequest {
    pub name: Option<String>,
    #[serde(flatten)]
    pub details: InstitutionDetailsBody,
}

pub async fn update_institution(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(body): JsonBody<UpdateInstitutionRequest>,
) -> Result<Json<InstitutionResponse>, RegistryError> {
    authorize(&state, identity, Permission::UpdateInstitution).await?;
    let usecase = UpdateInstitutionUseCase {
        repo: state.institution_repo(),
    };
    let institution = usecase
        .execute(
            id,
            InstitutionPatch {
                name: body.name,
                details: body.details.into(),
            },
        )
        .await?;
    Ok(Json(institution.into()))
}

// ── DELETE /institutions/{id} ────────────────────────────────────────────────

pub async fn delete_institution(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RegistryError> {
    let actor = authorize(&state, identity, Permission::DeleteInstitution).await?;
    let usecase = DeleteInstitutionUseCase {
        repo: state.institution_repo(),
    };
    usecase.execute(actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
