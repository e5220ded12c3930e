use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use hsi_auth_types::identity::IdentityHeaders;
use hsi_core::extract::JsonBody;
use hsi_domain::permission::Permission;

use crate::domain::types::{KeyMetrics, Ratios};
use crate::error::RegistryError;
use crate::handlers::authorize;
use crate::state::AppState;
use crate::usecase::key_metrics::{
    CreateKeyMetricsInput, CreateKeyMetricsUseCase, DeleteKeyMetricsUseCase,
    GetKeyMetricsUseCase, ListKeyMetricsUseCase,
};

#[derive(Serialize)]
pub struct KeyMetricsResponse {
    pub id: i32,
    pub institution_id: i32,
    pub capital_adequacy: Option<i32>,
    pub owners_equity: Option<i32>,
    pub total_liability: Option<i32>,
    pub nonperforming_loans_ratio: Option<i32>,
    pub period: Option<String>,
    pub created_by: Option<i32>,
    #[serde(serialize_with = "hsi_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<KeyMetrics> for KeyMetricsResponse {
    fn from(metrics: KeyMetrics) -> Self {
        Self {
            id: metrics.id,
            institution_id: metrics.institution_id,
            capital_adequacy: metrics.ratios.capital_adequacy,
            owners_equity: metrics.ratios.owners_equity,
            total_liability: metrics.ratios.total_liability,
            nonperforming_loans_ratio: metrics.ratios.nonperforming_loans_ratio,
            period: metrics.period,
            created_by: metrics.created_by,
            created_at: metrics.created_at,
        }
    }
}

// ── GET /institutions/{id}/key-metrics ───────────────────────────────────────

pub async fn list_key_metrics(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(institution_id): Path<i32>,
) -> Result<Json<Vec<KeyMetricsResponse>>, RegistryError> {
    authorize(&state, identity, Permission::ViewInstitution).await?;
    let usecase = ListKeyMetricsUseCase {
        institutions: state.institution_repo(),
        metrics: state.key_metrics_repo(),
    };
    let metrics = usecase.execute(institution_id).await?;
    Ok(Json(
        metrics.into_iter().map(KeyMetricsResponse::from).collect(),
    ))
}

// ── GET /institutions/{id}/key-metrics/{metrics_id} ──────────────────────────

pub async fn get_key_metrics(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path((institution_id, metrics_id)): Path<(i32, i32)>,
) -> Result<Json<KeyMetricsResponse>, RegistryError> {
    authorize(&state, identity, Permission::ViewInstitution).await?;
    let usecase = GetKeyMetricsUseCase {
        institutions: state.institution_repo(),
        metrics: state.key_metrics_repo(),
    };
    Ok(Json(
        usecase.execute(institution_id, metrics_id).await?.into(),
    ))
}

// ── POST /institutions/{id}/key-metrics ──────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateKeyMetricsRequest {
    pub capital_adequacy: Option<i32>,
    pub owners_equity: Option<i32>,
    pub total_liability: Option<i32>,
    pub nonperforming_loans_ratio: Option<i32>,
    pub period: Option<String>,
}

pub async fn create_key_metrics(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(institution_id): Path<i32>,
    JsonBody(body): JsonBody<CreateKeyMetricsRequest>,
) -> Result<(StatusCode, Json<KeyMetricsResponse>), RegistryError> {
    let actor = authorize(&state, identity, Permission::UpdateInstitution).await?;
    let usecase = CreateKeyMetricsUseCase {
        institutions: state.institution_repo(),
        metrics: state.key_metrics_repo(),
    };
    let metrics = usecase
        .execute(
            actor,
            institution_id,
            CreateKeyMetricsInput {
                ratios: Ratios {
                    capital_adequacy: body.capital_adequacy,
                    owners_equity: body.owners_equity,
                    total_liability: body.total_liability,
                    nonperforming_loans_ratio: body.nonperforming_loans_ratio,
                },
                period: body.period,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(metrics.into())))
}

// ── DELETE /institutions/{id}/key-metrics/{metrics_id} ───────────────────────

pub async fn delete_key_metrics(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path((institution_id, metrics_id)): Path<(i32, i32)>,
) -> Result<StatusCode, RegistryError> {
    authorize(&state, identity, Permission::DeleteInstitution).await?;
    let usecase = DeleteKeyMetricsUseCase {
        repo: state.key_metrics_repo(),
    };
    usecase.execute(institution_id, metrics_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
