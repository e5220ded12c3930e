use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use hsi_auth_types::identity::IdentityHeaders;
use hsi_core::extract::JsonBody;
use hsi_domain::permission::Permission;

use crate::domain::types::Report;
use crate::error::RegistryError;
use crate::handlers::authorize;
use crate::state::AppState;
use crate::usecase::report::{
    CreateReportInput, CreateReportUseCase, DeleteReportUseCase, GetReportUseCase,
    ListReportsUseCase,
};

/// Report metadata. The document itself is served by the `/content` route.
#[derive(Serialize)]
pub struct ReportResponse {
    pub id: i32,
    pub institution_id: i32,
    pub period: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub has_content: bool,
    pub created_by: Option<i32>,
    #[serde(serialize_with = "hsi_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            institution_id: report.institution_id,
            period: report.period,
            kind: report.kind,
            summary: report.summary,
            description: report.description,
            has_content: report.has_content,
            created_by: report.created_by,
            created_at: report.created_at,
        }
    }
}

// ── GET /institutions/{id}/reports ───────────────────────────────────────────

pub async fn list_reports(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(institution_id): Path<i32>,
) -> Result<Json<Vec<ReportResponse>>, RegistryError> {
    authorize(&state, identity, Permission::ViewInstitution).await?;
    let usecase = ListReportsUseCase {
        institutions: state.institution_repo(),
        reports: state.report_repo(),
    };
    let reports = usecase.execute(institution_id).await?;
    Ok(Json(reports.into_iter().map(ReportResponse::from).collect()))
}

// ── GET /institutions/{id}/reports/{report_id} ───────────────────────────────

pub async fn get_report(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path((institution_id, report_id)): Path<(i32, i32)>,
) -> Result<Json<ReportResponse>, RegistryError> {
    authorize(&state, identity, Permission::ViewInstitution).await?;
    let usecase = GetReportUseCase {
        institutions: state.institution_repo(),
        reports: state.report_repo(),
    };
    Ok(Json(usecase.execute(institution_id, report_id).await?.into()))
}

// ── GET /institutions/{id}/reports/{report_id}/content ───────────────────────

pub async fn get_report_content(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path((institution_id, report_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, RegistryError> {
    authorize(&state, identity, Permission::ViewInstitution).await?;
    let usecase = GetReportUseCase {
        institutions: state.institution_repo(),
        reports: state.report_repo(),
    };
    let content = usecase.content(institution_id, report_id).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        content,
    ))
}

// ── POST /institutions/{id}/reports ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateReportRequest {
    pub period: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Standard base64 of the document bytes.
    pub content: Option<String>,
}

pub async fn create_report(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(institution_id): Path<i32>,
    JsonBody(body): JsonBody<CreateReportRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), RegistryError> {
    let actor = authorize(&state, identity, Permission::UpdateInstitution).await?;
    let content = body
        .content
        .map(|encoded| STANDARD.decode(encoded.trim()))
        .transpose()
        .map_err(|_| RegistryError::InvalidContent)?;

    let usecase = CreateReportUseCase {
        institutions: state.institution_repo(),
        reports: state.report_repo(),
    };
    let report = usecase
        .execute(
            actor,
            institution_id,
            CreateReportInput {
                period: body.period,
                kind: body.kind,
                summary: body.summary,
                description: body.description,
                content,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(report.into())))
}

// ── DELETE /institutions/{id}/reports/{report_id} ────────────────────────────

pub async fn delete_report(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path((institution_id, report_id)): Path<(i32, i32)>,
) -> Result<StatusCode, RegistryError> {
    authorize(&state, identity, Permission::DeleteInstitution).await?;
    let usecase = DeleteReportUseCase {
        repo: state.report_repo(),
    };
    usecase.execute(institution_id, report_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
