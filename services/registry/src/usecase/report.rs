use crate::domain::repository::{InstitutionRepository, ReportRepository};
use crate::domain::types::{Actor, NewReport, Report};
use crate::error::RegistryError;
use crate::usecase::ensure_institution;

// ── ListReports ──────────────────────────────────────────────────────────────

pub struct ListReportsUseCase<I: InstitutionRepository, R: ReportRepository> {
    pub institutions: I,
    pub reports: R,
}

impl<I: InstitutionRepository, R: ReportRepository> ListReportsUseCase<I, R> {
    pub async fn execute(&self, institution_id: i32) -> Result<Vec<Report>, RegistryError> {
        ensure_institution(&self.institutions, institution_id).await?;
        self.reports.list(institution_id).await
    }
}

// ── GetReport ────────────────────────────────────────────────────────────────

pub struct GetReportUseCase<I: InstitutionRepository, R: ReportRepository> {
    pub institutions: I,
    pub reports: R,
}

impl<I: InstitutionRepository, R: ReportRepository> GetReportUseCase<I, R> {
    pub async fn execute(&self, institution_id: i32, id: i32) -> Result<Report, RegistryError> {
        ensure_institution(&self.institutions, institution_id).await?;
        self.reports
            .find(institution_id, id)
            .await?
            .ok_or(RegistryError::ReportNotFound)
    }

    /// The attached document, or `ReportContentNotFound` when none was uploaded.
    pub async fn content(&self, institution_id: i32, id: i32) -> Result<Vec<u8>, RegistryError> {
        let report = self.execute(institution_id, id).await?;
        if !report.has_content {
            return Err(RegistryError::ReportContentNotFound);
        }
        self.reports
            .find_content(institution_id, id)
            .await?
            .ok_or(RegistryError::ReportContentNotFound)
    }
}

// ── CreateReport ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct CreateReportInput {
    pub period: Option<String>,
    pub kind: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub content: Option<Vec<u8>>,
}

pub struct CreateReportUseCase<I: InstitutionRepository, R: ReportRepository> {
    pub institutions: I,
    pub reports: R,
}

impl<I: InstitutionRepository, R: ReportRepository> CreateReportUseCase<I, R> {
    pub async fn execute(
        &self,
        actor: Actor,
        institution_id: i32,
        input: CreateReportInput,
    ) -> Result<Report, RegistryError> {
        ensure_institution(&self.institutions, institution_id).await?;
        let content_bytes = input.content.as_ref().map_or(0, Vec::len);
        let report = self
            .reports
            .create(&NewReport {
                institution_id,
                period: input.period,
                kind: input.kind,
                summary: input.summary,
                description: input.description,
                content: input.content,
                created_by: actor.user_id,
            })
            .await?;
        tracing::info!(
            institution_id,
            report_id = report.id,
            content_bytes,
            "report created"
        );
        Ok(report)
    }
}

// ── DeleteReport ─────────────────────────────────────────────────────────────

pub struct DeleteReportUseCase<R: ReportRepository> {
    pub repo: R,
}

impl<R: ReportRepository> DeleteReportUseCase<R> {
    pub async fn execute(&self, institution_id: i32, id: i32) -> Result<(), RegistryError> {
        if !self.repo.soft_delete(institution_id, id).await? {
            return Err(RegistryError::ReportNotFound);
        }
        Ok(())
    }
}
