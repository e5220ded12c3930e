use crate::domain::repository::{InstitutionRepository, OtherDetailRepository};
use crate::domain::types::{Actor, Governance, NewOtherDetail, OtherDetail};
use crate::error::RegistryError;
use crate::usecase::ensure_institution;

// ── ListOtherDetails ─────────────────────────────────────────────────────────

pub struct ListOtherDetailsUseCase<I: InstitutionRepository, D: OtherDetailRepository> {
    pub institutions: I,
    pub details: D,
}

impl<I: InstitutionRepository, D: OtherDetailRepository> ListOtherDetailsUseCase<I, D> {
    pub async fn execute(&self, institution_id: i32) -> Result<Vec<OtherDetail>, RegistryError> {
        ensure_institution(&self.institutions, institution_id).await?;
        self.details.list(institution_id).await
    }
}

// ── GetOtherDetail ───────────────────────────────────────────────────────────

pub struct GetOtherDetailUseCase<I: InstitutionRepository, D: OtherDetailRepository> {
    pub institutions: I,
    pub details: D,
}

impl<I: InstitutionRepository, D: OtherDetailRepository> GetOtherDetailUseCase<I, D> {
    pub async fn execute(
        &self,
        institution_id: i32,
        id: i32,
    ) -> Result<OtherDetail, RegistryError> {
        ensure_institution(&self.institutions, institution_id).await?;
        self.details
            .find(institution_id, id)
            .await?
            .ok_or(RegistryError::OtherDetailNotFound)
    }
}

// ── CreateOtherDetail ────────────────────────────────────────────────────────

pub struct CreateOtherDetailInput {
    pub governance: Governance,
    pub period: Option<String>,
}

pub struct CreateOtherDetailUseCase<I: InstitutionRepository, D: OtherDetailRepository> {
    pub institutions: I,
    pub details: D,
}

impl<I: InstitutionRepository, D: OtherDetailRepository> CreateOtherDetailUseCase<I, D> {
    pub async fn execute(
        &self,
        actor: Actor,
        institution_id: i32,
        input: CreateOtherDetailInput,
    ) -> Result<OtherDetail, RegistryError> {
        ensure_institution(&self.institutions, institution_id).await?;
        self.details
            .create(&NewOtherDetail {
                institution_id,
                governance: input.governance,
                period: input.period,
                created_by: actor.user_id,
            })
            .await
    }
}

// ── DeleteOtherDetail ────────────────────────────────────────────────────────

pub struct DeleteOtherDetailUseCase<D: OtherDetailRepository> {
    pub repo: D,
}

impl<D: OtherDetailRepository> DeleteOtherDetailUseCase<D> {
    pub async fn execute(&self, institution_id: i32, id: i32) -> Result<(), RegistryError> {
        if !self.repo.soft_delete(institution_id, id).await? {
            return Err(RegistryError::OtherDetailNotFound);
        }
        Ok(())
    }
}
