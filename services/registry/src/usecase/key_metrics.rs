use crate::domain::repository::{InstitutionRepository, KeyMetricsRepository};
use crate::domain::types::{Actor, KeyMetrics, NewKeyMetrics, Ratios};
use crate::error::RegistryError;
use crate::usecase::ensure_institution;

// ── ListKeyMetrics ───────────────────────────────────────────────────────────

pub struct ListKeyMetricsUseCase<I: InstitutionRepository, K: KeyMetricsRepository> {
    pub institutions: I,
    pub metrics: K,
}

impl<I: InstitutionRepository, K: KeyMetricsRepository> ListKeyMetricsUseCase<I, K> {
    pub async fn execute(&self, institution_id: i32) -> Result<Vec<KeyMetrics>, RegistryError> {
        ensure_institution(&self.institutions, institution_id).await?;
        self.metrics.list(institution_id).await
    }
}

// ── GetKeyMetrics ────────────────────────────────────────────────────────────

pub struct GetKeyMetricsUseCase<I: InstitutionRepository, K: KeyMetricsRepository> {
    pub institutions: I,
    pub metrics: K,
}

impl<I: InstitutionRepository, K: KeyMetricsRepository> GetKeyMetricsUseCase<I, K> {
    pub async fn execute(
        &self,
        institution_id: i32,
        id: i32,
    ) -> Result<KeyMetrics, RegistryError> {
        ensure_institution(&self.institutions, institution_id).await?;
        self.metrics
            .find(institution_id, id)
            .await?
            .ok_or(RegistryError::KeyMetricsNotFound)
    }
}

// ── CreateKeyMetrics ─────────────────────────────────────────────────────────

pub struct CreateKeyMetricsInput {
    pub ratios: Ratios,
    pub period: Option<String>,
}

pub struct CreateKeyMetricsUseCase<I: InstitutionRepository, K: KeyMetricsRepository> {
    pub institutions: I,
    pub metrics: K,
}

impl<I: InstitutionRepository, K: KeyMetricsRepository> CreateKeyMetricsUseCase<I, K> {
    pub async fn execute(
        &self,
        actor: Actor,
        institution_id: i32,
        input: CreateKeyMetricsInput,
    ) -> Result<KeyMetrics, RegistryError> {
        ensure_institution(&self.institutions, institution_id).await?;
        self.metrics
            .create(&NewKeyMetrics {
                institution_id,
                ratios: input.ratios,
                period: input.period,
                created_by: actor.user_id,
            })
            .await
    }
}

// ── DeleteKeyMetrics ─────────────────────────────────────────────────────────

pub struct DeleteKeyMetricsUseCase<K: KeyMetricsRepository> {
    pub repo: K,
}

impl<K: KeyMetricsRepository> DeleteKeyMetricsUseCase<K> {
    pub async fn execute(&self, institution_id: i32, id: i32) -> Result<(), RegistryError> {
        if !self.repo.soft_delete(institution_id, id).await? {
            return Err(RegistryError::KeyMetricsNotFound);
        }
        Ok(())
    }
}
