use hsi_domain::pagination::{PageRequest, Sort};

use crate::domain::repository::InstitutionRepository;
use crate::domain::types::{Actor, Institution, InstitutionDetails, InstitutionPatch, NewInstitution};
use crate::error::RegistryError;

// ── ListInstitutions ─────────────────────────────────────────────────────────

pub struct ListInstitutionsUseCase<R: InstitutionRepository> {
    pub repo: R,
}

impl<R: InstitutionRepository> ListInstitutionsUseCase<R> {
    pub async fn execute(
        &self,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<Institution>, RegistryError> {
        self.repo.list(sort, page.clamped()).await
    }
}

// ── GetInstitution ───────────────────────────────────────────────────────────

pub struct GetInstitutionUseCase<R: InstitutionRepository> {
    pub repo: R,
}

impl<R: InstitutionRepository> GetInstitutionUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Institution, RegistryError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RegistryError::InstitutionNotFound)
    }
}

// ── CreateInstitution ────────────────────────────────────────────────────────

pub struct CreateInstitutionInput {
    pub name: String,
    pub details: InstitutionDetails,
}

pub struct CreateInstitutionUseCase<R: InstitutionRepository> {
    pub repo: R,
}

impl<R: InstitutionRepository> CreateInstitutionUseCase<R> {
    pub async fn execute(
        &self,
        actor: Actor,
        input: CreateInstitutionInput,
    ) -> Result<Institution, RegistryError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(RegistryError::MissingData);
        }
        let institution = self
            .repo
            .create(&NewInstitution {
                name: name.to_owned(),
                details: input.details,
                created_by: actor.user_id,
            })
            .await?;
        tracing::info!(
            institution_id = institution.id,
            created_by = actor.user_id,
            "institution created"
        );
        Ok(institution)
    }
}

// ── UpdateInstitution ────────────────────────────────────────────────────────

pub struct UpdateInstitutionUseCase<R: InstitutionRepository> {
    pub repo: R,
}

impl<R: InstitutionRepository> UpdateInstitutionUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        mut patch: InstitutionPatch,
    ) -> Result<Institution, RegistryError> {
        if patch.is_empty() {
            return Err(RegistryError::MissingData);
        }
        if let Some(name) = patch.name.take() {
            let name = name.trim();
            if name.is_empty() {
                return Err(RegistryError::MissingData);
            }
            patch.name = Some(name.to_owned());
        }
        self.repo
            .update(id, &patch)
            .await?
            .ok_or(RegistryError::InstitutionNotFound)
    }
}

// ── DeleteInstitution ────────────────────────────────────────────────────────

pub struct DeleteInstitutionUseCase<R: InstitutionRepository> {
    pub repo: R,
}

impl<R: InstitutionRepository> DeleteInstitutionUseCase<R> {
    /// Soft delete. The row and its children stay in storage.
    pub async fn execute(&self, actor: Actor, id: i32) -> Result<(), RegistryError> {
        if !self.repo.soft_delete(id).await? {
            return Err(RegistryError::InstitutionNotFound);
        }
        tracing::info!(institution_id = id, deleted_by = actor.user_id, "institution deleted");
        Ok(())
    }
}
