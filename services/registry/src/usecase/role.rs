use hsi_domain::permission::Permissions;

use crate::domain::repository::RoleRepository;
use crate::domain::types::{DEFAULT_ROLE_NAME, NewRole, PermissionEdit, Role, standard_roles};
use crate::error::RegistryError;

// ── ListRoles ────────────────────────────────────────────────────────────────

pub struct ListRolesUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> ListRolesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Role>, RegistryError> {
        self.repo.list().await
    }
}

// ── CreateRole ───────────────────────────────────────────────────────────────

pub struct CreateRoleInput {
    pub name: String,
    pub permissions: Permissions,
    pub is_default: bool,
}

pub struct CreateRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> CreateRoleUseCase<R> {
    pub async fn execute(&self, input: CreateRoleInput) -> Result<Role, RegistryError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(RegistryError::MissingData);
        }
        let role = self
            .repo
            .create(&NewRole {
                name: name.to_owned(),
                permissions: input.permissions,
                is_default: input.is_default,
            })
            .await?;
        tracing::info!(role_id = role.id, name = %role.name, "role created");
        Ok(role)
    }
}

// ── UpdateRolePermissions ────────────────────────────────────────────────────

pub struct UpdateRolePermissionsUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> UpdateRolePermissionsUseCase<R> {
    pub async fn execute(&self, role_id: i32, edit: PermissionEdit) -> Result<Role, RegistryError> {
        if edit.is_empty() {
            return Err(RegistryError::MissingData);
        }
        let role = self.repo.edit_permissions(role_id, edit).await?;
        tracing::info!(role_id, permissions = ?role.permissions, "role permissions edited");
        Ok(role)
    }
}

// ── SetDefaultRole ───────────────────────────────────────────────────────────

pub struct SetDefaultRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> SetDefaultRoleUseCase<R> {
    pub async fn execute(&self, role_id: i32) -> Result<(), RegistryError> {
        if !self.repo.set_default(role_id).await? {
            return Err(RegistryError::RoleNotFound);
        }
        tracing::info!(role_id, "default role changed");
        Ok(())
    }
}

// ── SeedRoles ────────────────────────────────────────────────────────────────

pub struct SeedRolesUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> SeedRolesUseCase<R> {
    /// Install the standard roles. Safe to run on every startup: roles that already
    /// exist keep their permissions, and an existing default is not moved.
    pub async fn execute(&self) -> Result<u64, RegistryError> {
        let inserted = self.repo.insert_missing(&standard_roles()).await?;
        if self.repo.find_default().await?.is_none() {
            if let Some(role) = self.repo.find_by_name(DEFAULT_ROLE_NAME).await? {
                self.repo.set_default(role.id).await?;
            }
        }
        tracing::info!(inserted, "standard roles seeded");
        Ok(inserted)
    }
}
