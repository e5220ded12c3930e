use hsi_domain::permission::Permissions;

use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::types::Actor;
use crate::error::RegistryError;

/// Effective permissions of a role reference. No role, or a dangling one, grants nothing.
pub async fn permissions_of<R: RoleRepository>(
    roles: &R,
    role_id: Option<i32>,
) -> Result<Permissions, RegistryError> {
    let Some(role_id) = role_id else {
        return Ok(Permissions::NONE);
    };
    Ok(roles
        .find_by_id(role_id)
        .await?
        .map(|role| role.permissions)
        .unwrap_or(Permissions::NONE))
}

// ── Authorize ────────────────────────────────────────────────────────────────

pub struct AuthorizeUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> AuthorizeUseCase<U, R> {
    /// Resolve the caller and check it holds every bit in `required`.
    pub async fn execute(
        &self,
        user_id: i32,
        required: impl Into<Permissions>,
    ) -> Result<Actor, RegistryError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        let permissions = permissions_of(&self.roles, user.role_id).await?;
        let required = required.into();
        if !permissions.has(required) {
            tracing::debug!(user_id, ?required, ?permissions, "permission denied");
            return Err(RegistryError::Forbidden);
        }
        Ok(Actor {
            user_id,
            permissions,
        })
    }
}
