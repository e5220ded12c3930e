use hsi_domain::credential::PasswordCredential;
use hsi_domain::permission::Permissions;

use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::types::{NewUser, Role, User};
use crate::error::RegistryError;
use crate::usecase::authorize::permissions_of;

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUserUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> RegisterUserUseCase<U, R> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, RegistryError> {
        let name = input.name.trim();
        let email = input.email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(RegistryError::MissingData);
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(RegistryError::UserAlreadyExists);
        }
        let password = PasswordCredential::hash(&input.password)?;

        let role_id = match self.roles.find_default().await? {
            Some(role) => Some(role.id),
            None => {
                tracing::warn!(email, "no default role configured; registering without a role");
                None
            }
        };

        let user = self
            .users
            .create(&NewUser {
                name: name.to_owned(),
                email: email.to_owned(),
                password,
                role_id,
            })
            .await?;
        tracing::info!(user_id = user.id, ?role_id, "user registered");
        Ok(user)
    }
}

// ── Authenticate ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct AuthenticateOutput {
    pub user: User,
    pub permissions: Permissions,
}

pub struct AuthenticateUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> AuthenticateUseCase<U, R> {
    /// Unknown email and wrong password fail with the same error.
    pub async fn execute(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticateOutput, RegistryError> {
        let user = self.users.find_by_email(email.trim()).await?;
        // Unknown accounts still pay for one Argon2 verification.
        let verified = match &user {
            Some(user) if user.password.is_some() => user.verify_password(password),
            _ => PasswordCredential::verify_missing(password),
        };
        let Some(user) = user.filter(|_| verified) else {
            return Err(RegistryError::InvalidCredentials);
        };
        let permissions = permissions_of(&self.roles, user.role_id).await?;
        Ok(AuthenticateOutput { user, permissions })
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct UserProfile {
    pub user: User,
    pub role: Option<Role>,
}

pub struct GetProfileUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> GetProfileUseCase<U, R> {
    pub async fn execute(&self, user_id: i32) -> Result<UserProfile, RegistryError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(RegistryError::UserNotFound)?;
        let role = match user.role_id {
            Some(role_id) => self.roles.find_by_id(role_id).await?,
            None => None,
        };
        Ok(UserProfile { user, role })
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U: UserRepository> {
    pub repo: U,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: i32,
        input: ChangePasswordInput,
    ) -> Result<(), RegistryError> {
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(RegistryError::UserNotFound)?;
        // Accounts created without a credential may set one without proof.
        if user.password.is_some() && !user.verify_password(&input.current_password) {
            return Err(RegistryError::InvalidCredentials);
        }
        user.set_password(&input.new_password)?;
        if let Some(credential) = &user.password {
            self.repo.update_password(user.id, credential).await?;
        }
        Ok(())
    }
}
