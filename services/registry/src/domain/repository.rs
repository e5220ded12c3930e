#![allow(async_fn_in_trait)]

use hsi_domain::credential::PasswordCredential;
use hsi_domain::pagination::{PageRequest, Sort};

use crate::domain::types::{
    Institution, InstitutionPatch, KeyMetrics, NewInstitution, NewKeyMetrics, NewOtherDetail,
    NewReport, NewRole, NewUser, OtherDetail, PermissionEdit, Report, Role, User,
};
use crate::error::RegistryError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RegistryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RegistryError>;

    /// Insert a user. Fails with `UserAlreadyExists` on a duplicate email.
    async fn create(&self, user: &NewUser) -> Result<User, RegistryError>;

    async fn update_password(
        &self,
        id: i32,
        password: &PasswordCredential,
    ) -> Result<(), RegistryError>;
}

/// Repository for roles and their permission masks.
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, RegistryError>;
    async fn find_default(&self) -> Result<Option<Role>, RegistryError>;
    async fn list(&self) -> Result<Vec<Role>, RegistryError>;

    /// Insert a role. With `is_default` set, the flag is cleared on every other role
    /// in the same transaction. Fails with `RoleAlreadyExists` on a duplicate name.
    async fn create(&self, role: &NewRole) -> Result<Role, RegistryError>;

    /// Apply `edit` to the stored mask atomically and return the updated role.
    /// Concurrent edits on the same role compose rather than overwrite each other.
    async fn edit_permissions(&self, id: i32, edit: PermissionEdit) -> Result<Role, RegistryError>;

    /// Make `id` the only default role. Returns `false` if no such role exists.
    async fn set_default(&self, id: i32) -> Result<bool, RegistryError>;

    /// Insert every role whose name is not taken yet. Existing roles are left untouched.
    /// Returns the number of roles inserted.
    async fn insert_missing(&self, roles: &[NewRole]) -> Result<u64, RegistryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RegistryError>;
}

/// Repository for institutions. Reads never return soft-deleted rows.
pub trait InstitutionRepository: Send + Sync {
    async fn list(&self, sort: Sort, page: PageRequest) -> Result<Vec<Institution>, RegistryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Institution>, RegistryError>;
    async fn create(&self, institution: &NewInstitution) -> Result<Institution, RegistryError>;

    /// Apply a patch to a live institution. Returns `None` if it does not exist.
    async fn update(
        &self,
        id: i32,
        patch: &InstitutionPatch,
    ) -> Result<Option<Institution>, RegistryError>;

    /// Stamp `deleted_at`. Returns `true` if a live row was marked.
    async fn soft_delete(&self, id: i32) -> Result<bool, RegistryError>;
}

/// Repository for institution reports. Reads never return soft-deleted rows, and
/// only `find_content` loads the document bytes.
pub trait ReportRepository: Send + Sync {
    async fn list(&self, institution_id: i32) -> Result<Vec<Report>, RegistryError>;
    async fn find(&self, institution_id: i32, id: i32) -> Result<Option<Report>, RegistryError>;

    /// Load the document bytes. `None` when the report is missing or has no content.
    async fn find_content(
        &self,
        institution_id: i32,
        id: i32,
    ) -> Result<Option<Vec<u8>>, RegistryError>;

    async fn create(&self, report: &NewReport) -> Result<Report, RegistryError>;
    async fn soft_delete(&self, institution_id: i32, id: i32) -> Result<bool, RegistryError>;
}

/// Repository for key-metrics snapshots. Reads never return soft-deleted rows.
pub trait KeyMetricsRepository: Send + Sync {
    async fn list(&self, institution_id: i32) -> Result<Vec<KeyMetrics>, RegistryError>;
    async fn find(
        &self,
        institution_id: i32,
        id: i32,
    ) -> Result<Option<KeyMetrics>, RegistryError>;
    async fn create(&self, metrics: &NewKeyMetrics) -> Result<KeyMetrics, RegistryError>;
    async fn soft_delete(&self, institution_id: i32, id: i32) -> Result<bool, RegistryError>;
}

/// Repository for governance snapshots. Reads never return soft-deleted rows.
pub trait OtherDetailRepository: Send + Sync {
    async fn list(&self, institution_id: i32) -> Result<Vec<OtherDetail>, RegistryError>;
    async fn find(
        &self,
        institution_id: i32,
        id: i32,
    ) -> Result<Option<OtherDetail>, RegistryError>;
    async fn create(&self, detail: &NewOtherDetail) -> Result<OtherDetail, RegistryError>;
    async fn soft_delete(&self, institution_id: i32, id: i32) -> Result<bool, RegistryError>;
}
