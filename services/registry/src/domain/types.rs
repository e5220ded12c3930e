use chrono::{DateTime, Utc};

use hsi_domain::credential::{CredentialError, PasswordCredential};
use hsi_domain::permission::{Permission, Permissions};

/// Registered account.
///
/// The password is held only as a [`PasswordCredential`]; there is no accessor
/// that yields the plaintext.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: Option<PasswordCredential>,
    pub role_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Replace the stored credential with a fresh salted hash of `password`.
    /// Only the in-memory value changes; persisting it is the caller's job.
    pub fn set_password(&mut self, password: &str) -> Result<(), CredentialError> {
        self.password = Some(PasswordCredential::hash(password)?);
        Ok(())
    }

    /// False on mismatch and when no credential has been set.
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password
            .as_ref()
            .is_some_and(|credential| credential.verify(candidate))
    }
}

/// Fields for inserting a user; the id and `created_at` are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: PasswordCredential,
    pub role_id: Option<i32>,
}

/// Named permission bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub is_default: bool,
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRole {
    pub name: String,
    pub permissions: Permissions,
    /// Insert as the only default role.
    pub is_default: bool,
}

/// Permission change applied in order: reset, then add, then remove.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionEdit {
    pub reset: bool,
    pub add: Permissions,
    pub remove: Permissions,
}

impl PermissionEdit {
    pub fn is_empty(&self) -> bool {
        !self.reset && self.add.is_empty() && self.remove.is_empty()
    }

    pub fn apply(&self, mut permissions: Permissions) -> Permissions {
        if self.reset {
            permissions.reset();
        }
        permissions.add(self.add);
        permissions.remove(self.remove);
        permissions
    }
}

/// Roles installed by seeding. `User` becomes the default when none is set.
pub fn standard_roles() -> Vec<NewRole> {
    vec![
        NewRole {
            name: DEFAULT_ROLE_NAME.to_owned(),
            permissions: Permission::ViewInstitution.into(),
            is_default: false,
        },
        NewRole {
            name: "Editor".to_owned(),
            permissions: Permission::ViewInstitution
                | Permission::AddInstitution
                | Permission::UpdateInstitution
                | Permission::PublishBlog,
            is_default: false,
        },
        NewRole {
            name: "Administrator".to_owned(),
            permissions: Permissions::all(),
            is_default: false,
        },
    ]
}

pub const DEFAULT_ROLE_NAME: &str = "User";

/// Authenticated caller with its effective permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub permissions: Permissions,
}

/// Optional descriptive fields of an institution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstitutionDetails {
    pub address: Option<String>,
    pub telephone_1: Option<String>,
    pub telephone_2: Option<String>,
    pub email: Option<String>,
    pub headoffice: Option<String>,
    pub category: Option<String>,
    pub about: Option<String>,
    pub period_incorporated: Option<String>,
}

impl InstitutionDetails {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A tracked financial institution that has not been soft-deleted.
#[derive(Debug, Clone)]
pub struct Institution {
    pub id: i32,
    pub name: String,
    pub details: InstitutionDetails,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewInstitution {
    pub name: String,
    pub details: InstitutionDetails,
    pub created_by: i32,
}

/// Partial update: `Some` fields overwrite, `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct InstitutionPatch {
    pub name: Option<String>,
    pub details: InstitutionDetails,
}

impl InstitutionPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.details.is_empty()
    }
}

/// Report metadata; the document bytes are loaded separately.
#[derive(Debug, Clone)]
pub struct Report {
    pub id: i32,
    pub institution_id: i32,
    pub period: Option<String>,
    pub kind: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub has_content: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub institution_id: i32,
    pub period: Option<String>,
    pub kind: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub content: Option<Vec<u8>>,
    pub created_by: i32,
}

/// Figures of one key-metrics snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ratios {
    pub capital_adequacy: Option<i32>,
    pub owners_equity: Option<i32>,
    pub total_liability: Option<i32>,
    pub nonperforming_loans_ratio: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct KeyMetrics {
    pub id: i32,
    pub institution_id: i32,
    pub ratios: Ratios,
    pub period: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewKeyMetrics {
    pub institution_id: i32,
    pub ratios: Ratios,
    pub period: Option<String>,
    pub created_by: i32,
}

/// Governance figures of one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Governance {
    pub directors: Option<String>,
    pub board_members: Option<String>,
    pub managing_director: Option<String>,
    pub board_chairman: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OtherDetail {
    pub id: i32,
    pub institution_id: i32,
    pub governance: Governance,
    pub period: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewOtherDetail {
    pub institution_id: i32,
    pub governance: Governance,
    pub period: Option<String>,
    pub created_by: i32,
}
