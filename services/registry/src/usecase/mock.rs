//! In-memory repositories for use-case tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

use hsi_domain::credential::PasswordCredential;
use hsi_domain::pagination::{PageRequest, Sort};
use hsi_domain::permission::Permissions;

use crate::domain::repository::{
    InstitutionRepository, KeyMetricsRepository, OtherDetailRepository, ReportRepository,
    RoleRepository, UserRepository,
};
use crate::domain::types::{
    Institution, InstitutionPatch, KeyMetrics, NewInstitution, NewKeyMetrics, NewOtherDetail,
    NewReport, NewRole, NewUser, OtherDetail, PermissionEdit, Report, Role, User,
};
use crate::error::RegistryError;

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockUserRepo {
    pub users: Mutex<Vec<User>>,
}

impl MockUserRepo {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RegistryError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RegistryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, RegistryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RegistryError::UserAlreadyExists);
        }
        let created = User {
            id: users.len() as i32 + 1,
            name: user.name.clone(),
            email: user.email.clone(),
            password: Some(user.password.clone()),
            role_id: user.role_id,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update_password(
        &self,
        id: i32,
        password: &PasswordCredential,
    ) -> Result<(), RegistryError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RegistryError::UserNotFound)?;
        user.password = Some(password.clone());
        Ok(())
    }
}

pub fn user(id: i32, role_id: Option<i32>) -> User {
    User {
        id,
        name: format!("user{id}"),
        email: format!("user{id}@example.com"),
        password: None,
        role_id,
        created_at: Utc::now(),
    }
}

// ── Roles ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockRoleRepo {
    pub roles: Mutex<Vec<Role>>,
}

impl MockRoleRepo {
    pub fn with(roles: Vec<Role>) -> Self {
        Self {
            roles: Mutex::new(roles),
        }
    }

    pub fn snapshot(&self) -> Vec<Role> {
        self.roles.lock().unwrap().clone()
    }
}

impl RoleRepository for MockRoleRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, RegistryError> {
        Ok(self.roles.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_default(&self) -> Result<Option<Role>, RegistryError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.is_default)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Role>, RegistryError> {
        Ok(self.snapshot())
    }

    async fn create(&self, role: &NewRole) -> Result<Role, RegistryError> {
        let mut roles = self.roles.lock().unwrap();
        if roles.iter().any(|r| r.name == role.name) {
            return Err(RegistryError::RoleAlreadyExists);
        }
        if role.is_default {
            for existing in roles.iter_mut() {
                existing.is_default = false;
            }
        }
        let created = Role {
            id: roles.len() as i32 + 1,
            name: role.name.clone(),
            is_default: role.is_default,
            permissions: role.permissions,
        };
        roles.push(created.clone());
        Ok(created)
    }

    async fn edit_permissions(&self, id: i32, edit: PermissionEdit) -> Result<Role, RegistryError> {
        let mut roles = self.roles.lock().unwrap();
        let role = roles
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RegistryError::RoleNotFound)?;
        role.permissions = edit.apply(role.permissions);
        Ok(role.clone())
    }

    async fn set_default(&self, id: i32) -> Result<bool, RegistryError> {
        let mut roles = self.roles.lock().unwrap();
        if !roles.iter().any(|r| r.id == id) {
            return Ok(false);
        }
        for role in roles.iter_mut() {
            role.is_default = role.id == id;
        }
        Ok(true)
    }

    async fn insert_missing(&self, to_seed: &[NewRole]) -> Result<u64, RegistryError> {
        let mut inserted = 0;
        for role in to_seed {
            if self.find_by_name(&role.name).await?.is_none() {
                self.create(role).await?;
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RegistryError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.name == name)
            .cloned())
    }
}

pub fn role(id: i32, name: &str, permissions: Permissions, is_default: bool) -> Role {
    Role {
        id,
        name: name.to_owned(),
        is_default,
        permissions,
    }
}

// ── Institutions ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockInstitutionRepo {
    pub rows: Mutex<Vec<(Institution, bool)>>,
}

impl MockInstitutionRepo {
    pub fn with(institutions: Vec<Institution>) -> Self {
        Self {
            rows: Mutex::new(institutions.into_iter().map(|i| (i, false)).collect()),
        }
    }
}

impl InstitutionRepository for MockInstitutionRepo {
    async fn list(&self, sort: Sort, page: PageRequest) -> Result<Vec<Institution>, RegistryError> {
        let mut live: Vec<Institution> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, deleted)| !deleted)
            .map(|(i, _)| i.clone())
            .collect();
        live.sort_by(|a, b| a.name.cmp(&b.name));
        if sort == Sort::Desc {
            live.reverse();
        }
        Ok(live
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Institution>, RegistryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(i, deleted)| i.id == id && !deleted)
            .map(|(i, _)| i.clone()))
    }

    async fn create(&self, new: &NewInstitution) -> Result<Institution, RegistryError> {
        let mut rows = self.rows.lock().unwrap();
        let created = Institution {
            id: rows.len() as i32 + 1,
            name: new.name.clone(),
            details: new.details.clone(),
            created_at: Utc::now(),
            created_by: Some(new.created_by),
        };
        rows.push((created.clone(), false));
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        patch: &InstitutionPatch,
    ) -> Result<Option<Institution>, RegistryError> {
        let mut rows = self.rows.lock().unwrap();
        let Some((institution, _)) = rows.iter_mut().find(|(i, deleted)| i.id == id && !deleted)
        else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            institution.name = name.clone();
        }
        if patch.details.category.is_some() {
            institution.details.category = patch.details.category.clone();
        }
        if patch.details.address.is_some() {
            institution.details.address = patch.details.address.clone();
        }
        Ok(Some(institution.clone()))
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, RegistryError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|(i, deleted)| i.id == id && !deleted) {
            Some(row) => {
                row.1 = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub fn institution(id: i32, name: &str) -> Institution {
    Institution {
        id,
        name: name.to_owned(),
        details: Default::default(),
        created_at: Utc::now(),
        created_by: Some(1),
    }
}

// ── Institution-owned records ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockReportRepo {
    pub rows: Mutex<Vec<(Report, bool)>>,
    pub contents: Mutex<HashMap<i32, Vec<u8>>>,
}

impl ReportRepository for MockReportRepo {
    async fn list(&self, institution_id: i32) -> Result<Vec<Report>, RegistryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, deleted)| r.institution_id == institution_id && !deleted)
            .map(|(r, _)| r.clone())
            .collect())
    }

    async fn find(&self, institution_id: i32, id: i32) -> Result<Option<Report>, RegistryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(r, deleted)| r.institution_id == institution_id && r.id == id && !deleted)
            .map(|(r, _)| r.clone()))
    }

    async fn find_content(
        &self,
        institution_id: i32,
        id: i32,
    ) -> Result<Option<Vec<u8>>, RegistryError> {
        if self.find(institution_id, id).await?.is_none() {
            return Ok(None);
        }
        Ok(self.contents.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, new: &NewReport) -> Result<Report, RegistryError> {
        let mut rows = self.rows.lock().unwrap();
        let created = Report {
            id: rows.len() as i32 + 1,
            institution_id: new.institution_id,
            period: new.period.clone(),
            kind: new.kind.clone(),
            summary: new.summary.clone(),
            description: new.description.clone(),
            has_content: new.content.is_some(),
            created_at: Utc::now(),
            created_by: Some(new.created_by),
        };
        if let Some(content) = &new.content {
            self.contents
                .lock()
                .unwrap()
                .insert(created.id, content.clone());
        }
        rows.push((created.clone(), false));
        Ok(created)
    }

    async fn soft_delete(&self, institution_id: i32, id: i32) -> Result<bool, RegistryError> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|(r, deleted)| r.institution_id == institution_id && r.id == id && !deleted)
        {
            Some(row) => {
                row.1 = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MockKeyMetricsRepo {
    pub rows: Mutex<Vec<(KeyMetrics, bool)>>,
}

impl KeyMetricsRepository for MockKeyMetricsRepo {
    async fn list(&self, institution_id: i32) -> Result<Vec<KeyMetrics>, RegistryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, deleted)| m.institution_id == institution_id && !deleted)
            .map(|(m, _)| m.clone())
            .collect())
    }

    async fn find(
        &self,
        institution_id: i32,
        id: i32,
    ) -> Result<Option<KeyMetrics>, RegistryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(m, deleted)| m.institution_id == institution_id && m.id == id && !deleted)
            .map(|(m, _)| m.clone()))
    }

    async fn create(&self, new: &NewKeyMetrics) -> Result<KeyMetrics, RegistryError> {
        let mut rows = self.rows.lock().unwrap();
        let created = KeyMetrics {
            id: rows.len() as i32 + 1,
            institution_id: new.institution_id,
            ratios: new.ratios,
            period: new.period.clone(),
            created_at: Utc::now(),
            created_by: Some(new.created_by),
        };
        rows.push((created.clone(), false));
        Ok(created)
    }

    async fn soft_delete(&self, institution_id: i32, id: i32) -> Result<bool, RegistryError> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|(m, deleted)| m.institution_id == institution_id && m.id == id && !deleted)
        {
            Some(row) => {
                row.1 = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MockOtherDetailRepo {
    pub rows: Mutex<Vec<(OtherDetail, bool)>>,
}

impl OtherDetailRepository for MockOtherDetailRepo {
    async fn list(&self, institution_id: i32) -> Result<Vec<OtherDetail>, RegistryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(d, deleted)| d.institution_id == institution_id && !deleted)
            .map(|(d, _)| d.clone())
            .collect())
    }

    async fn find(
        &self,
        institution_id: i32,
        id: i32,
    ) -> Result<Option<OtherDetail>, RegistryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(d, deleted)| d.institution_id == institution_id && d.id == id && !deleted)
            .map(|(d, _)| d.clone()))
    }

    async fn create(&self, new: &NewOtherDetail) -> Result<OtherDetail, RegistryError> {
        let mut rows = self.rows.lock().unwrap();
        let created = OtherDetail {
            id: rows.len() as i32 + 1,
            institution_id: new.institution_id,
            governance: new.governance.clone(),
            period: new.period.clone(),
            created_at: Utc::now(),
            created_by: Some(new.created_by),
        };
        rows.push((created.clone(), false));
        Ok(created)
    }

    async fn soft_delete(&self, institution_id: i32, id: i32) -> Result<bool, RegistryError> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|(d, deleted)| d.institution_id == institution_id && d.id == id && !deleted)
        {
            Some(row) => {
                row.1 = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
