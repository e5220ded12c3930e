use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, Order, QueryFilter, QueryOrder, QuerySelect, Select, SqlErr,
    TransactionError, TransactionTrait,
    sea_query::{BinOper, Expr},
};

use hsi_core::sea_ext::ExcludeDeleted;
use hsi_domain::credential::PasswordCredential;
use hsi_domain::pagination::{PageRequest, Sort};
use hsi_domain::permission::Permissions;
use hsi_registry_schema::{institutions, key_metrics, other_details, reports, roles, users};

use crate::domain::repository::{
    InstitutionRepository, KeyMetricsRepository, OtherDetailRepository, ReportRepository,
    RoleRepository, UserRepository,
};
use crate::domain::types::{
    Governance, Institution, InstitutionDetails, InstitutionPatch, KeyMetrics, NewInstitution,
    NewKeyMetrics, NewOtherDetail, NewReport, NewRole, NewUser, OtherDetail, PermissionEdit, Ratios,
    Report, Role, User,
};
use crate::error::RegistryError;

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RegistryError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RegistryError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, RegistryError> {
        let model = users::ActiveModel {
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(Some(user.password.as_phc().to_owned())),
            role_id: Set(user.role_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RegistryError::UserAlreadyExists
            } else {
                anyhow::Error::new(e).context("create user").into()
            }
        })?;
        user_from_model(model)
    }

    async fn update_password(
        &self,
        id: i32,
        password: &PasswordCredential,
    ) -> Result<(), RegistryError> {
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::PasswordHash,
                Expr::value(password.as_phc().to_owned()),
            )
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update user password")?;
        if result.rows_affected == 0 {
            return Err(RegistryError::UserNotFound);
        }
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> Result<User, RegistryError> {
    let password = model
        .password_hash
        .map(PasswordCredential::from_phc)
        .transpose()
        .context("decode stored password hash")?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        password,
        role_id: model.role_id,
        created_at: model.created_at,
    })
}

// ── Role repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

impl RoleRepository for DbRoleRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, RegistryError> {
        let model = roles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find role by id")?;
        Ok(model.map(role_from_model))
    }

    async fn find_default(&self) -> Result<Option<Role>, RegistryError> {
        let model = roles::Entity::find()
            .filter(roles::Column::IsDefault.eq(true))
            .order_by_asc(roles::Column::Id)
            .one(&self.db)
            .await
            .context("find default role")?;
        Ok(model.map(role_from_model))
    }

    async fn list(&self) -> Result<Vec<Role>, RegistryError> {
        let models = roles::Entity::find()
            .order_by_asc(roles::Column::Id)
            .all(&self.db)
            .await
            .context("list roles")?;
        Ok(models.into_iter().map(role_from_model).collect())
    }

    async fn create(&self, role: &NewRole) -> Result<Role, RegistryError> {
        let role = role.clone();
        let model = self
            .db
            .transaction::<_, roles::Model, DbErr>(|txn| {
                Box::pin(async move {
                    if role.is_default {
                        roles::Entity::update_many()
                            .col_expr(roles::Column::IsDefault, Expr::value(false))
                            .filter(roles::Column::IsDefault.eq(true))
                            .exec(txn)
                            .await?;
                    }
                    roles::ActiveModel {
                        name: Set(role.name),
                        is_default: Set(role.is_default),
                        permissions: Set(role.permissions.bits()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Transaction(e) if is_unique_violation(&e) => {
                    RegistryError::RoleAlreadyExists
                }
                e => anyhow::Error::new(e).context("create role").into(),
            })?;
        Ok(role_from_model(model))
    }

    async fn edit_permissions(&self, id: i32, edit: PermissionEdit) -> Result<Role, RegistryError> {
        // One UPDATE derives the new mask from the stored one.
        let mask = if edit.reset {
            Expr::value(edit.apply(Permissions::NONE).bits())
        } else {
            Expr::col(roles::Column::Permissions)
                .binary(BinOper::BitOr, edit.add.bits())
                .binary(BinOper::BitAnd, !edit.remove.bits())
        };
        let model = self
            .db
            .transaction::<_, Option<roles::Model>, DbErr>(|txn| {
                Box::pin(async move {
                    let result = roles::Entity::update_many()
                        .col_expr(roles::Column::Permissions, mask)
                        .filter(roles::Column::Id.eq(id))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(None);
                    }
                    roles::Entity::find_by_id(id).one(txn).await
                })
            })
            .await
            .context("edit role permissions")?;
        model.map(role_from_model).ok_or(RegistryError::RoleNotFound)
    }

    async fn set_default(&self, id: i32) -> Result<bool, RegistryError> {
        let found = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    if roles::Entity::find_by_id(id).one(txn).await?.is_none() {
                        return Ok(false);
                    }
                    roles::Entity::update_many()
                        .col_expr(roles::Column::IsDefault, Expr::value(false))
                        .filter(roles::Column::Id.ne(id))
                        .exec(txn)
                        .await?;
                    roles::Entity::update_many()
                        .col_expr(roles::Column::IsDefault, Expr::value(true))
                        .filter(roles::Column::Id.eq(id))
                        .exec(txn)
                        .await?;
                    Ok(true)
                })
            })
            .await
            .context("set default role")?;
        Ok(found)
    }

    async fn insert_missing(&self, roles_to_seed: &[NewRole]) -> Result<u64, RegistryError> {
        let mut inserted = 0;
        for role in roles_to_seed {
            if self.find_by_name(&role.name).await?.is_some() {
                continue;
            }
            match self.create(role).await {
                Ok(_) => inserted += 1,
                // Another instance seeded the same name concurrently.
                Err(RegistryError::RoleAlreadyExists) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(inserted)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RegistryError> {
        let model = roles::Entity::find()
            .filter(roles::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find role by name")?;
        Ok(model.map(role_from_model))
    }
}

fn role_from_model(model: roles::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
        is_default: model.is_default,
        permissions: Permissions::new(Some(model.permissions)),
    }
}

// ── Institution repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInstitutionRepository {
    pub db: DatabaseConnection,
}

impl InstitutionRepository for DbInstitutionRepository {
    async fn list(&self, sort: Sort, page: PageRequest) -> Result<Vec<Institution>, RegistryError> {
        let order = match sort {
            Sort::Asc => Order::Asc,
            Sort::Desc => Order::Desc,
        };
        let models = institutions::Entity::find()
            .exclude_deleted()
            .order_by(institutions::Column::Name, order)
            .order_by_asc(institutions::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list institutions")?;
        Ok(models.into_iter().map(institution_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Institution>, RegistryError> {
        let model = institutions::Entity::find_by_id(id)
            .exclude_deleted()
            .one(&self.db)
            .await
            .context("find institution by id")?;
        Ok(model.map(institution_from_model))
    }

    async fn create(&self, institution: &NewInstitution) -> Result<Institution, RegistryError> {
        let details = &institution.details;
        let model = institutions::ActiveModel {
            name: Set(institution.name.clone()),
            address: Set(details.address.clone()),
            telephone_1: Set(details.telephone_1.clone()),
            telephone_2: Set(details.telephone_2.clone()),
            email: Set(details.email.clone()),
            headoffice: Set(details.headoffice.clone()),
            category: Set(details.category.clone()),
            about: Set(details.about.clone()),
            period_incorporated: Set(details.period_incorporated.clone()),
            created_at: Set(Utc::now()),
            deleted_at: Set(None),
            created_by: Set(Some(institution.created_by)),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create institution")?;
        Ok(institution_from_model(model))
    }

    async fn update(
        &self,
        id: i32,
        patch: &InstitutionPatch,
    ) -> Result<Option<Institution>, RegistryError> {
        let Some(model) = institutions::Entity::find_by_id(id)
            .exclude_deleted()
            .one(&self.db)
            .await
            .context("find institution for update")?
        else {
            return Ok(None);
        };

        let mut am: institutions::ActiveModel = model.into();
        if let Some(name) = &patch.name {
            am.name = Set(name.clone());
        }
        let d = &patch.details;
        if d.address.is_some() {
            am.address = Set(d.address.clone());
        }
        if d.telephone_1.is_some() {
            am.telephone_1 = Set(d.telephone_1.clone());
        }
        if d.telephone_2.is_some() {
            am.telephone_2 = Set(d.telephone_2.clone());
        }
        if d.email.is_some() {
            am.email = Set(d.email.clone());
        }
        if d.headoffice.is_some() {
            am.headoffice = Set(d.headoffice.clone());
        }
        if d.category.is_some() {
            am.category = Set(d.category.clone());
        }
        if d.about.is_some() {
            am.about = Set(d.about.clone());
        }
        if d.period_incorporated.is_some() {
            am.period_incorporated = Set(d.period_incorporated.clone());
        }
        let updated = am.update(&self.db).await.context("update institution")?;
        Ok(Some(institution_from_model(updated)))
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, RegistryError> {
        let result = institutions::Entity::update_many()
            .col_expr(institutions::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(institutions::Column::Id.eq(id))
            .filter(institutions::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .context("soft delete institution")?;
        Ok(result.rows_affected > 0)
    }
}

fn institution_from_model(model: institutions::Model) -> Institution {
    Institution {
        id: model.id,
        name: model.name,
        details: InstitutionDetails {
            address: model.address,
            telephone_1: model.telephone_1,
            telephone_2: model.telephone_2,
            email: model.email,
            headoffice: model.headoffice,
            category: model.category,
            about: model.about,
            period_incorporated: model.period_incorporated,
        },
        created_at: model.created_at,
        created_by: model.created_by,
    }
}

// ── Report repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReportRepository {
    pub db: DatabaseConnection,
}

/// Report columns without the document bytes, plus whether bytes are stored.
#[derive(Debug, FromQueryResult)]
struct ReportRow {
    id: i32,
    institution_id: i32,
    period: Option<String>,
    kind: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    has_content: bool,
    created_at: chrono::DateTime<Utc>,
    created_by: Option<i32>,
}

fn report_metadata() -> Select<reports::Entity> {
    reports::Entity::find()
        .select_only()
        .columns([
            reports::Column::Id,
            reports::Column::InstitutionId,
            reports::Column::Period,
            reports::Column::Summary,
            reports::Column::Description,
            reports::Column::CreatedAt,
            reports::Column::CreatedBy,
        ])
        .column_as(reports::Column::Kind, "kind")
        .column_as(Expr::col(reports::Column::Content).is_not_null(), "has_content")
        .exclude_deleted()
}

impl ReportRepository for DbReportRepository {
    async fn list(&self, institution_id: i32) -> Result<Vec<Report>, RegistryError> {
        let rows = report_metadata()
            .filter(reports::Column::InstitutionId.eq(institution_id))
            .order_by_desc(reports::Column::CreatedAt)
            .order_by_desc(reports::Column::Id)
            .into_model::<ReportRow>()
            .all(&self.db)
            .await
            .context("list reports")?;
        Ok(rows.into_iter().map(report_from_row).collect())
    }

    async fn find(&self, institution_id: i32, id: i32) -> Result<Option<Report>, RegistryError> {
        let row = report_metadata()
            .filter(reports::Column::Id.eq(id))
            .filter(reports::Column::InstitutionId.eq(institution_id))
            .into_model::<ReportRow>()
            .one(&self.db)
            .await
            .context("find report")?;
        Ok(row.map(report_from_row))
    }

    async fn find_content(
        &self,
        institution_id: i32,
        id: i32,
    ) -> Result<Option<Vec<u8>>, RegistryError> {
        let content: Option<Option<Vec<u8>>> = reports::Entity::find_by_id(id)
            .filter(reports::Column::InstitutionId.eq(institution_id))
            .exclude_deleted()
            .select_only()
            .column(reports::Column::Content)
            .into_tuple()
            .one(&self.db)
            .await
            .context("find report content")?;
        Ok(content.flatten())
    }

    async fn create(&self, report: &NewReport) -> Result<Report, RegistryError> {
        let model = reports::ActiveModel {
            period: Set(report.period.clone()),
            kind: Set(report.kind.clone()),
            summary: Set(report.summary.clone()),
            description: Set(report.description.clone()),
            content: Set(report.content.clone()),
            institution_id: Set(report.institution_id),
            created_at: Set(Utc::now()),
            deleted_at: Set(None),
            created_by: Set(Some(report.created_by)),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create report")?;
        Ok(Report {
            id: model.id,
            institution_id: model.institution_id,
            period: model.period,
            kind: model.kind,
            summary: model.summary,
            description: model.description,
            has_content: model.content.is_some(),
            created_at: model.created_at,
            created_by: model.created_by,
        })
    }

    async fn soft_delete(&self, institution_id: i32, id: i32) -> Result<bool, RegistryError> {
        let result = reports::Entity::update_many()
            .col_expr(reports::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(reports::Column::Id.eq(id))
            .filter(reports::Column::InstitutionId.eq(institution_id))
            .filter(reports::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .context("soft delete report")?;
        Ok(result.rows_affected > 0)
    }
}

fn report_from_row(row: ReportRow) -> Report {
    Report {
        id: row.id,
        institution_id: row.institution_id,
        period: row.period,
        kind: row.kind,
        summary: row.summary,
        description: row.description,
        has_content: row.has_content,
        created_at: row.created_at,
        created_by: row.created_by,
    }
}

// ── Key metrics repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbKeyMetricsRepository {
    pub db: DatabaseConnection,
}

impl KeyMetricsRepository for DbKeyMetricsRepository {
    async fn list(&self, institution_id: i32) -> Result<Vec<KeyMetrics>, RegistryError> {
        let models = key_metrics::Entity::find()
            .filter(key_metrics::Column::InstitutionId.eq(institution_id))
            .exclude_deleted()
            .order_by_desc(key_metrics::Column::CreatedAt)
            .order_by_desc(key_metrics::Column::Id)
            .all(&self.db)
            .await
            .context("list key metrics")?;
        Ok(models.into_iter().map(key_metrics_from_model).collect())
    }

    async fn find(
        &self,
        institution_id: i32,
        id: i32,
    ) -> Result<Option<KeyMetrics>, RegistryError> {
        let model = key_metrics::Entity::find_by_id(id)
            .filter(key_metrics::Column::InstitutionId.eq(institution_id))
            .exclude_deleted()
            .one(&self.db)
            .await
            .context("find key metrics")?;
        Ok(model.map(key_metrics_from_model))
    }

    async fn create(&self, metrics: &NewKeyMetrics) -> Result<KeyMetrics, RegistryError> {
        let ratios = metrics.ratios;
        let model = key_metrics::ActiveModel {
            capital_adequacy: Set(ratios.capital_adequacy),
            owners_equity: Set(ratios.owners_equity),
            total_liability: Set(ratios.total_liability),
            nonperforming_loans_ratio: Set(ratios.nonperforming_loans_ratio),
            period: Set(metrics.period.clone()),
            institution_id: Set(metrics.institution_id),
            created_at: Set(Utc::now()),
            deleted_at: Set(None),
            created_by: Set(Some(metrics.created_by)),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create key metrics")?;
        Ok(key_metrics_from_model(model))
    }

    async fn soft_delete(&self, institution_id: i32, id: i32) -> Result<bool, RegistryError> {
        let result = key_metrics::Entity::update_many()
            .col_expr(key_metrics::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(key_metrics::Column::Id.eq(id))
            .filter(key_metrics::Column::InstitutionId.eq(institution_id))
            .filter(key_metrics::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .context("soft delete key metrics")?;
        Ok(result.rows_affected > 0)
    }
}

fn key_metrics_from_model(model: key_metrics::Model) -> KeyMetrics {
    KeyMetrics {
        id: model.id,
        institution_id: model.institution_id,
        ratios: Ratios {
            capital_adequacy: model.capital_adequacy,
            owners_equity: model.owners_equity,
            total_liability: model.total_liability,
            nonperforming_loans_ratio: model.nonperforming_loans_ratio,
        },
        period: model.period,
        created_at: model.created_at,
        created_by: model.created_by,
    }
}

// ── Other detail repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtherDetailRepository {
    pub db: DatabaseConnection,
}

impl OtherDetailRepository for DbOtherDetailRepository {
    async fn list(&self, institution_id: i32) -> Result<Vec<OtherDetail>, RegistryError> {
        let models = other_details::Entity::find()
            .filter(other_details::Column::InstitutionId.eq(institution_id))
            .exclude_deleted()
            .order_by_desc(other_details::Column::CreatedAt)
            .order_by_desc(other_details::Column::Id)
            .all(&self.db)
            .await
            .context("list other details")?;
        Ok(models.into_iter().map(other_detail_from_model).collect())
    }

    async fn find(
        &self,
        institution_id: i32,
        id: i32,
    ) -> Result<Option<OtherDetail>, RegistryError> {
        let model = other_details::Entity::find_by_id(id)
            .filter(other_details::Column::InstitutionId.eq(institution_id))
            .exclude_deleted()
            .one(&self.db)
            .await
            .context("find other detail")?;
        Ok(model.map(other_detail_from_model))
    }

    async fn create(&self, detail: &NewOtherDetail) -> Result<OtherDetail, RegistryError> {
        let governance = &detail.governance;
        let model = other_details::ActiveModel {
            directors: Set(governance.directors.clone()),
            board_members: Set(governance.board_members.clone()),
            managing_director: Set(governance.managing_director.clone()),
            board_chairman: Set(governance.board_chairman.clone()),
            period: Set(detail.period.clone()),
            institution_id: Set(detail.institution_id),
            created_at: Set(Utc::now()),
            deleted_at: Set(None),
            created_by: Set(Some(detail.created_by)),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create other detail")?;
        Ok(other_detail_from_model(model))
    }

    async fn soft_delete(&self, institution_id: i32, id: i32) -> Result<bool, RegistryError> {
        let result = other_details::Entity::update_many()
            .col_expr(other_details::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(other_details::Column::Id.eq(id))
            .filter(other_details::Column::InstitutionId.eq(institution_id))
            .filter(other_details::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .context("soft delete other detail")?;
        Ok(result.rows_affected > 0)
    }
}

fn other_detail_from_model(model: other_details::Model) -> OtherDetail {
    OtherDetail {
        id: model.id,
        institution_id: model.institution_id,
        governance: Governance {
            directors: model.directors,
            board_members: model.board_members,
            managing_director: model.managing_director,
            board_chairman: model.board_chairman,
        },
        period: model.period,
        created_at: model.created_at,
        created_by: model.created_by,
    }
}
