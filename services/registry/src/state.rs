use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbInstitutionRepository, DbKeyMetricsRepository, DbOtherDetailRepository, DbReportRepository,
    DbRoleRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn role_repo(&self) -> DbRoleRepository {
        DbRoleRepository {
            db: self.db.clone(),
        }
    }

    pub fn institution_repo(&self) -> DbInstitutionRepository {
        DbInstitutionRepository {
            db: self.db.clone(),
        }
    }

    pub fn report_repo(&self) -> DbReportRepository {
        DbReportRepository {
            db: self.db.clone(),
        }
    }

    pub fn key_metrics_repo(&self) -> DbKeyMetricsRepository {
        DbKeyMetricsRepository {
            db: self.db.clone(),
        }
    }

    pub fn other_detail_repo(&self) -> DbOtherDetailRepository {
        DbOtherDetailRepository {
            db: self.db.clone(),
        }
    }
}
