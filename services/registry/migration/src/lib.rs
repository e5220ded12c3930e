use sea_orm_migration::prelude::*;

mod m20240101_000001_create_roles;
mod m20240101_000002_create_users;
mod m20240101_000003_create_institutions;
mod m20240101_000004_create_reports;
mod m20240101_000005_create_key_metrics;
mod m20240101_000006_create_other_details;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_roles::Migration),
            Box::new(m20240101_000002_create_users::Migration),
            Box::new(m20240101_000003_create_institutions::Migration),
            Box::new(m20240101_000004_create_reports::Migration),
            Box::new(m20240101_000005_create_key_metrics::Migration),
            Box::new(m20240101_000006_create_other_details::Migration),
        ]
    }
}
