use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KeyMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(KeyMetrics::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(KeyMetrics::CapitalAdequacy).integer())
                    .col(ColumnDef::new(KeyMetrics::OwnersEquity).integer())
                    .col(ColumnDef::new(KeyMetrics::TotalLiability).integer())
                    .col(ColumnDef::new(KeyMetrics::NonperformingLoansRatio).integer())
                    .col(ColumnDef::new(KeyMetrics::Period).string_len(128))
                    .col(ColumnDef::new(KeyMetrics::InstitutionId).integer().not_null())
                    .col(
                        ColumnDef::new(KeyMetrics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(KeyMetrics::DeletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(KeyMetrics::CreatedBy).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(KeyMetrics::Table, KeyMetrics::InstitutionId)
                            .to(Institutions::Table, Institutions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(KeyMetrics::Table, KeyMetrics::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(KeyMetrics::Table)
                    .col(KeyMetrics::InstitutionId)
                    .name("idx_key_metrics_institution_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(KeyMetrics::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum KeyMetrics {
    Table,
    Id,
    CapitalAdequacy,
    OwnersEquity,
    TotalLiability,
    NonperformingLoansRatio,
    Period,
    InstitutionId,
    CreatedAt,
    DeletedAt,
    CreatedBy,
}

#[derive(Iden)]
enum Institutions {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
