use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reports::Period).string_len(128))
                    .col(ColumnDef::new(Reports::Type).string_len(128))
                    .col(ColumnDef::new(Reports::Summary).text())
                    .col(ColumnDef::new(Reports::Description).text())
                    .col(ColumnDef::new(Reports::Content).blob())
                    .col(ColumnDef::new(Reports::InstitutionId).integer().not_null())
                    .col(
                        ColumnDef::new(Reports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Reports::DeletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Reports::CreatedBy).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reports::Table, Reports::InstitutionId)
                            .to(Institutions::Table, Institutions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reports::Table, Reports::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Reports::Table)
                    .col(Reports::InstitutionId)
                    .name("idx_reports_institution_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reports {
    Table,
    Id,
    Period,
    Type,
    Summary,
    Description,
    Content,
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
