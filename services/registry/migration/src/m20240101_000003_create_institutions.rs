use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Institutions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Institutions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Institutions::Name)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Institutions::Address).string_len(128))
                    .col(ColumnDef::new(Institutions::Telephone1).string_len(128))
                    .col(ColumnDef::new(Institutions::Telephone2).string_len(128))
                    .col(ColumnDef::new(Institutions::Email).string_len(128))
                    .col(ColumnDef::new(Institutions::Headoffice).string_len(128))
                    .col(ColumnDef::new(Institutions::Category).string_len(128))
                    .col(ColumnDef::new(Institutions::About).text())
                    .col(ColumnDef::new(Institutions::PeriodIncorporated).string_len(128))
                    .col(
                        ColumnDef::new(Institutions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Institutions::DeletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Institutions::CreatedBy).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Institutions::Table, Institutions::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Institutions::Table)
                    .col(Institutions::Name)
                    .name("idx_institutions_name")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Institutions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Institutions {
    Table,
    Id,
    Name,
    Address,
    #[iden = "telephone_1"]
    Telephone1,
    #[iden = "telephone_2"]
    Telephone2,
    Email,
    Headoffice,
    Category,
    About,
    PeriodIncorporated,
    CreatedAt,
    DeletedAt,
    CreatedBy,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
