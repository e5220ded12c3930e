use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OtherDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OtherDetails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OtherDetails::Directors).string_len(256))
                    .col(ColumnDef::new(OtherDetails::BoardMembers).string_len(256))
                    .col(ColumnDef::new(OtherDetails::ManagingDirector).string_len(256))
                    .col(ColumnDef::new(OtherDetails::BoardChairman).string_len(256))
                    .col(ColumnDef::new(OtherDetails::Period).string_len(128))
                    .col(
                        ColumnDef::new(OtherDetails::InstitutionId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OtherDetails::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(OtherDetails::DeletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(OtherDetails::CreatedBy).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(OtherDetails::Table, OtherDetails::InstitutionId)
                            .to(Institutions::Table, Institutions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OtherDetails::Table, OtherDetails::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(OtherDetails::Table)
                    .col(OtherDetails::InstitutionId)
                    .name("idx_other_details_institution_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OtherDetails::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OtherDetails {
    Table,
    Id,
    Directors,
    BoardMembers,
    ManagingDirector,
    BoardChairman,
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
