use sea_orm::entity::prelude::*;

use hsi_core::sea_ext::SoftDelete;

/// Periodic governance snapshot of an institution.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "other_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub directors: Option<String>,
    pub board_members: Option<String>,
    pub managing_director: Option<String>,
    pub board_chairman: Option<String>,
    pub period: Option<String>,
    pub institution_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::institutions::Entity",
        from = "Column::InstitutionId",
        to = "super::institutions::Column::Id"
    )]
    Institution,
}

impl Related<super::institutions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Institution.def()
    }
}

impl SoftDelete for Entity {
    fn deleted_at_column() -> Column {
        Column::DeletedAt
    }
}

impl ActiveModelBehavior for ActiveModel {}
