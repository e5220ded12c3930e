use sea_orm::entity::prelude::*;

use hsi_core::sea_ext::SoftDelete;

/// A tracked financial institution.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "institutions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    #[sea_orm(column_name = "telephone_1")]
    pub telephone_1: Option<String>,
    #[sea_orm(column_name = "telephone_2")]
    pub telephone_2: Option<String>,
    pub email: Option<String>,
    pub headoffice: Option<String>,
    pub category: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub about: Option<String>,
    pub period_incorporated: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::reports::Entity")]
    Reports,
    #[sea_orm(has_many = "super::key_metrics::Entity")]
    KeyMetrics,
    #[sea_orm(has_many = "super::other_details::Entity")]
    OtherDetails,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl Related<super::key_metrics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KeyMetrics.def()
    }
}

impl Related<super::other_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OtherDetails.def()
    }
}

impl SoftDelete for Entity {
    fn deleted_at_column() -> Column {
        Column::DeletedAt
    }
}

impl ActiveModelBehavior for ActiveModel {}
