use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};

/// Entities whose rows are logically removed by stamping a `deleted_at` column.
pub trait SoftDelete: EntityTrait {
    fn deleted_at_column() -> Self::Column;
}

pub trait ExcludeDeleted {
    /// Keep only rows whose `deleted_at` is null.
    fn exclude_deleted(self) -> Self;
}

impl<E> ExcludeDeleted for Select<E>
where
    E: SoftDelete,
{
    fn exclude_deleted(self) -> Self {
        self.filter(E::deleted_at_column().is_null())
    }
}
