pub mod authorize;
pub mod institution;
pub mod key_metrics;
pub mod other_detail;
pub mod report;
pub mod role;
pub mod user;

#[cfg(test)]
pub(crate) mod mock;

use crate::domain::repository::InstitutionRepository;
use crate::error::RegistryError;

/// Records hang off live institutions only.
pub(crate) async fn ensure_institution<I: InstitutionRepository>(
    institutions: &I,
    institution_id: i32,
) -> Result<(), RegistryError> {
    match institutions.find_by_id(institution_id).await? {
        Some(_) => Ok(()),
        None => Err(RegistryError::InstitutionNotFound),
    }
}
