pub mod auth;
pub mod health;
pub mod institution;
pub mod key_metrics;
pub mod other_detail;
pub mod report;
pub mod role;
pub mod user;

use hsi_auth_types::identity::IdentityHeaders;
use hsi_domain::permission::Permissions;

use crate::domain::types::Actor;
use crate::error::RegistryError;
use crate::state::AppState;
use crate::usecase::authorize::AuthorizeUseCase;

/// Resolve the caller's role and require `required`; 403 when any bit is missing.
pub(crate) async fn authorize(
    state: &AppState,
    identity: IdentityHeaders,
    required: impl Into<Permissions>,
) -> Result<Actor, RegistryError> {
    let usecase = AuthorizeUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    usecase.execute(identity.user_id, required).await
}
