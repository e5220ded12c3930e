//! Gateway-injected identity header extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;

use hsi_core::error::AppError;

/// Header carrying the authenticated caller's user id.
pub const USER_ID_HEADER: &str = "x-hsi-user-id";

/// Caller identity injected by the gateway via the `x-hsi-user-id` header.
///
/// Returns 401 if the header is absent or is not an integer id.
/// Permission enforcement (403) happens after extraction, against the caller's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: i32,
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // axum-core 0.5 declares this as `fn -> impl Future + Send`; read the header
    // synchronously and return a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<i32>().ok());

        async move {
            let user_id = user_id.ok_or(AppError::Unauthorized)?;
            Ok(Self { user_id })
        }
    }
}
