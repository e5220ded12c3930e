use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hsi_core::error::error_response;
use hsi_domain::credential::CredentialError;

/// Registry service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("user not found")]
    UserNotFound,
    #[error("role not found")]
    RoleNotFound,
    #[error("institution not found")]
    InstitutionNotFound,
    #[error("report not found")]
    ReportNotFound,
    #[error("report has no content")]
    ReportContentNotFound,
    #[error("key metrics not found")]
    KeyMetricsNotFound,
    #[error("other detail not found")]
    OtherDetailNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("role already exists")]
    RoleAlreadyExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid password")]
    InvalidPassword,
    #[error("invalid permission")]
    InvalidPermission,
    #[error("invalid report content")]
    InvalidContent,
    #[error("missing data")]
    MissingData,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RegistryError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::InstitutionNotFound => "INSTITUTION_NOT_FOUND",
            Self::ReportNotFound => "REPORT_NOT_FOUND",
            Self::ReportContentNotFound => "REPORT_CONTENT_NOT_FOUND",
            Self::KeyMetricsNotFound => "KEY_METRICS_NOT_FOUND",
            Self::OtherDetailNotFound => "OTHER_DETAIL_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::RoleAlreadyExists => "ROLE_ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidPermission => "INVALID_PERMISSION",
            Self::InvalidContent => "INVALID_CONTENT",
            Self::MissingData => "MISSING_DATA",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<CredentialError> for RegistryError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::EmptyPassword => Self::InvalidPassword,
            CredentialError::Malformed | CredentialError::Hashing(_) => {
                Self::Internal(anyhow::Error::new(e))
            }
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::RoleNotFound
            | Self::InstitutionNotFound
            | Self::ReportNotFound
            | Self::ReportContentNotFound
            | Self::KeyMetricsNotFound
            | Self::OtherDetailNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists | Self::RoleAlreadyExists => StatusCode::CONFLICT,
            Self::InvalidPassword
            | Self::InvalidPermission
            | Self::InvalidContent
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(status, self.kind(), self.to_string())
    }
}
