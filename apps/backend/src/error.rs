use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("UnauthorizedMissingBearer")]
    UnauthorizedMissingBearer,
    #[error("UnauthorizedInvalidJwt")]
    UnauthorizedInvalidJwt,
    #[error("UnauthorizedExpiredJwt")]
    UnauthorizedExpiredJwt,
    #[error("ForbiddenMissingSignature")]
    ForbiddenMissingSignature,
    #[error("ForbiddenMalformedTimestamp")]
    ForbiddenMalformedTimestamp,
    #[error("ForbiddenSignatureExpired")]
    ForbiddenSignatureExpired,
    #[error("ForbiddenInvalidSignature")]
    ForbiddenInvalidSignature,
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Directory unavailable: {detail}")]
    DirectoryUnavailable { detail: String },
    #[error("Synchronization failed: {detail}")]
    SyncFailed { detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Helper method to extract error code from any error variant
    fn code(&self) -> String {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS".to_string(),
            AppError::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER".to_string(),
            AppError::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT".to_string(),
            AppError::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT".to_string(),
            AppError::ForbiddenMissingSignature => "MISSING_SIGNATURE_HEADERS".to_string(),
            AppError::ForbiddenMalformedTimestamp => "MALFORMED_TIMESTAMP".to_string(),
            AppError::ForbiddenSignatureExpired => "SIGNATURE_EXPIRED".to_string(),
            AppError::ForbiddenInvalidSignature => "INVALID_SIGNATURE".to_string(),
            AppError::NotFound { code, .. } => code.to_string(),
            AppError::Config { .. } => "CONFIG_ERROR".to_string(),
            AppError::DirectoryUnavailable { .. } => "DIRECTORY_UNAVAILABLE".to_string(),
            AppError::SyncFailed { .. } => "SYNC_FAILED".to_string(),
            AppError::Db { .. } => "DB_ERROR".to_string(),
            AppError::Internal { .. } => "INTERNAL".to_string(),
        }
    }

    /// Helper method to extract error detail from any error variant.
    ///
    /// Auth failures deliberately expose nothing beyond their named kind;
    /// storage and directory details stay in logs, not response bodies.
    fn detail(&self) -> String {
        match self {
            AppError::InvalidCredentials => "Incorrect username or password".to_string(),
            AppError::UnauthorizedMissingBearer => "Missing or malformed Bearer token".to_string(),
            AppError::UnauthorizedInvalidJwt => "Invalid JWT".to_string(),
            AppError::UnauthorizedExpiredJwt => "Token expired".to_string(),
            AppError::ForbiddenMissingSignature => "Missing signature headers".to_string(),
            AppError::ForbiddenMalformedTimestamp => "Invalid timestamp".to_string(),
            AppError::ForbiddenSignatureExpired => "Signature expired".to_string(),
            AppError::ForbiddenInvalidSignature => "Invalid request signature".to_string(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
            AppError::DirectoryUnavailable { .. } => "Remote directory unavailable".to_string(),
            AppError::SyncFailed { .. } => "Synchronization failed".to_string(),
            AppError::Db { .. } => "Database error".to_string(),
            AppError::Internal { .. } => "Internal error".to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::UnauthorizedMissingBearer => StatusCode::UNAUTHORIZED,
            AppError::UnauthorizedInvalidJwt => StatusCode::UNAUTHORIZED,
            AppError::UnauthorizedExpiredJwt => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenMissingSignature => StatusCode::FORBIDDEN,
            AppError::ForbiddenMalformedTimestamp => StatusCode::FORBIDDEN,
            AppError::ForbiddenSignatureExpired => StatusCode::FORBIDDEN,
            AppError::ForbiddenInvalidSignature => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DirectoryUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SyncFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn unauthorized_missing_bearer() -> Self {
        Self::UnauthorizedMissingBearer
    }

    pub fn unauthorized_invalid_jwt() -> Self {
        Self::UnauthorizedInvalidJwt
    }

    pub fn unauthorized_expired_jwt() -> Self {
        Self::UnauthorizedExpiredJwt
    }

    pub fn forbidden_missing_signature() -> Self {
        Self::ForbiddenMissingSignature
    }

    pub fn forbidden_malformed_timestamp() -> Self {
        Self::ForbiddenMalformedTimestamp
    }

    pub fn forbidden_signature_expired() -> Self {
        Self::ForbiddenSignatureExpired
    }

    pub fn forbidden_invalid_signature() -> Self {
        Self::ForbiddenInvalidSignature
    }

    pub fn not_found(code: &'static str, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    /// Named configuration failure listing exactly which variables are absent.
    pub fn missing_config(vars: &[&str]) -> Self {
        Self::Config {
            detail: format!(
                "Missing required environment variables: {}",
                vars.join(", ")
            ),
        }
    }

    pub fn directory_unavailable(detail: String) -> Self {
        Self::DirectoryUnavailable { detail }
    }

    pub fn sync_failed(detail: String) -> Self {
        Self::SyncFailed { detail }
    }

    pub fn db(detail: String) -> Self {
        Self::Db { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(format!("db error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let detail = self.detail();

        if status.is_server_error() {
            tracing::error!(code = %code, error = %self, "request failed");
        }

        let problem_details = ProblemDetails {
            type_: format!("https://contacts-mirror.app/errors/{}", code.to_uppercase()),
            title: Self::humanize_code(&code),
            status: status.as_u16(),
            detail,
            code,
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .json(problem_details)
    }
}
