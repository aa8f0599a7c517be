//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::error::ErrorKind;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

/// Every error response carries a single human-readable `detail`.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{} not found", what))
    }

    /// Classify a failed write. Constraint violations surface as `Conflict(detail)`.
    pub fn from_write(err: sqlx::Error, detail: &str) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if is_integrity_violation(db.kind()) {
                tracing::warn!(constraint = ?db.constraint(), "integrity violation: {}", db.message());
                return AppError::Conflict(detail.to_string());
            }
        }
        AppError::Db(err)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

fn is_integrity_violation(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Db(sqlx::Error::RowNotFound) => "Not found".to_string(),
            AppError::Db(_) | AppError::Config(_) => {
                tracing::error!(error = %self, "request failed");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
