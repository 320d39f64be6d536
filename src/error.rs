use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that can be returned from handlers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Every candidate company already has a collaboration in the target
    /// project; carries the display names for the client.
    #[error("{message}")]
    DuplicateCompanies {
        message: String,
        companies: Vec<String>,
    },

    /// A project copy found every source company already collaborating in
    /// the target; carries how many source rows were skipped (all of them).
    #[error("{message}")]
    CopyAllDuplicates { message: String, skipped: u64 },

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    existing_companies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<u64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details, existing_companies, skipped) = match &self {
            // 404 Not Found
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                "Not found",
                Some(resource.clone()),
                None,
                None,
            ),

            // 409 Conflict
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                "Conflict",
                Some(msg.clone()),
                None,
                None,
            ),
            AppError::DuplicateCompanies { message, companies } => (
                StatusCode::CONFLICT,
                "Conflict",
                Some(message.clone()),
                Some(companies.clone()),
                None,
            ),
            AppError::CopyAllDuplicates { message, skipped } => (
                StatusCode::CONFLICT,
                "Conflict",
                Some(message.clone()),
                None,
                Some(*skipped),
            ),

            // 400 Bad Request
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
                None,
                None,
            ),

            // 500 Internal Server Error
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error",
                    None,
                    None,
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    None,
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
            details,
            existing_companies,
            skipped,
        });

        (status, body).into_response()
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        // The unique index on (company_id, project_id) is the authoritative
        // duplicate signal; surface violations as conflicts, not 500s.
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                return AppError::Conflict(
                    "collaboration already exists for this company and project".to_string(),
                );
            }
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) => {
                return AppError::Validation(
                    "referenced company, project or person does not exist".to_string(),
                );
            }
            _ => {}
        }

        match err {
            sea_orm::DbErr::RecordNotFound(_) => AppError::NotFound("Resource".to_string()),
            sea_orm::DbErr::RecordNotInserted => {
                AppError::Conflict("record already exists".to_string())
            }
            sea_orm::DbErr::RecordNotUpdated => AppError::NotFound("Resource".to_string()),
            _ => AppError::Database(err.to_string()),
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
