use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CoreError {
    #[error("{0} required")]
    IdentityRequired(&'static str),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("invalid time zone: {0:?}")]
    InvalidTimeZone(String),

    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Database error: {0}")]
    Database(SqlxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    #[error("Bootstrap error: {0}")]
    Bootstrap(String),
}

impl From<figment::Error> for CoreError {
    fn from(e: figment::Error) -> Self {
        CoreError::Config(Box::new(e))
    }
}

impl From<SqlxError> for CoreError {
    fn from(e: SqlxError) -> Self {
        CoreError::Database(e)
    }
}

impl CoreError {
    /// Attach an identity to an empty-result store error.
    pub fn not_found_or(e: SqlxError, entity: &'static str, id: i64) -> Self {
        match e {
            SqlxError::RowNotFound => CoreError::NotFound { entity, id },
            other => CoreError::Database(other),
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            CoreError::IdentityRequired(_) | CoreError::InvalidTimeZone(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            CoreError::Decode(_) => (StatusCode::BAD_REQUEST, "DECODE_ERROR", self.to_string()),
            CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            CoreError::Database(_)
            | CoreError::Io(_)
            | CoreError::Config(_)
            | CoreError::Bootstrap(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred.".to_string(),
            ),
        };
        let body = ApiErrorBody {
            code: code.to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
